use actix_http::StatusCode;
use actix_web::{web, HttpResponse, Responder};

use crate::server::AppContext;

pub(crate) async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let database_status = ctx.db_service.health_check().await.is_ok();
    let lock_status = ctx.lock_service.health_check().await.is_ok();
    let status_code = if database_status && lock_status {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "database": database_status,
        "lock": lock_status,
    }))
}
