use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::{
    pulls::ListReviewerPullRequestsInterface,
    users::{CreateUserInterface, DeactivateUserInterface},
};
use serde::Deserialize;
use shaku::HasComponent;

use super::{required, with_timeout};
use crate::{metrics::USERS_DEACTIVATED, server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateUserJson {
    name: String,
    team_id: u64,
}

pub(crate) async fn create_user(
    ctx: web::Data<AppContext>,
    body: web::Json<CreateUserJson>,
) -> Result<HttpResponse> {
    let name = required("name", &body.name)?;

    let core_ctx = ctx.as_core_context();
    let create_user: &dyn CreateUserInterface = ctx.core_module.resolve_ref();
    let user = with_timeout(&ctx, create_user.run(&core_ctx, name, body.team_id)).await?;

    Ok(HttpResponse::Created().json(user))
}

pub(crate) async fn deactivate_user(
    ctx: web::Data<AppContext>,
    user_id: web::Path<u64>,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let deactivate_user: &dyn DeactivateUserInterface = ctx.core_module.resolve_ref();
    with_timeout(&ctx, deactivate_user.run(&core_ctx, user_id.into_inner())).await?;

    USERS_DEACTIVATED.inc();
    Ok(HttpResponse::NoContent().finish())
}

pub(crate) async fn reviewer_pull_requests(
    ctx: web::Data<AppContext>,
    user_id: web::Path<u64>,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let list: &dyn ListReviewerPullRequestsInterface = ctx.core_module.resolve_ref();
    let pull_requests = with_timeout(&ctx, list.run(&core_ctx, user_id.into_inner())).await?;

    Ok(HttpResponse::Ok().json(pull_requests))
}
