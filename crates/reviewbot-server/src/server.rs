//! Server module.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use reviewbot_config::Config;
use reviewbot_core::{CoreContext, CoreModule, ReviewerRng};
use reviewbot_database_interface::DbService;
use reviewbot_lock_interface::LockService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    api::configure_api_handlers, health::health_check_route, metrics::build_metrics_handler,
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
    /// Lock adapter.
    pub lock_service: Box<dyn LockService>,
    /// Reviewer picker, seeded from the configuration.
    pub rng: ReviewerRng,
}

impl AppContext {
    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
        lock_service: Box<dyn LockService>,
    ) -> Self {
        Self {
            rng: ReviewerRng::from_seed(config.random_seed),
            config,
            core_module,
            db_service,
            lock_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            lock_service: self.lock_service.as_ref(),
            rng: &self.rng,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/api/v1")
                .wrap(Cors::permissive())
                .configure(configure_api_handlers),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on reviewbot!" }))
            }),
        )
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            error::InternalError::from_response(
                "",
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Invalid request format: {err}")
                })),
            )
            .into()
        }))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            error::InternalError::from_response(
                "",
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Invalid path parameter: {err}")
                })),
            )
            .into()
        }))
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting bot server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let prometheus = build_metrics_handler()?;
    let workers_count = context.config.server.workers_count;
    let context = Data::new(context);

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}

#[cfg(test)]
mod tests {
    use actix_http::StatusCode;
    use actix_web::test;
    use pretty_assertions::assert_eq;
    use reviewbot_database_memory::MemoryDb;
    use reviewbot_lock_memory::MemoryLockService;
    use reviewbot_models::{PullRequest, PullRequestStatus, Team, User};
    use serde_json::json;

    use super::*;

    fn build_context() -> Data<AppContext> {
        let mut config = Config::from_env_no_version().unwrap();
        config.random_seed = 1;

        Data::new(AppContext::new_with_adapters(
            config,
            CoreModule::builder().build(),
            Box::new(MemoryDb::new()),
            Box::new(MemoryLockService::new()),
        ))
    }

    fn build_prometheus() -> PrometheusMetrics {
        actix_web_prom::PrometheusMetricsBuilder::new("test")
            .build()
            .unwrap()
    }

    #[actix_web::test]
    async fn index() {
        let app = test::init_service(build_actix_app(build_context(), build_prometheus())).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn health() {
        let app = test::init_service(build_actix_app(build_context(), build_prometheus())).await;
        let body: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;

        assert_eq!(body, json!({"database": true, "lock": true}));
    }

    #[actix_web::test]
    async fn review_flow() {
        let app = test::init_service(build_actix_app(build_context(), build_prometheus())).await;

        let team: Team = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/teams")
                .set_json(json!({"name": "backend"}))
                .to_request(),
        )
        .await;

        let mut users = vec![];
        for name in ["alice", "bob", "carol"] {
            let user: User = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/api/v1/users")
                    .set_json(json!({"name": name, "team_id": team.id}))
                    .to_request(),
            )
            .await;
            users.push(user);
        }

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/prs")
                .set_json(json!({"title": "Add cache", "author_id": users[0].id}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let pr: PullRequest = test::read_body_json(resp).await;
        assert_eq!(pr.reviewer_ids, vec![users[1].id, users[2].id]);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/users/{}", users[1].id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let prs: Vec<PullRequest> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}/prs", users[2].id))
                .to_request(),
        )
        .await;
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].reviewer_ids, vec![users[2].id]);

        let merged: PullRequest = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/prs/{}/merge", pr.id))
                .to_request(),
        )
        .await;
        assert_eq!(merged.status, PullRequestStatus::Merged);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/prs/{}/reroll", pr.id))
                .set_json(json!({"old_reviewer_id": users[2].id}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn request_errors() {
        let app = test::init_service(build_actix_app(build_context(), build_prometheus())).await;

        let status = |req: test::TestRequest| {
            let app = &app;
            async move { test::call_service(app, req.to_request()).await.status() }
        };

        assert_eq!(
            status(test::TestRequest::get().uri("/api/v1/teams/unknown")).await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(test::TestRequest::delete().uri("/api/v1/users/abc")).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/api/v1/teams")
                    .set_json(json!({"title": "oops"}))
            )
            .await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/api/v1/teams")
                    .set_json(json!({"name": "  "}))
            )
            .await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/api/v1/prs")
                    .set_json(json!({"title": "Fix", "author_id": 42}))
            )
            .await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(test::TestRequest::post().uri("/api/v1/teams/9/deactivate")).await,
            StatusCode::NOT_FOUND
        );
    }
}
