//! `/api/v1` handlers.

mod pulls;
mod stats;
mod teams;
mod users;

use std::{future::Future, time::Duration};

use actix_web::web;

use crate::{server::AppContext, Result, ServerError};

pub(crate) fn configure_api_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/teams", web::post().to(teams::create_team))
        .route("/teams/{name}", web::get().to(teams::get_team))
        .route(
            "/teams/{id}/deactivate",
            web::post().to(teams::deactivate_team),
        )
        .route("/users", web::post().to(users::create_user))
        .route("/users/{id}", web::delete().to(users::deactivate_user))
        .route("/users/{id}/prs", web::get().to(users::reviewer_pull_requests))
        .route("/prs", web::post().to(pulls::create_pull_request))
        .route("/prs/{id}/merge", web::post().to(pulls::merge_pull_request))
        .route("/prs/{id}/reroll", web::post().to(pulls::reroll_reviewer))
        .route("/stats/reviewers", web::get().to(stats::reviewer_stats));
}

/// Run a core operation within the configured request timeout.
async fn with_timeout<T, F>(ctx: &AppContext, future: F) -> Result<T>
where
    F: Future<Output = reviewbot_core::Result<T>>,
{
    let timeout_ms = ctx.config.server.request_timeout_ms;
    tokio::time::timeout(Duration::from_millis(timeout_ms), future)
        .await
        .map_err(|_| ServerError::Timeout { timeout_ms })?
        .map_err(Into::into)
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(ServerError::InvalidRequest {
            message: format!("field '{field}' must not be blank"),
        })
    } else {
        Ok(value)
    }
}
