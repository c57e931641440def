use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::pulls::{
    CreatePullRequestInterface, MergePullRequestInterface, RerollReviewerInterface,
};
use serde::Deserialize;
use shaku::HasComponent;

use super::{required, with_timeout};
use crate::{
    metrics::{PULL_REQUESTS_CREATED, PULL_REQUESTS_MERGED, REVIEWERS_REROLLED},
    server::AppContext,
    Result,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    title: String,
    author_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RerollReviewerJson {
    old_reviewer_id: u64,
}

pub(crate) async fn create_pull_request(
    ctx: web::Data<AppContext>,
    body: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse> {
    let title = required("title", &body.title)?;

    let core_ctx = ctx.as_core_context();
    let create: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = with_timeout(&ctx, create.run(&core_ctx, title, body.author_id)).await?;

    PULL_REQUESTS_CREATED.inc();
    Ok(HttpResponse::Created().json(pull_request))
}

pub(crate) async fn merge_pull_request(
    ctx: web::Data<AppContext>,
    pull_request_id: web::Path<u64>,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let merge: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = with_timeout(&ctx, merge.run(&core_ctx, pull_request_id.into_inner())).await?;

    PULL_REQUESTS_MERGED.inc();
    Ok(HttpResponse::Ok().json(pull_request))
}

pub(crate) async fn reroll_reviewer(
    ctx: web::Data<AppContext>,
    pull_request_id: web::Path<u64>,
    body: web::Json<RerollReviewerJson>,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let reroll: &dyn RerollReviewerInterface = ctx.core_module.resolve_ref();
    let pull_request = with_timeout(
        &ctx,
        reroll.run(
            &core_ctx,
            pull_request_id.into_inner(),
            body.old_reviewer_id,
        ),
    )
    .await?;

    REVIEWERS_REROLLED.inc();
    Ok(HttpResponse::Ok().json(pull_request))
}
