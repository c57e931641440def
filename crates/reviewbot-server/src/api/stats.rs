use actix_web::{web, HttpResponse};
use reviewbot_core::use_cases::stats::GetReviewerStatsInterface;
use shaku::HasComponent;

use super::with_timeout;
use crate::{server::AppContext, Result};

pub(crate) async fn reviewer_stats(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let get_stats: &dyn GetReviewerStatsInterface = ctx.core_module.resolve_ref();
    let stats = with_timeout(&ctx, get_stats.run(&core_ctx)).await?;

    Ok(HttpResponse::Ok().json(stats))
}
