use async_trait::async_trait;
use reviewbot_models::ReviewerAssignmentCount;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetReviewerStatsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<ReviewerAssignmentCount>>;
}

#[derive(Component)]
#[shaku(interface = GetReviewerStatsInterface)]
pub(crate) struct GetReviewerStats;

#[async_trait]
impl GetReviewerStatsInterface for GetReviewerStats {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<ReviewerAssignmentCount>> {
        ctx.db_service
            .reviewer_assignment_counts()
            .await
            .map_err(Into::into)
    }
}
