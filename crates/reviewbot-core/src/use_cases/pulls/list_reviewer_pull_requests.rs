use async_trait::async_trait;
use reviewbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListReviewerPullRequestsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, reviewer_id: u64) -> Result<Vec<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = ListReviewerPullRequestsInterface)]
pub(crate) struct ListReviewerPullRequests;

#[async_trait]
impl ListReviewerPullRequestsInterface for ListReviewerPullRequests {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, reviewer_id: u64) -> Result<Vec<PullRequest>> {
        ctx.db_service
            .pull_requests_list_by_reviewer(reviewer_id)
            .await
            .map_err(Into::into)
    }
}
