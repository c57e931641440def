use async_trait::async_trait;
use reviewbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};
use tracing::info;

use super::utils::versioned_update::{update_pull_request, PullRequestChange};
use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: u64) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

impl MergePullRequest {
    async fn mark_merged(mut pull_request: PullRequest) -> Result<PullRequestChange> {
        if pull_request.is_merged() {
            return Ok(PullRequestChange::Unchanged(pull_request));
        }

        pull_request.status = PullRequestStatus::Merged;
        Ok(PullRequestChange::Update(pull_request))
    }
}

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: u64) -> Result<PullRequest> {
        let pull_request = update_pull_request(ctx, pull_request_id, Self::mark_merged).await?;

        info!(
            pull_request_id = pull_request.id,
            version = pull_request.version,
            message = "Pull request merged"
        );

        Ok(pull_request)
    }
}
