use async_trait::async_trait;
use reviewbot_models::{PullRequest, MAX_REVIEWERS_COUNT};
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::reviews::{select_reviewers, ListEligibleReviewersInterface},
    CoreContext, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        title: &str,
        author_id: u64,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        title: &str,
        author_id: u64,
    ) -> Result<PullRequest> {
        let author = ctx.db_service.users_get_expect(author_id).await?;

        let excluded = [author.id];
        let list_eligible_reviewers: &dyn ListEligibleReviewersInterface =
            ctx.core_module.resolve_ref();
        let candidates = list_eligible_reviewers
            .run(ctx, author.team_id, &excluded)
            .await?;
        let reviewers = ctx
            .rng
            .with(|rng| select_reviewers(rng, &candidates, &excluded, MAX_REVIEWERS_COUNT));

        let pull_request = ctx
            .db_service
            .pull_requests_create(
                PullRequest {
                    title: title.into(),
                    ..Default::default()
                }
                .with_author(&author)
                .with_reviewers(&reviewers),
            )
            .await?;

        info!(
            pull_request_id = pull_request.id,
            author_id = author.id,
            reviewers = ?pull_request.reviewer_ids,
            message = "Pull request created"
        );

        Ok(pull_request)
    }
}
