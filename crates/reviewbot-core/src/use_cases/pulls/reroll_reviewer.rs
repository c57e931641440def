use async_trait::async_trait;
use reviewbot_models::PullRequest;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use super::utils::versioned_update::{update_pull_request, PullRequestChange};
use crate::{
    use_cases::reviews::{select_reviewers, ListEligibleReviewersInterface},
    CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait RerollReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: u64,
        old_reviewer_id: u64,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = RerollReviewerInterface)]
pub(crate) struct RerollReviewer;

impl RerollReviewer {
    async fn swap_reviewer(
        ctx: &CoreContext<'_>,
        mut pull_request: PullRequest,
        old_reviewer_id: u64,
    ) -> Result<PullRequestChange> {
        if pull_request.is_merged() {
            return Err(DomainError::AlreadyMerged {
                pull_request_id: pull_request.id,
            });
        }

        if !pull_request.has_reviewer(old_reviewer_id) {
            return Err(DomainError::NotAssignedReviewer {
                pull_request_id: pull_request.id,
                user_id: old_reviewer_id,
            });
        }

        let author = ctx.db_service.users_get_expect(pull_request.author_id).await?;

        // Current reviewers include the one being replaced.
        let mut excluded = vec![author.id];
        excluded.extend(&pull_request.reviewer_ids);

        let list_eligible_reviewers: &dyn ListEligibleReviewersInterface =
            ctx.core_module.resolve_ref();
        let candidates = list_eligible_reviewers
            .run(ctx, author.team_id, &excluded)
            .await?;
        let new_reviewer = ctx
            .rng
            .with(|rng| select_reviewers(rng, &candidates, &excluded, 1))
            .pop()
            .ok_or(DomainError::NoEligibleReviewers {
                pull_request_id: pull_request.id,
            })?;

        pull_request.replace_reviewer(old_reviewer_id, new_reviewer.id);
        Ok(PullRequestChange::Update(pull_request))
    }
}

#[async_trait]
impl RerollReviewerInterface for RerollReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: u64,
        old_reviewer_id: u64,
    ) -> Result<PullRequest> {
        let pull_request = update_pull_request(ctx, pull_request_id, |pr| {
            Self::swap_reviewer(ctx, pr, old_reviewer_id)
        })
        .await?;

        info!(
            pull_request_id = pull_request.id,
            old_reviewer_id = old_reviewer_id,
            reviewers = ?pull_request.reviewer_ids,
            message = "Reviewer rerolled"
        );

        Ok(pull_request)
    }
}
