use async_trait::async_trait;
use reviewbot_models::PullRequest;
use shaku::{Component, HasComponent, Interface};

use super::{select_reviewers, ListEligibleReviewersInterface};
use crate::{
    use_cases::pulls::utils::versioned_update::{update_pull_request, PullRequestChange},
    CoreContext, Result,
};

/// Replace every slot held by one of `removed_ids` on an open pull request.
///
/// Slots are refilled from the author's active teammates, in slot order.
/// Slots without a replacement are dropped. Merged pull requests are left
/// untouched.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReplacePullRequestReviewersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: u64,
        removed_ids: &[u64],
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = ReplacePullRequestReviewersInterface)]
pub(crate) struct ReplacePullRequestReviewers;

impl ReplacePullRequestReviewers {
    async fn refill_slots(
        ctx: &CoreContext<'_>,
        mut pull_request: PullRequest,
        removed_ids: &[u64],
    ) -> Result<PullRequestChange> {
        if pull_request.is_merged() {
            return Ok(PullRequestChange::Unchanged(pull_request));
        }

        let vacated: Vec<u64> = pull_request
            .reviewer_ids
            .iter()
            .copied()
            .filter(|id| removed_ids.contains(id))
            .collect();
        if vacated.is_empty() {
            return Ok(PullRequestChange::Unchanged(pull_request));
        }

        let author = ctx.db_service.users_get_expect(pull_request.author_id).await?;

        let mut excluded = vec![author.id];
        excluded.extend(&pull_request.reviewer_ids);
        excluded.extend(removed_ids);

        let list_eligible_reviewers: &dyn ListEligibleReviewersInterface =
            ctx.core_module.resolve_ref();
        let candidates = list_eligible_reviewers
            .run(ctx, author.team_id, &excluded)
            .await?;
        let mut replacements = ctx
            .rng
            .with(|rng| select_reviewers(rng, &candidates, &excluded, vacated.len()))
            .into_iter();

        for old_id in vacated {
            match replacements.next() {
                Some(new_reviewer) => {
                    pull_request.replace_reviewer(old_id, new_reviewer.id);
                }
                None => {
                    pull_request.remove_reviewer(old_id);
                }
            }
        }

        Ok(PullRequestChange::Update(pull_request))
    }
}

#[async_trait]
impl ReplacePullRequestReviewersInterface for ReplacePullRequestReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: u64,
        removed_ids: &[u64],
    ) -> Result<PullRequest> {
        update_pull_request(ctx, pull_request_id, |pr| {
            Self::refill_slots(ctx, pr, removed_ids)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbService;
    use reviewbot_models::{PullRequestStatus, User};

    use super::*;
    use crate::context::tests::CoreContextTest;

    async fn create_pr(ctx: &CoreContextTest, author: &User, reviewers: &[User]) -> PullRequest {
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    title: "Add feature".into(),
                    ..Default::default()
                }
                .with_author(author)
                .with_reviewers(reviewers),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replaces_vacated_slot() {
        let ctx = CoreContextTest::new();
        let (_, users) = ctx.seed_team("backend", &["author", "a", "b", "c"]).await;
        let pr = create_pr(&ctx, &users[0], &[users[1].clone(), users[2].clone()]).await;
        ctx.db_service.users_deactivate(users[2].id).await.unwrap();

        let updated = ReplacePullRequestReviewers
            .run(&ctx.as_context(), pr.id, &[users[2].id])
            .await
            .unwrap();

        assert_eq!(updated.reviewer_ids, vec![users[1].id, users[3].id]);
    }

    #[tokio::test]
    async fn drops_slot_without_candidate() {
        let ctx = CoreContextTest::new();
        let (_, users) = ctx.seed_team("backend", &["author", "a", "b"]).await;
        let pr = create_pr(&ctx, &users[0], &[users[1].clone(), users[2].clone()]).await;
        ctx.db_service.users_deactivate(users[1].id).await.unwrap();

        let updated = ReplacePullRequestReviewers
            .run(&ctx.as_context(), pr.id, &[users[1].id])
            .await
            .unwrap();

        assert_eq!(updated.reviewer_ids, vec![users[2].id]);
    }

    #[tokio::test]
    async fn both_slots_with_single_spare() {
        let ctx = CoreContextTest::new();
        let (_, users) = ctx
            .seed_team("backend", &["author", "a", "b", "spare"])
            .await;
        let pr = create_pr(&ctx, &users[0], &[users[1].clone(), users[2].clone()]).await;
        ctx.db_service.users_deactivate(users[1].id).await.unwrap();
        ctx.db_service.users_deactivate(users[2].id).await.unwrap();

        let updated = ReplacePullRequestReviewers
            .run(&ctx.as_context(), pr.id, &[users[1].id, users[2].id])
            .await
            .unwrap();

        assert_eq!(updated.reviewer_ids, vec![users[3].id]);
    }

    #[tokio::test]
    async fn merged_is_skipped() {
        let ctx = CoreContextTest::new();
        let (_, users) = ctx.seed_team("backend", &["author", "a", "b"]).await;
        let mut pr = create_pr(&ctx, &users[0], &[users[1].clone()]).await;
        pr.status = PullRequestStatus::Merged;
        let pr = ctx.db_service.pull_requests_update(pr).await.unwrap();
        ctx.db_service.users_deactivate(users[1].id).await.unwrap();

        let updated = ReplacePullRequestReviewers
            .run(&ctx.as_context(), pr.id, &[users[1].id])
            .await
            .unwrap();

        assert_eq!(updated, pr);
    }

    #[tokio::test]
    async fn unrelated_pull_request_is_unchanged() {
        let ctx = CoreContextTest::new();
        let (_, users) = ctx.seed_team("backend", &["author", "a", "b"]).await;
        let pr = create_pr(&ctx, &users[0], &[users[1].clone()]).await;

        let updated = ReplacePullRequestReviewers
            .run(&ctx.as_context(), pr.id, &[users[2].id])
            .await
            .unwrap();

        assert_eq!(updated, pr);
    }
}
