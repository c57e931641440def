use std::collections::BTreeSet;

use async_trait::async_trait;
use shaku::{Component, HasComponent, Interface};
use tracing::{error, info};

use super::ReplacePullRequestReviewersInterface;
use crate::{CoreContext, DomainError, Result};

/// Cascade run after deactivations: every open pull request reviewed by one of
/// `deactivated_ids` gets its slots refilled, in ascending id order.
///
/// A failure on one pull request does not stop the others. Returns the number
/// of pull requests processed.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, deactivated_ids: &[u64]) -> Result<usize>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewersInterface)]
pub(crate) struct ReassignReviewers;

#[async_trait]
impl ReassignReviewersInterface for ReassignReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, deactivated_ids: &[u64]) -> Result<usize> {
        let mut pull_request_ids = BTreeSet::new();
        for user_id in deactivated_ids {
            for pr in ctx
                .db_service
                .pull_requests_list_by_reviewer(*user_id)
                .await?
            {
                if !pr.is_merged() {
                    pull_request_ids.insert(pr.id);
                }
            }
        }

        let replace_reviewers: &dyn ReplacePullRequestReviewersInterface =
            ctx.core_module.resolve_ref();

        let mut failures = 0;
        for pull_request_id in &pull_request_ids {
            match replace_reviewers
                .run(ctx, *pull_request_id, deactivated_ids)
                .await
            {
                Ok(pr) => {
                    info!(
                        pull_request_id = pr.id,
                        reviewers = ?pr.reviewer_ids,
                        message = "Reviewers reassigned"
                    );
                }
                Err(e) => {
                    error!(
                        pull_request_id = pull_request_id,
                        error = %e,
                        message = "Could not reassign reviewers"
                    );
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            return Err(DomainError::ReassignmentFailed { failures });
        }

        Ok(pull_request_ids.len())
    }
}
