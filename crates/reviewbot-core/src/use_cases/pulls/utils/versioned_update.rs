use std::future::Future;

use reviewbot_database_interface::DatabaseError;
use reviewbot_models::PullRequest;
use tracing::warn;

use crate::{CoreContext, DomainError, Result};

/// What a mutation decided to do with the freshly loaded pull request.
#[derive(Debug)]
pub(crate) enum PullRequestChange {
    /// Persist this new state.
    Update(PullRequest),
    /// Nothing to write.
    Unchanged(PullRequest),
}

/// Load, mutate and persist a pull request, starting over on version conflicts.
///
/// `mutate` runs again on a fresh copy after every conflict, so it must not
/// rely on state computed during a previous attempt.
pub(crate) async fn update_pull_request<'a, F, Fut>(
    ctx: &CoreContext<'a>,
    pull_request_id: u64,
    mut mutate: F,
) -> Result<PullRequest>
where
    F: FnMut(PullRequest) -> Fut,
    Fut: Future<Output = Result<PullRequestChange>>,
{
    let attempts = ctx.config.core.update_max_attempts.max(1);

    for attempt in 1..=attempts {
        let pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        let instance = match mutate(pull_request).await? {
            PullRequestChange::Unchanged(pr) => return Ok(pr),
            PullRequestChange::Update(pr) => pr,
        };

        match ctx.db_service.pull_requests_update(instance).await {
            Ok(pr) => return Ok(pr),
            Err(DatabaseError::VersionConflict { expected, .. }) => {
                warn!(
                    pull_request_id = pull_request_id,
                    version = expected,
                    attempt = attempt,
                    message = "Pull request changed while updating, retrying"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(DomainError::ConcurrentModification {
        pull_request_id,
        attempts,
    })
}
