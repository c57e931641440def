use async_trait::async_trait;
use reviewbot_lock_interface::{using_lock, UsingLockResult};
use reviewbot_models::User;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::reviews::ReassignReviewersInterface, CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MassDeactivateTeamUsersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_id: u64) -> Result<Vec<User>>;
}

#[derive(Component)]
#[shaku(interface = MassDeactivateTeamUsersInterface)]
pub(crate) struct MassDeactivateTeamUsers;

impl MassDeactivateTeamUsers {
    pub(crate) fn lock_key(team_id: u64) -> String {
        format!("team-deactivation-{team_id}")
    }
}

#[async_trait]
impl MassDeactivateTeamUsersInterface for MassDeactivateTeamUsers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_id: u64) -> Result<Vec<User>> {
        ctx.db_service.teams_get_from_id_expect(team_id).await?;

        let output = using_lock::<_, _, _, DomainError>(
            ctx.lock_service,
            &Self::lock_key(team_id),
            ctx.config.lock.team_timeout_ms,
            || async {
                let users = ctx.db_service.users_deactivate_team(team_id).await?;
                let user_ids: Vec<u64> = users.iter().map(|u| u.id).collect();

                info!(
                    team_id = team_id,
                    users = ?user_ids,
                    message = "Team users deactivated"
                );

                let reassign_reviewers: &dyn ReassignReviewersInterface =
                    ctx.core_module.resolve_ref();
                reassign_reviewers.run(ctx, &user_ids).await?;

                Ok(users)
            },
        )
        .await?;

        match output {
            UsingLockResult::AlreadyLocked => Err(DomainError::TeamBusy { team_id }),
            UsingLockResult::Locked(result) => result,
        }
    }
}
