use async_trait::async_trait;
use reviewbot_models::User;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{use_cases::reviews::ReassignReviewersInterface, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeactivateUserInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: u64) -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = DeactivateUserInterface)]
pub(crate) struct DeactivateUser;

#[async_trait]
impl DeactivateUserInterface for DeactivateUser {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: u64) -> Result<User> {
        let user = ctx.db_service.users_deactivate(user_id).await?;
        info!(user_id = user.id, message = "User deactivated");

        let reassign_reviewers: &dyn ReassignReviewersInterface = ctx.core_module.resolve_ref();
        reassign_reviewers.run(ctx, &[user.id]).await?;

        Ok(user)
    }
}
