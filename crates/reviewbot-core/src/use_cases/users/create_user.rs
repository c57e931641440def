use async_trait::async_trait;
use reviewbot_models::User;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateUserInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str, team_id: u64) -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = CreateUserInterface)]
pub(crate) struct CreateUser;

#[async_trait]
impl CreateUserInterface for CreateUser {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str, team_id: u64) -> Result<User> {
        let user = ctx
            .db_service
            .users_create(User {
                name: name.into(),
                team_id,
                is_active: true,
                ..Default::default()
            })
            .await?;

        info!(
            user_id = user.id,
            team_id = user.team_id,
            message = "User created"
        );
        Ok(user)
    }
}
