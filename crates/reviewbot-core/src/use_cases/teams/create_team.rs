use async_trait::async_trait;
use reviewbot_models::Team;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamInterface)]
pub(crate) struct CreateTeam;

#[async_trait]
impl CreateTeamInterface for CreateTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str) -> Result<Team> {
        let team = ctx
            .db_service
            .teams_create(Team {
                name: name.into(),
                ..Default::default()
            })
            .await?;

        info!(team_id = team.id, name = %team.name, message = "Team created");
        Ok(team)
    }
}
