use async_trait::async_trait;
use reviewbot_models::{Team, User};
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

/// A team along with all of its members, active or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<User>,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str) -> Result<TeamWithMembers>;
}

#[derive(Component)]
#[shaku(interface = GetTeamInterface)]
pub(crate) struct GetTeam;

#[async_trait]
impl GetTeamInterface for GetTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, name: &str) -> Result<TeamWithMembers> {
        let team = ctx.db_service.teams_get_expect(name).await?;
        let members = ctx.db_service.users_list_by_team(team.id).await?;

        Ok(TeamWithMembers { team, members })
    }
}
