use async_trait::async_trait;
use reviewbot_models::User;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

/// Active members of a team that may review, minus the excluded ids.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListEligibleReviewersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_id: u64,
        excluded: &[u64],
    ) -> Result<Vec<User>>;
}

#[derive(Component)]
#[shaku(interface = ListEligibleReviewersInterface)]
pub(crate) struct ListEligibleReviewers;

#[async_trait]
impl ListEligibleReviewersInterface for ListEligibleReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_id: u64,
        excluded: &[u64],
    ) -> Result<Vec<User>> {
        Ok(ctx
            .db_service
            .users_list_active_by_team(team_id)
            .await?
            .into_iter()
            .filter(|u| !excluded.contains(&u.id))
            .collect())
    }
}
