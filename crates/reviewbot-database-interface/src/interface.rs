use async_trait::async_trait;
use reviewbot_models::{PullRequest, ReviewerAssignmentCount, Team, User};

use crate::{DatabaseError, Result};

#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    /// Persists `instance` only if the stored version still equals `instance.version`.
    /// The returned pull request carries the bumped version.
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: u64) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: u64) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or(DatabaseError::UnknownPullRequestId(id))
    }
    async fn pull_requests_list_by_reviewer(&self, user_id: u64) -> Result<Vec<PullRequest>>;
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>>;
    async fn reviewer_assignment_counts(&self) -> Result<Vec<ReviewerAssignmentCount>>;
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }
    async fn teams_get_from_id(&self, id: u64) -> Result<Option<Team>>;
    async fn teams_get_from_id_expect(&self, id: u64) -> Result<Team> {
        self.teams_get_from_id(id)
            .await?
            .ok_or(DatabaseError::UnknownTeamId(id))
    }
    async fn teams_all(&self) -> Result<Vec<Team>>;
    async fn users_create(&self, instance: User) -> Result<User>;
    async fn users_get(&self, id: u64) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: u64) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or(DatabaseError::UnknownUserId(id))
    }
    async fn users_all(&self) -> Result<Vec<User>>;
    /// Every user of the team, active or not, ordered by id.
    async fn users_list_by_team(&self, team_id: u64) -> Result<Vec<User>>;
    async fn users_list_active_by_team(&self, team_id: u64) -> Result<Vec<User>>;
    async fn users_deactivate(&self, id: u64) -> Result<User>;
    /// Deactivates every user of the team as a single unit and returns them.
    async fn users_deactivate_team(&self, team_id: u64) -> Result<Vec<User>>;
}
