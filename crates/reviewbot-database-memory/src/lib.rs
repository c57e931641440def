use std::{
    collections::{BTreeMap, HashMap},
    sync::RwLock,
};

use async_trait::async_trait;
use reviewbot_database_interface::{DatabaseError, DbService, Result};
use reviewbot_models::{PullRequest, ReviewerAssignmentCount, Team, User};

#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashMap<u64, Team>>,
    users: RwLock<HashMap<u64, User>>,
    pull_requests: RwLock<HashMap<u64, PullRequest>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn next_id<T>(values: &HashMap<u64, T>) -> u64 {
        values.keys().max().copied().unwrap_or(0) + 1
    }

    fn sorted_by_id<T: Clone>(values: &HashMap<u64, T>, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let mut keys: Vec<_> = values.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(|k| values.get(&k))
            .filter(|v| filter(v))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ////////////////
    // Pull requests

    async fn pull_requests_create(&self, mut instance: PullRequest) -> Result<PullRequest> {
        self.users_get_expect(instance.author_id).await?;
        for reviewer_id in &instance.reviewer_ids {
            self.users_get_expect(*reviewer_id).await?;
        }

        let mut pull_requests = self.pull_requests.write().unwrap();
        instance.id = Self::next_id(&pull_requests);
        instance.version = 1;
        pull_requests.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn pull_requests_update(&self, mut instance: PullRequest) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let stored = pull_requests
            .get(&instance.id)
            .ok_or(DatabaseError::UnknownPullRequestId(instance.id))?;

        if stored.version != instance.version {
            return Err(DatabaseError::VersionConflict {
                id: instance.id,
                expected: instance.version,
            });
        }

        instance.version += 1;
        pull_requests.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(&self, id: u64) -> Result<Option<PullRequest>> {
        Ok(self.pull_requests.read().unwrap().get(&id).cloned())
    }

    async fn pull_requests_list_by_reviewer(&self, user_id: u64) -> Result<Vec<PullRequest>> {
        Ok(Self::sorted_by_id(
            &*self.pull_requests.read().unwrap(),
            |pr| pr.has_reviewer(user_id),
        ))
    }

    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
        Ok(Self::sorted_by_id(
            &*self.pull_requests.read().unwrap(),
            |_| true,
        ))
    }

    async fn reviewer_assignment_counts(&self) -> Result<Vec<ReviewerAssignmentCount>> {
        let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
        for pr in self.pull_requests.read().unwrap().values() {
            for reviewer_id in &pr.reviewer_ids {
                *counts.entry(*reviewer_id).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(user_id, count)| ReviewerAssignmentCount { user_id, count })
            .collect())
    }

    ////////
    // Teams

    async fn teams_create(&self, mut instance: Team) -> Result<Team> {
        let mut teams = self.teams.write().unwrap();
        if teams.values().any(|t| t.name == instance.name) {
            return Err(DatabaseError::TeamAlreadyExists(instance.name));
        }

        instance.id = Self::next_id(&teams);
        teams.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        Ok(self
            .teams
            .read()
            .unwrap()
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn teams_get_from_id(&self, id: u64) -> Result<Option<Team>> {
        Ok(self.teams.read().unwrap().get(&id).cloned())
    }

    async fn teams_all(&self) -> Result<Vec<Team>> {
        Ok(Self::sorted_by_id(&*self.teams.read().unwrap(), |_| true))
    }

    ////////
    // Users

    async fn users_create(&self, mut instance: User) -> Result<User> {
        self.teams_get_from_id_expect(instance.team_id).await?;

        let mut users = self.users.write().unwrap();
        instance.id = Self::next_id(&users);
        users.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn users_get(&self, id: u64) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn users_all(&self) -> Result<Vec<User>> {
        Ok(Self::sorted_by_id(&*self.users.read().unwrap(), |_| true))
    }

    async fn users_list_by_team(&self, team_id: u64) -> Result<Vec<User>> {
        Ok(Self::sorted_by_id(&*self.users.read().unwrap(), |u| {
            u.team_id == team_id
        }))
    }

    async fn users_list_active_by_team(&self, team_id: u64) -> Result<Vec<User>> {
        Ok(Self::sorted_by_id(&*self.users.read().unwrap(), |u| {
            u.team_id == team_id && u.is_active
        }))
    }

    async fn users_deactivate(&self, id: u64) -> Result<User> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or(DatabaseError::UnknownUserId(id))?;
        user.is_active = false;
        Ok(user.clone())
    }

    async fn users_deactivate_team(&self, team_id: u64) -> Result<Vec<User>> {
        self.teams_get_from_id_expect(team_id).await?;

        let mut users = self.users.write().unwrap();
        for user in users.values_mut().filter(|u| u.team_id == team_id) {
            user.is_active = false;
        }

        Ok(Self::sorted_by_id(&*users, |u| u.team_id == team_id))
    }
}
