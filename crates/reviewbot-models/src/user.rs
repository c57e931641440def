use serde::{Deserialize, Serialize};

use crate::Team;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub team_id: u64,
    pub is_active: bool,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            team_id: 0,
            is_active: true,
        }
    }
}

impl User {
    pub fn with_team(mut self, team: &Team) -> Self {
        self.team_id = team.id;
        self
    }
}
