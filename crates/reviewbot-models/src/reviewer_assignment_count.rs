use serde::{Deserialize, Serialize};

/// How many pull requests currently list a user as reviewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerAssignmentCount {
    pub user_id: u64,
    pub count: u64,
}
