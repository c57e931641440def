use serde::{Deserialize, Serialize};

use crate::{PullRequestStatus, User};

/// Upper bound on reviewer slots per pull request.
pub const MAX_REVIEWERS_COUNT: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub status: PullRequestStatus,
    pub author_id: u64,
    /// Ordered reviewer slots.
    pub reviewer_ids: Vec<u64>,
    /// Optimistic concurrency token, bumped by the storage on each update.
    pub version: u64,
}

impl PullRequest {
    pub fn with_author(mut self, author: &User) -> Self {
        self.author_id = author.id;
        self
    }

    pub fn with_reviewers(mut self, reviewers: &[User]) -> Self {
        self.reviewer_ids = reviewers.iter().map(|r| r.id).collect();
        self
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: u64) -> bool {
        self.reviewer_ids.contains(&user_id)
    }

    /// Puts `new_id` in the slot held by `old_id`, keeping the other slots in place.
    /// Returns false if `old_id` is not a reviewer.
    pub fn replace_reviewer(&mut self, old_id: u64, new_id: u64) -> bool {
        match self.reviewer_ids.iter_mut().find(|id| **id == old_id) {
            Some(slot) => {
                *slot = new_id;
                true
            }
            None => false,
        }
    }

    /// Drops the slot held by `user_id`.
    pub fn remove_reviewer(&mut self, user_id: u64) -> bool {
        let before = self.reviewer_ids.len();
        self.reviewer_ids.retain(|id| *id != user_id);
        before != self.reviewer_ids.len()
    }
}
