//! Domain errors.

use reviewbot_database_interface::DatabaseError;
use reviewbot_lock_interface::LockError;
use thiserror::Error;

/// Broad error category, used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidOperand,
    Internal,
}

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown user #{id}")]
    UnknownUser { id: u64 },

    #[error("Unknown team #{id}")]
    UnknownTeam { id: u64 },

    #[error("Unknown team '{name}'")]
    UnknownTeamName { name: String },

    #[error("Unknown pull request #{id}")]
    UnknownPullRequest { id: u64 },

    #[error("Pull request #{pull_request_id} is already merged")]
    AlreadyMerged { pull_request_id: u64 },

    #[error("No eligible reviewer for pull request #{pull_request_id}")]
    NoEligibleReviewers { pull_request_id: u64 },

    #[error("Team '{name}' already exists")]
    TeamAlreadyExists { name: String },

    #[error("Pull request #{pull_request_id} kept changing, giving up after {attempts} attempts")]
    ConcurrentModification { pull_request_id: u64, attempts: u32 },

    #[error("Team #{team_id} is already being deactivated")]
    TeamBusy { team_id: u64 },

    #[error("User #{user_id} is not a reviewer of pull request #{pull_request_id}")]
    NotAssignedReviewer { pull_request_id: u64, user_id: u64 },

    #[error("Reviewer reassignment failed on {failures} pull request(s)")]
    ReassignmentFailed { failures: usize },

    /// Wraps [`reviewbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },

    #[error("Lock service error: {source}")]
    LockError { source: LockError },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownUser { .. }
            | Self::UnknownTeam { .. }
            | Self::UnknownTeamName { .. }
            | Self::UnknownPullRequest { .. } => ErrorKind::NotFound,
            Self::AlreadyMerged { .. }
            | Self::NoEligibleReviewers { .. }
            | Self::TeamAlreadyExists { .. }
            | Self::ConcurrentModification { .. }
            | Self::TeamBusy { .. } => ErrorKind::Conflict,
            Self::NotAssignedReviewer { .. } => ErrorKind::InvalidOperand,
            Self::ReassignmentFailed { .. } | Self::DatabaseError { .. } | Self::LockError { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownUserId(id) => Self::UnknownUser { id },
            DatabaseError::UnknownTeamId(id) => Self::UnknownTeam { id },
            DatabaseError::UnknownTeam(name) => Self::UnknownTeamName { name },
            DatabaseError::UnknownPullRequestId(id) => Self::UnknownPullRequest { id },
            DatabaseError::TeamAlreadyExists(name) => Self::TeamAlreadyExists { name },
            e => Self::DatabaseError { source: e },
        }
    }
}

impl From<LockError> for DomainError {
    fn from(e: LockError) -> Self {
        Self::LockError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
