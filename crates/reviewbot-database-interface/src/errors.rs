use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown team ID '{0}'")]
    UnknownTeamId(u64),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Unknown user ID '{0}'")]
    UnknownUserId(u64),

    #[error("Unknown pull request ID '{0}'")]
    UnknownPullRequestId(u64),

    #[error("Pull request '{id}' was modified concurrently (expected version {expected})")]
    VersionConflict { id: u64, expected: u64 },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
