//! Domain models.

mod pull_request;
mod pull_request_status;
mod reviewer_assignment_count;
mod team;
mod user;

pub use pull_request::{PullRequest, MAX_REVIEWERS_COUNT};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use reviewer_assignment_count::ReviewerAssignmentCount;
pub use team::Team;
pub use user::User;
