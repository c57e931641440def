pub(crate) mod create_pull_request;
pub(crate) mod list_reviewer_pull_requests;
pub(crate) mod merge_pull_request;
pub(crate) mod reroll_reviewer;
pub(crate) mod utils;

pub use create_pull_request::CreatePullRequestInterface;
pub use list_reviewer_pull_requests::ListReviewerPullRequestsInterface;
pub use merge_pull_request::MergePullRequestInterface;
pub use reroll_reviewer::RerollReviewerInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    list_reviewer_pull_requests::MockListReviewerPullRequestsInterface,
    merge_pull_request::MockMergePullRequestInterface,
    reroll_reviewer::MockRerollReviewerInterface,
};
