pub(crate) mod list_eligible_reviewers;
pub(crate) mod reassign_reviewers;
pub(crate) mod replace_pull_request_reviewers;
mod select_reviewers;

pub use list_eligible_reviewers::ListEligibleReviewersInterface;
pub use reassign_reviewers::ReassignReviewersInterface;
pub use replace_pull_request_reviewers::ReplacePullRequestReviewersInterface;
pub use select_reviewers::select_reviewers;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    list_eligible_reviewers::MockListEligibleReviewersInterface,
    reassign_reviewers::MockReassignReviewersInterface,
    replace_pull_request_reviewers::MockReplacePullRequestReviewersInterface,
};
