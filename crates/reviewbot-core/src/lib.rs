//! Reviewer assignment logic.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
mod rng;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, ErrorKind, Result};
pub use rng::ReviewerRng;
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest,
        list_reviewer_pull_requests::ListReviewerPullRequests,
        merge_pull_request::MergePullRequest, reroll_reviewer::RerollReviewer,
    },
    reviews::{
        list_eligible_reviewers::ListEligibleReviewers, reassign_reviewers::ReassignReviewers,
        replace_pull_request_reviewers::ReplacePullRequestReviewers,
    },
    stats::get_reviewer_stats::GetReviewerStats,
    teams::{
        create_team::CreateTeam, get_team::GetTeam,
        mass_deactivate_team_users::MassDeactivateTeamUsers,
    },
    users::{create_user::CreateUser, deactivate_user::DeactivateUser},
};

module! {
    pub CoreModule {
        components = [
            CreateTeam, GetTeam, MassDeactivateTeamUsers,
            CreateUser, DeactivateUser,
            CreatePullRequest, MergePullRequest, RerollReviewer, ListReviewerPullRequests,
            ListEligibleReviewers, ReplacePullRequestReviewers, ReassignReviewers,
            GetReviewerStats
        ],
        providers = []
    }
}
