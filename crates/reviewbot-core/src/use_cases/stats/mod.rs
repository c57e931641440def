pub(crate) mod get_reviewer_stats;

pub use get_reviewer_stats::GetReviewerStatsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::get_reviewer_stats::MockGetReviewerStatsInterface;
