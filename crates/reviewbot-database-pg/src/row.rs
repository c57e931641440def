use reviewbot_models::{PullRequest, ReviewerAssignmentCount, Team, User};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct TeamRow(Team);
pub(crate) struct UserRow(User);
pub(crate) struct PullRequestRow(PullRequest);
pub(crate) struct ReviewerAssignmentCountRow(ReviewerAssignmentCount);

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        r.0
    }
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl From<ReviewerAssignmentCountRow> for ReviewerAssignmentCount {
    fn from(r: ReviewerAssignmentCountRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for TeamRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Team {
            id: row.try_get::<i32, _>("id")? as u64,
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: row.try_get::<i32, _>("id")? as u64,
            name: row.try_get("name")?,
            team_id: row.try_get::<i32, _>("team_id")? as u64,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            id: row.try_get::<i32, _>("id")? as u64,
            title: row.try_get("title")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
            author_id: row.try_get::<i32, _>("author_id")? as u64,
            reviewer_ids: row
                .try_get::<Vec<i32>, _>("reviewer_ids")?
                .into_iter()
                .map(|id| id as u64)
                .collect(),
            version: row.try_get::<i32, _>("version")? as u64,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewerAssignmentCountRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(ReviewerAssignmentCount {
            user_id: row.try_get::<i32, _>("user_id")? as u64,
            count: row.try_get::<i64, _>("count")? as u64,
        }))
    }
}
