use async_trait::async_trait;
use reviewbot_database_interface::{DatabaseError, DbService, Result};
use reviewbot_models::{PullRequest, ReviewerAssignmentCount, Team, User};
use sqlx::{PgConnection, PgPool, Row};

use crate::row::{PullRequestRow, ReviewerAssignmentCountRow, TeamRow, UserRow};

const PULL_REQUEST_SELECT: &str = r#"
    SELECT pull_request.*,
    ARRAY(
        SELECT user_id
        FROM pull_request_reviewer
        WHERE pull_request_reviewer.pull_request_id = pull_request.id
        ORDER BY position
    ) AS reviewer_ids
    FROM pull_request
"#;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    /// Ids above the SERIAL range cannot match any stored row.
    fn db_id(id: u64) -> Option<i32> {
        i32::try_from(id).ok()
    }

    fn db_id_or(id: u64, target: DatabaseError) -> Result<i32> {
        Self::db_id(id).ok_or(target)
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            Self::wrap_error(e)
        }
    }

    async fn insert_reviewers(
        conn: &mut PgConnection,
        pull_request_id: u64,
        reviewer_ids: &[u64],
    ) -> Result<()> {
        let pull_request_db_id =
            Self::db_id_or(pull_request_id, DatabaseError::UnknownPullRequestId(pull_request_id))?;
        for (position, reviewer_id) in reviewer_ids.iter().enumerate() {
            let reviewer_db_id =
                Self::db_id_or(*reviewer_id, DatabaseError::UnknownUserId(*reviewer_id))?;
            sqlx::query(
                r#"
                INSERT INTO pull_request_reviewer
                (
                    pull_request_id,
                    user_id,
                    position
                )
                VALUES
                (
                    $1,
                    $2,
                    $3
                );
            "#,
            )
            .bind(pull_request_db_id)
            .bind(reviewer_db_id)
            .bind(position as i16)
            .execute(&mut *conn)
            .await
            .map_err(Self::wrap_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_error)?;

        Ok(())
    }

    ////////////////
    // Pull requests

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        self.users_get_expect(instance.author_id).await?;
        for reviewer_id in &instance.reviewer_ids {
            self.users_get_expect(*reviewer_id).await?;
        }
        let author_db_id =
            Self::db_id_or(instance.author_id, DatabaseError::UnknownUserId(instance.author_id))?;

        let mut tx = self.pool.begin().await.map_err(Self::wrap_error)?;

        let id: i32 = sqlx::query(
            r#"
            INSERT INTO pull_request
            (
                title,
                status,
                author_id,
                version
            )
            VALUES
            (
                $1,
                $2,
                $3,
                1
            )
            RETURNING id;
        "#,
        )
        .bind(&instance.title)
        .bind(instance.status.to_str())
        .bind(author_db_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Self::wrap_error)?
        .get(0);

        Self::insert_reviewers(&mut *tx, id as u64, &instance.reviewer_ids).await?;
        tx.commit().await.map_err(Self::wrap_error)?;

        self.pull_requests_get_expect(id as u64).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        let id = Self::db_id_or(instance.id, DatabaseError::UnknownPullRequestId(instance.id))?;
        let version = i32::try_from(instance.version).map_err(|_| DatabaseError::VersionConflict {
            id: instance.id,
            expected: instance.version,
        })?;

        // Dropping the transaction before commit rolls every statement back.
        let mut tx = self.pool.begin().await.map_err(Self::wrap_error)?;

        let updated = sqlx::query(
            r#"
            UPDATE pull_request
            SET title = $1,
            status = $2,
            version = version + 1
            WHERE id = $3
            AND version = $4
            RETURNING id;
        "#,
        )
        .bind(&instance.title)
        .bind(instance.status.to_str())
        .bind(id)
        .bind(version)
        .fetch_optional(&mut *tx)
        .await
        .map_err(Self::wrap_error)?;

        if updated.is_none() {
            return match self.pull_requests_get(instance.id).await? {
                Some(_) => Err(DatabaseError::VersionConflict {
                    id: instance.id,
                    expected: instance.version,
                }),
                None => Err(DatabaseError::UnknownPullRequestId(instance.id)),
            };
        }

        sqlx::query(
            r#"
            DELETE FROM pull_request_reviewer
            WHERE pull_request_id = $1;
        "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Self::wrap_error)?;

        Self::insert_reviewers(&mut *tx, instance.id, &instance.reviewer_ids).await?;
        tx.commit().await.map_err(Self::wrap_error)?;

        self.pull_requests_get_expect(instance.id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, id: u64) -> Result<Option<PullRequest>> {
        let Some(db_id) = Self::db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
                {PULL_REQUEST_SELECT}
                WHERE pull_request.id = $1
            "#
        ))
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(&self, user_id: u64) -> Result<Vec<PullRequest>> {
        let Some(db_id) = Self::db_id(user_id) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
                {PULL_REQUEST_SELECT}
                WHERE EXISTS (
                    SELECT 1
                    FROM pull_request_reviewer
                    WHERE pull_request_reviewer.pull_request_id = pull_request.id
                    AND pull_request_reviewer.user_id = $1
                )
                ORDER BY pull_request.id
            "#
        ))
        .bind(db_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
                {PULL_REQUEST_SELECT}
                ORDER BY pull_request.id
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn reviewer_assignment_counts(&self) -> Result<Vec<ReviewerAssignmentCount>> {
        let rows = sqlx::query_as::<_, ReviewerAssignmentCountRow>(
            r#"
                SELECT user_id, COUNT(pull_request_id) AS count
                FROM pull_request_reviewer
                GROUP BY user_id
                ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    ////////
    // Teams

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let row = sqlx::query(
            r#"
            INSERT INTO team
            (
                name
            )
            VALUES
            (
                $1
            )
            ON CONFLICT (name) DO NOTHING
            RETURNING id;
        "#,
        )
        .bind(&instance.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        match row {
            Some(row) => {
                let id: i32 = row.get(0);
                self.teams_get_from_id_expect(id as u64).await
            }
            None => Err(DatabaseError::TeamAlreadyExists(instance.name)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
                SELECT *
                FROM team
                WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get_from_id(&self, id: u64) -> Result<Option<Team>> {
        let Some(db_id) = Self::db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, TeamRow>(
            r#"
                SELECT *
                FROM team
                WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_all(&self) -> Result<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
                SELECT *
                FROM team
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    ////////
    // Users

    #[tracing::instrument(skip(self))]
    async fn users_create(&self, instance: User) -> Result<User> {
        self.teams_get_from_id_expect(instance.team_id).await?;
        let team_db_id =
            Self::db_id_or(instance.team_id, DatabaseError::UnknownTeamId(instance.team_id))?;

        let id: i32 = sqlx::query(
            r#"
            INSERT INTO member
            (
                name,
                team_id,
                is_active
            )
            VALUES
            (
                $1,
                $2,
                $3
            )
            RETURNING id;
        "#,
        )
        .bind(&instance.name)
        .bind(team_db_id)
        .bind(instance.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error)?
        .get(0);

        self.users_get_expect(id as u64).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, id: u64) -> Result<Option<User>> {
        let Some(db_id) = Self::db_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM member
                WHERE id = $1
            "#,
        )
        .bind(db_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM member
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_by_team(&self, team_id: u64) -> Result<Vec<User>> {
        let Some(db_id) = Self::db_id(team_id) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM member
                WHERE team_id = $1
                ORDER BY id
            "#,
        )
        .bind(db_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_active_by_team(&self, team_id: u64) -> Result<Vec<User>> {
        let Some(db_id) = Self::db_id(team_id) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM member
                WHERE team_id = $1
                AND is_active = TRUE
                ORDER BY id
            "#,
        )
        .bind(db_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_deactivate(&self, id: u64) -> Result<User> {
        let db_id = Self::db_id_or(id, DatabaseError::UnknownUserId(id))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE member
            SET is_active = FALSE
            WHERE id = $1
            RETURNING *;
        "#,
        )
        .bind(db_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::wrap_row_not_found(e, DatabaseError::UnknownUserId(id)))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn users_deactivate_team(&self, team_id: u64) -> Result<Vec<User>> {
        self.teams_get_from_id_expect(team_id).await?;
        let db_id = Self::db_id_or(team_id, DatabaseError::UnknownTeamId(team_id))?;

        let mut tx = self.pool.begin().await.map_err(Self::wrap_error)?;

        sqlx::query(
            r#"
            UPDATE member
            SET is_active = FALSE
            WHERE team_id = $1;
        "#,
        )
        .bind(db_id)
        .execute(&mut *tx)
        .await
        .map_err(Self::wrap_error)?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM member
                WHERE team_id = $1
                ORDER BY id
            "#,
        )
        .bind(db_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(Self::wrap_error)?;

        tx.commit().await.map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
