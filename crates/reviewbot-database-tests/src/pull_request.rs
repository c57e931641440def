use pretty_assertions::assert_eq;
use reviewbot_database_interface::{DatabaseError, DbService};
use reviewbot_models::{PullRequest, PullRequestStatus, Team, User};

use crate::testcase::db_test_case;

async fn seed_users(
    db: &dyn DbService,
) -> Result<Vec<User>, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let team = db
        .teams_create(Team {
            name: "backend".into(),
            ..Default::default()
        })
        .await?;

    let mut users = vec![];
    for name in ["alice", "bob", "carol", "dave"] {
        users.push(
            db.users_create(
                User {
                    name: name.into(),
                    ..Default::default()
                }
                .with_team(&team),
            )
            .await?,
        );
    }

    Ok(users)
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        assert!(matches!(
            db.pull_requests_create(PullRequest {
                title: "Add feature".into(),
                author_id: 1,
                ..Default::default()
            })
            .await,
            Err(DatabaseError::UnknownUserId(1))
        ));

        let users = seed_users(db.as_ref()).await?;

        let pr = db
            .pull_requests_create(
                PullRequest {
                    title: "Add feature".into(),
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&[users[2].clone(), users[1].clone()]),
            )
            .await?;

        assert_eq!(pr.title, "Add feature");
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.version, 1);
        // Slot order survives storage.
        assert_eq!(pr.reviewer_ids, vec![users[2].id, users[1].id]);
        assert_eq!(db.pull_requests_get(pr.id).await?, Some(pr));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("pull_request_update", |db| async move {
        assert!(matches!(
            db.pull_requests_update(PullRequest {
                id: 1,
                version: 1,
                ..Default::default()
            })
            .await,
            Err(DatabaseError::UnknownPullRequestId(1))
        ));

        let users = seed_users(db.as_ref()).await?;
        let pr = db
            .pull_requests_create(
                PullRequest {
                    title: "Add feature".into(),
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&[users[1].clone(), users[2].clone()]),
            )
            .await?;

        let mut changed = pr.clone();
        changed.replace_reviewer(users[1].id, users[3].id);
        let changed = db.pull_requests_update(changed).await?;
        assert_eq!(changed.version, 2);
        assert_eq!(changed.reviewer_ids, vec![users[3].id, users[2].id]);

        // Writing from the stale copy is rejected.
        let mut stale = pr.clone();
        stale.status = PullRequestStatus::Merged;
        assert!(matches!(
            db.pull_requests_update(stale).await,
            Err(DatabaseError::VersionConflict { expected: 1, .. })
        ));

        let stored = db.pull_requests_get_expect(pr.id).await?;
        assert_eq!(stored, changed);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_reviewer() {
    db_test_case("pull_request_list_by_reviewer", |db| async move {
        let users = seed_users(db.as_ref()).await?;

        let first = db
            .pull_requests_create(
                PullRequest {
                    title: "First".into(),
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&[users[1].clone(), users[2].clone()]),
            )
            .await?;
        let second = db
            .pull_requests_create(
                PullRequest {
                    title: "Second".into(),
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&[users[1].clone()]),
            )
            .await?;

        assert_eq!(
            db.pull_requests_list_by_reviewer(users[1].id).await?,
            vec![first.clone(), second.clone()]
        );
        assert_eq!(
            db.pull_requests_list_by_reviewer(users[2].id).await?,
            vec![first.clone()]
        );
        assert!(db
            .pull_requests_list_by_reviewer(users[0].id)
            .await?
            .is_empty());
        assert!(db.pull_requests_list_by_reviewer(999).await?.is_empty());
        assert_eq!(db.pull_requests_all().await?, vec![first, second]);

        Ok(())
    })
    .await;
}
