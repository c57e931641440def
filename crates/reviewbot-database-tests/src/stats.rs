use pretty_assertions::assert_eq;
use reviewbot_models::{PullRequest, ReviewerAssignmentCount, Team, User};

use crate::testcase::db_test_case;

#[tokio::test]
async fn reviewer_assignment_counts() {
    db_test_case("stats_reviewer_assignment_counts", |db| async move {
        assert!(db.reviewer_assignment_counts().await?.is_empty());

        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let mut users = vec![];
        for name in ["alice", "bob", "carol"] {
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

        db.pull_requests_create(
            PullRequest {
                title: "First".into(),
                ..Default::default()
            }
            .with_author(&users[0])
            .with_reviewers(&[users[1].clone(), users[2].clone()]),
        )
        .await?;
        db.pull_requests_create(
            PullRequest {
                title: "Second".into(),
                ..Default::default()
            }
            .with_author(&users[2])
            .with_reviewers(&[users[1].clone()]),
        )
        .await?;

        assert_eq!(
            db.reviewer_assignment_counts().await?,
            vec![
                ReviewerAssignmentCount {
                    user_id: users[1].id,
                    count: 2
                },
                ReviewerAssignmentCount {
                    user_id: users[2].id,
                    count: 1
                },
            ]
        );

        Ok(())
    })
    .await;
}
