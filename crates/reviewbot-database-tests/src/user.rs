use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;
use reviewbot_models::{PullRequest, Team, User};

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("user_create", |db| async move {
        assert!(matches!(
            db.users_create(User {
                name: "alice".into(),
                team_id: 1,
                ..Default::default()
            })
            .await,
            Err(DatabaseError::UnknownTeamId(1))
        ));

        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;

        let user = db
            .users_create(
                User {
                    name: "alice".into(),
                    ..Default::default()
                }
                .with_team(&team),
            )
            .await?;

        assert_eq!(user.name, "alice");
        assert_eq!(user.team_id, team.id);
        assert!(user.is_active);
        assert_eq!(db.users_get(user.id).await?, Some(user));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_active_by_team() {
    db_test_case("user_list_active_by_team", |db| async move {
        let backend = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let frontend = db
            .teams_create(Team {
                name: "frontend".into(),
                ..Default::default()
            })
            .await?;

        let alice = db
            .users_create(
                User {
                    name: "alice".into(),
                    ..Default::default()
                }
                .with_team(&backend),
            )
            .await?;
        let bob = db
            .users_create(
                User {
                    name: "bob".into(),
                    is_active: false,
                    ..Default::default()
                }
                .with_team(&backend),
            )
            .await?;
        db.users_create(
            User {
                name: "carol".into(),
                ..Default::default()
            }
            .with_team(&frontend),
        )
        .await?;

        assert_eq!(
            db.users_list_active_by_team(backend.id).await?,
            vec![alice.clone()]
        );
        assert!(!db.users_get_expect(bob.id).await?.is_active);
        assert_eq!(db.users_list_by_team(backend.id).await?, vec![alice, bob]);
        assert_eq!(db.users_all().await?.len(), 3);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate() {
    db_test_case("user_deactivate", |db| async move {
        assert!(matches!(
            db.users_deactivate(1).await,
            Err(DatabaseError::UnknownUserId(1))
        ));

        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let user = db
            .users_create(
                User {
                    name: "alice".into(),
                    ..Default::default()
                }
                .with_team(&team),
            )
            .await?;

        let user = db.users_deactivate(user.id).await?;
        assert!(!user.is_active);

        // Deactivating twice is fine.
        let user = db.users_deactivate(user.id).await?;
        assert!(!user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_team() {
    db_test_case("user_deactivate_team", |db| async move {
        assert!(matches!(
            db.users_deactivate_team(1).await,
            Err(DatabaseError::UnknownTeamId(1))
        ));

        let backend = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let frontend = db
            .teams_create(Team {
                name: "frontend".into(),
                ..Default::default()
            })
            .await?;

        for name in ["alice", "bob"] {
            db.users_create(
                User {
                    name: name.into(),
                    ..Default::default()
                }
                .with_team(&backend),
            )
            .await?;
        }
        let carol = db
            .users_create(
                User {
                    name: "carol".into(),
                    ..Default::default()
                }
                .with_team(&frontend),
            )
            .await?;

        let deactivated = db.users_deactivate_team(backend.id).await?;
        assert_eq!(
            deactivated
                .iter()
                .map(|u| (u.name.as_str(), u.is_active))
                .collect::<Vec<_>>(),
            vec![("alice", false), ("bob", false)]
        );
        assert!(db.users_list_active_by_team(backend.id).await?.is_empty());
        assert!(db.users_get_expect(carol.id).await?.is_active);

        // An empty team deactivates nothing.
        let empty = db
            .teams_create(Team {
                name: "empty".into(),
                ..Default::default()
            })
            .await?;
        assert!(db.users_deactivate_team(empty.id).await?.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_team() {
    db_test_case("user_list_by_team", |db| async move {
        assert!(db.users_list_by_team(1).await?.is_empty());

        let backend = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let frontend = db
            .teams_create(Team {
                name: "frontend".into(),
                ..Default::default()
            })
            .await?;

        let mut members = Vec::new();
        for name in ["alice", "bob", "carol"] {
            members.push(
                db.users_create(
                    User {
                        name: name.into(),
                        ..Default::default()
                    }
                    .with_team(&backend),
                )
                .await?,
            );
        }
        db.users_create(
            User {
                name: "dave".into(),
                ..Default::default()
            }
            .with_team(&frontend),
        )
        .await?;
        members[1] = db.users_deactivate(members[1].id).await?;

        assert_eq!(db.users_list_by_team(backend.id).await?, members);
        assert_eq!(db.users_list_by_team(frontend.id).await?.len(), 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn out_of_range_ids_match_nothing() {
    db_test_case("user_out_of_range_ids", |db| async move {
        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let user = db
            .users_create(
                User {
                    name: "alice".into(),
                    ..Default::default()
                }
                .with_team(&team),
            )
            .await?;

        let wide_user_id = (1u64 << 32) + user.id;
        let wide_team_id = (1u64 << 32) + team.id;

        assert_eq!(db.users_get(wide_user_id).await?, None);
        assert_eq!(db.teams_get_from_id(wide_team_id).await?, None);
        assert_eq!(db.pull_requests_get(wide_user_id).await?, None);
        assert!(db.users_list_by_team(wide_team_id).await?.is_empty());
        assert!(db.users_list_active_by_team(wide_team_id).await?.is_empty());
        assert!(db.pull_requests_list_by_reviewer(wide_user_id).await?.is_empty());
        assert!(matches!(
            db.users_deactivate(wide_user_id).await,
            Err(DatabaseError::UnknownUserId(id)) if id == wide_user_id
        ));
        assert!(matches!(
            db.users_deactivate_team(wide_team_id).await,
            Err(DatabaseError::UnknownTeamId(id)) if id == wide_team_id
        ));
        assert!(matches!(
            db.users_create(User {
                name: "bob".into(),
                team_id: wide_team_id,
                ..Default::default()
            })
            .await,
            Err(DatabaseError::UnknownTeamId(id)) if id == wide_team_id
        ));
        assert!(matches!(
            db.pull_requests_create(PullRequest {
                title: "wide".into(),
                author_id: wide_user_id,
                ..Default::default()
            })
            .await,
            Err(DatabaseError::UnknownUserId(id)) if id == wide_user_id
        ));

        // The narrower id was left untouched.
        assert!(db.users_get_expect(user.id).await?.is_active);
        assert!(db.pull_requests_all().await?.is_empty());

        Ok(())
    })
    .await;
}
