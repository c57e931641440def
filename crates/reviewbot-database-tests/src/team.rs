use pretty_assertions::assert_eq;
use reviewbot_database_interface::DatabaseError;
use reviewbot_models::Team;

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        assert_eq!(team.name, "backend");
        assert!(team.id > 0);

        assert!(matches!(
            db.teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await,
            Err(DatabaseError::TeamAlreadyExists(_))
        ));

        assert_eq!(db.teams_all().await?.len(), 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);
        assert!(matches!(
            db.teams_get_expect("backend").await,
            Err(DatabaseError::UnknownTeam(_))
        ));
        assert!(matches!(
            db.teams_get_from_id_expect(1).await,
            Err(DatabaseError::UnknownTeamId(1))
        ));

        let team = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;

        assert_eq!(db.teams_get("backend").await?, Some(team.clone()));
        assert_eq!(db.teams_get_from_id(team.id).await?, Some(team));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all() {
    db_test_case("team_all", |db| async move {
        let first = db
            .teams_create(Team {
                name: "backend".into(),
                ..Default::default()
            })
            .await?;
        let second = db
            .teams_create(Team {
                name: "frontend".into(),
                ..Default::default()
            })
            .await?;

        assert_eq!(db.teams_all().await?, vec![first, second]);

        Ok(())
    })
    .await;
}
