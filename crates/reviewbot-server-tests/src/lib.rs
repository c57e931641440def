#![cfg(test)]

use std::{collections::HashSet, time::Duration};

use futures::future::join_all;

use pretty_assertions::assert_eq;
use reviewbot_config::Config;
use reviewbot_core::{
    use_cases::pulls::{MockRerollReviewerInterface, RerollReviewerInterface},
    CoreModule, DomainError,
};
use reviewbot_database_interface::DbService;
use reviewbot_database_tests::db_test_case;
use reviewbot_lock_memory::MemoryLockService;
use reviewbot_models::{PullRequest, Team, User};
use reviewbot_server::server::{run_bot_server, AppContext};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

fn build_context(port: u16, core_module: CoreModule, db_service: Box<dyn DbService>) -> AppContext {
    let mut config = Config::from_env_no_version().unwrap();
    config.server.workers_count = Some(2);
    config.server.bind_ip = "127.0.0.1".into();
    config.server.bind_port = port;
    config.random_seed = 1;

    AppContext::new_with_adapters(
        config,
        core_module,
        db_service,
        Box::new(MemoryLockService::new()),
    )
}

async fn spawn_server(port: u16, core_module: CoreModule, db_service: Box<dyn DbService>) {
    tokio::task::spawn_local(async move {
        let context = build_context(port, core_module, db_service);
        run_bot_server(context).await
    });

    // Let the server bind before the first request.
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::test]
#[ignore]
async fn index() {
    const PORT: u16 = 50601;

    #[derive(Deserialize, Debug, PartialEq, Eq)]
    struct Response {
        message: String,
    }

    db_test_case("server_tests_index", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                spawn_server(PORT, CoreModule::builder().build(), db_service).await;

                let response = reqwest::get(format!("http://127.0.0.1:{PORT}"))
                    .await
                    .unwrap();
                let text: Response = response.json().await.unwrap();

                assert_eq!(
                    text,
                    Response {
                        message: "Welcome on reviewbot!".into()
                    }
                );
            })
            .await;

        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn metrics() {
    const PORT: u16 = 50602;

    db_test_case("server_tests_metrics", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                spawn_server(PORT, CoreModule::builder().build(), db_service).await;

                let response = reqwest::get(format!("http://127.0.0.1:{PORT}/metrics"))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK);

                let body = response.text().await.unwrap();
                assert!(body.contains("pull_requests_created"));
            })
            .await;

        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn team_deactivation() {
    const PORT: u16 = 50603;

    db_test_case("server_tests_team_deactivation", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                spawn_server(PORT, CoreModule::builder().build(), db_service).await;
                let client = reqwest::Client::new();
                let base = format!("http://127.0.0.1:{PORT}/api/v1");

                let team: Team = client
                    .post(format!("{base}/teams"))
                    .json(&json!({"name": "platform"}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();

                let response = client
                    .post(format!("{base}/teams"))
                    .json(&json!({"name": "platform"}))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::CONFLICT);

                let mut users = vec![];
                for name in ["ann", "ben"] {
                    let user: User = client
                        .post(format!("{base}/users"))
                        .json(&json!({"name": name, "team_id": team.id}))
                        .send()
                        .await
                        .unwrap()
                        .json()
                        .await
                        .unwrap();
                    users.push(user);
                }

                let pr: PullRequest = client
                    .post(format!("{base}/prs"))
                    .json(&json!({"title": "Bump deps", "author_id": users[0].id}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                assert_eq!(pr.reviewer_ids, vec![users[1].id]);

                let response = client
                    .post(format!("{base}/teams/{}/deactivate", team.id))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::NO_CONTENT);

                let prs: Vec<PullRequest> = client
                    .get(format!("{base}/users/{}/prs", users[1].id))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                assert_eq!(prs, Vec::<PullRequest>::new());

                // Nobody left to review: the pull request opens without reviewers.
                let response = client
                    .post(format!("{base}/prs"))
                    .json(&json!({"title": "Another", "author_id": users[0].id}))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::CREATED);
                let pr: PullRequest = response.json().await.unwrap();
                assert_eq!(pr.reviewer_ids, Vec::<u64>::new());
            })
            .await;

        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn reroll_errors() {
    const PORT: u16 = 50604;

    db_test_case("server_tests_reroll_errors", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                let mut reroll = MockRerollReviewerInterface::new();
                reroll
                    .expect_run()
                    .once()
                    .withf(|_, pull_request_id, old_reviewer_id| {
                        *pull_request_id == 12 && *old_reviewer_id == 3
                    })
                    .returning(|_, pull_request_id, user_id| {
                        Err(DomainError::NotAssignedReviewer {
                            pull_request_id,
                            user_id,
                        })
                    });

                let core_module = CoreModule::builder()
                    .with_component_override::<dyn RerollReviewerInterface>(Box::new(reroll))
                    .build();
                spawn_server(PORT, core_module, db_service).await;

                let client = reqwest::Client::new();
                let response = client
                    .post(format!("http://127.0.0.1:{PORT}/api/v1/prs/12/reroll"))
                    .json(&json!({"old_reviewer_id": 3}))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

                let response = client
                    .post(format!("http://127.0.0.1:{PORT}/api/v1/prs/12/reroll"))
                    .json(&json!({}))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            })
            .await;

        Ok(())
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn concurrent_creates() {
    const PORT: u16 = 50605;
    const COUNT: usize = 24;

    #[derive(Deserialize, Debug)]
    struct TeamResponse {
        members: Vec<User>,
    }

    db_test_case("server_tests_concurrent_creates", |db_service| async move {
        let local_set = tokio::task::LocalSet::new();
        local_set
            .run_until(async move {
                spawn_server(PORT, CoreModule::builder().build(), db_service).await;
                let client = reqwest::Client::new();
                let base = format!("http://127.0.0.1:{PORT}/api/v1");

                let team: Team = client
                    .post(format!("{base}/teams"))
                    .json(&json!({"name": "crowd"}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                let author: User = client
                    .post(format!("{base}/users"))
                    .json(&json!({"name": "author", "team_id": team.id}))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();

                let users = join_all((0..COUNT).map(|i| {
                    client
                        .post(format!("{base}/users"))
                        .json(&json!({"name": format!("user-{i}"), "team_id": team.id}))
                        .send()
                }))
                .await;
                let mut user_ids = HashSet::new();
                for response in users {
                    let response = response.unwrap();
                    assert_eq!(response.status(), StatusCode::CREATED);
                    let user: User = response.json().await.unwrap();
                    user_ids.insert(user.id);
                }
                assert_eq!(user_ids.len(), COUNT);

                let pulls = join_all((0..COUNT).map(|i| {
                    client
                        .post(format!("{base}/prs"))
                        .json(&json!({"title": format!("pr-{i}"), "author_id": author.id}))
                        .send()
                }))
                .await;
                let mut created = vec![];
                for response in pulls {
                    let response = response.unwrap();
                    assert_eq!(response.status(), StatusCode::CREATED);
                    let pr: PullRequest = response.json().await.unwrap();
                    created.push(pr);
                }
                let pr_ids: HashSet<u64> = created.iter().map(|pr| pr.id).collect();
                assert_eq!(pr_ids.len(), COUNT);

                let found: TeamResponse = client
                    .get(format!("{base}/teams/crowd"))
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                assert_eq!(found.members.len(), COUNT + 1);

                // Each stored pull request still carries its own title.
                for pr in created {
                    let merged: PullRequest = client
                        .post(format!("{base}/prs/{}/merge", pr.id))
                        .send()
                        .await
                        .unwrap()
                        .json()
                        .await
                        .unwrap();
                    assert_eq!(merged.title, pr.title);
                }
            })
            .await;

        Ok(())
    })
    .await;
}
