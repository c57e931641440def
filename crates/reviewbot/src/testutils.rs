use std::{io::Write, sync::Arc};

use clap::Parser;
use reviewbot_config::Config;
use reviewbot_core::{CoreModule, ReviewerRng};
use reviewbot_database_interface::DbService;
use reviewbot_database_memory::MemoryDb;
use reviewbot_lock_interface::MockLockService;
use reviewbot_models::{Team, User};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
    Result,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
    pub lock_service: MockLockService,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let mut config = Config::from_env_no_version().unwrap();
        config.random_seed = 1;

        Self {
            config,
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
            lock_service: MockLockService::new(),
        }
    }

    /// Create a team and one user per name, in order.
    pub async fn seed_team(&self, team_name: &str, user_names: &[&str]) -> (Team, Vec<User>) {
        let team = self
            .db_service
            .teams_create(Team {
                name: team_name.into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut users = vec![];
        for name in user_names {
            users.push(
                self.db_service
                    .users_create(
                        User {
                            name: (*name).into(),
                            ..Default::default()
                        }
                        .with_team(&team),
                    )
                    .await
                    .unwrap(),
            );
        }

        (team, users)
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            rng: ReviewerRng::from_seed(self.config.random_seed),
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            lock_service: Box::new(self.lock_service),
            writer,
        }
    }
}

pub(crate) async fn try_command(ctx: CommandContextTest, command_args: &[&str]) -> Result<String> {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["bot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = match Args::try_parse_from(command_args) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        };

        CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await?;
    }

    let vec = buf.read().await.to_vec();
    Ok(std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    try_command(ctx, command_args).await.unwrap()
}
