use std::sync::Arc;

use clap::Parser;
use reviewbot_config::{Config, DatabaseDriver, LockDriver};
use reviewbot_core::{CoreModule, ReviewerRng};
use reviewbot_database_interface::DbService;
use reviewbot_database_memory::MemoryDb;
use reviewbot_database_pg::{establish_pool_connection, run_migrations, PostgresDb};
use reviewbot_lock_interface::LockService;
use reviewbot_lock_memory::MemoryLockService;
use reviewbot_lock_redis::RedisLockService;
use reviewbot_sentry::with_sentry_configuration;
use reviewbot_server::lock::MetricsLockService;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService> = {
                if config.database.driver == DatabaseDriver::Postgres {
                    info!("Using PostgresDb database driver");

                    let pool = establish_pool_connection(&config).await?;
                    run_migrations(&pool).await?;

                    Box::new(PostgresDb::new(pool))
                } else {
                    info!("Using MemoryDb database driver");
                    Box::new(MemoryDb::new())
                }
            };

            let lock_service: Box<dyn LockService> = {
                if config.lock.driver == LockDriver::Redis {
                    info!("Using RedisLockService lock driver");
                    Box::new(MetricsLockService::new(Box::new(RedisLockService::new(
                        &config.lock.redis.address,
                    )?)))
                } else {
                    info!("Using MemoryLockService lock driver");
                    Box::new(MemoryLockService::new())
                }
            };

            let ctx = CommandContext {
                rng: ReviewerRng::from_seed(config.random_seed),
                config: config.clone(),
                db_service,
                lock_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
