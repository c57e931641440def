//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use reviewbot_config::Config;
use reviewbot_core::{CoreContext, CoreModule, ReviewerRng};
use reviewbot_database_interface::DbService;
use reviewbot_lock_interface::LockService;
use tokio::sync::RwLock;

use self::{
    pull_requests::PullRequestCommand, server::ServerCommand, stats::StatsCommand,
    teams::TeamCommand, users::UserCommand,
};
use crate::Result;

mod pull_requests;
mod server;
mod stats;
mod teams;
mod users;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService>,
    pub lock_service: Box<dyn LockService>,
    pub core_module: CoreModule,
    pub rng: ReviewerRng,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            lock_service: self.lock_service.as_ref(),
            rng: &self.rng,
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Teams(TeamCommand),
    Users(UserCommand),
    PullRequests(PullRequestCommand),
    Stats(StatsCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Teams(sub) => sub.execute(ctx).await,
            Self::Users(sub) => sub.execute(ctx).await,
            Self::PullRequests(sub) => sub.execute(ctx).await,
            Self::Stats(sub) => sub.execute(ctx).await,
        }
    }
}

/// Render reviewer ids as `[2, 3]`.
pub(crate) fn format_reviewers(reviewer_ids: &[u64]) -> String {
    format!("{:?}", reviewer_ids)
}
