//! Pull request commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod create;
mod merge;
mod reroll;

use self::{
    create::PullRequestCreateCommand, merge::PullRequestMergeCommand,
    reroll::PullRequestRerollCommand,
};

/// Manage pull requests
#[derive(Parser)]
pub(crate) struct PullRequestCommand {
    #[clap(subcommand)]
    inner: PullRequestSubCommand,
}

#[async_trait]
impl Command for PullRequestCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum PullRequestSubCommand {
    Create(PullRequestCreateCommand),
    Merge(PullRequestMergeCommand),
    Reroll(PullRequestRerollCommand),
}

#[async_trait]
impl Command for PullRequestSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Create(sub) => sub.execute(ctx).await,
            Self::Merge(sub) => sub.execute(ctx).await,
            Self::Reroll(sub) => sub.execute(ctx).await,
        }
    }
}
