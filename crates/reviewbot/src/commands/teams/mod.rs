//! Team commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod create;
mod deactivate;
mod show;

use self::{
    create::TeamCreateCommand, deactivate::TeamDeactivateCommand, show::TeamShowCommand,
};

/// Manage teams
#[derive(Parser)]
pub(crate) struct TeamCommand {
    #[clap(subcommand)]
    inner: TeamSubCommand,
}

#[async_trait]
impl Command for TeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum TeamSubCommand {
    Create(TeamCreateCommand),
    Show(TeamShowCommand),
    Deactivate(TeamDeactivateCommand),
}

#[async_trait]
impl Command for TeamSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Create(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Deactivate(sub) => sub.execute(ctx).await,
        }
    }
}
