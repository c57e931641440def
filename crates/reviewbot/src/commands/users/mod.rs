//! User commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod create;
mod deactivate;
mod prs;

use self::{
    create::UserCreateCommand, deactivate::UserDeactivateCommand, prs::UserPullRequestsCommand,
};

/// Manage users
#[derive(Parser)]
pub(crate) struct UserCommand {
    #[clap(subcommand)]
    inner: UserSubCommand,
}

#[async_trait]
impl Command for UserCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum UserSubCommand {
    Create(UserCreateCommand),
    Deactivate(UserDeactivateCommand),
    Prs(UserPullRequestsCommand),
}

#[async_trait]
impl Command for UserSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Create(sub) => sub.execute(ctx).await,
            Self::Deactivate(sub) => sub.execute(ctx).await,
            Self::Prs(sub) => sub.execute(ctx).await,
        }
    }
}
