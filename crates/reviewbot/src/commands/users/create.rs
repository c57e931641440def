use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::users::CreateUserInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Create a user in a team
#[derive(Parser)]
pub(crate) struct UserCreateCommand {
    /// User name
    name: String,
    /// Team ID
    team_id: u64,
}

#[async_trait]
impl Command for UserCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_user: &dyn CreateUserInterface = ctx.core_module.resolve_ref();
        let user = create_user
            .run(&ctx.as_core_context(), &self.name, self.team_id)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "User '{}' created with id {} in team #{}.",
            user.name,
            user.id,
            user.team_id
        )?;

        Ok(())
    }
}
