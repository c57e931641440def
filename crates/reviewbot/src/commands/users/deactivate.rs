use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::users::DeactivateUserInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Deactivate a user and reassign their open reviews
#[derive(Parser)]
pub(crate) struct UserDeactivateCommand {
    /// User ID
    user_id: u64,
}

#[async_trait]
impl Command for UserDeactivateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let deactivate_user: &dyn DeactivateUserInterface = ctx.core_module.resolve_ref();
        let user = deactivate_user
            .run(&ctx.as_core_context(), self.user_id)
            .await?;

        writeln!(ctx.writer.write().await, "User #{} deactivated.", user.id)?;

        Ok(())
    }
}
