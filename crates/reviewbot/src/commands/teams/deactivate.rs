use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::MassDeactivateTeamUsersInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Deactivate every member of a team and reassign their open reviews
#[derive(Parser)]
pub(crate) struct TeamDeactivateCommand {
    /// Team ID
    team_id: u64,
}

#[async_trait]
impl Command for TeamDeactivateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let mass_deactivate: &dyn MassDeactivateTeamUsersInterface = ctx.core_module.resolve_ref();
        let users = mass_deactivate
            .run(&ctx.as_core_context(), self.team_id)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Deactivated {} user(s) of team #{}.",
            users.len(),
            self.team_id
        )?;

        Ok(())
    }
}
