use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::CreateTeamInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Create a team
#[derive(Parser)]
pub(crate) struct TeamCreateCommand {
    /// Team name, unique
    name: String,
}

#[async_trait]
impl Command for TeamCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
        let team = create_team.run(&ctx.as_core_context(), &self.name).await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with id {}.",
            team.name,
            team.id
        )?;

        Ok(())
    }
}
