use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::GetTeamInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show a team and its members
#[derive(Parser)]
pub(crate) struct TeamShowCommand {
    /// Team name
    name: String,
}

#[async_trait]
impl Command for TeamShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
        let found = get_team.run(&ctx.as_core_context(), &self.name).await?;

        let members: Vec<String> = found
            .members
            .iter()
            .map(|u| {
                if u.is_active {
                    format!("{} (#{})", u.name, u.id)
                } else {
                    format!("{} (#{}, inactive)", u.name, u.id)
                }
            })
            .collect();

        writeln!(
            ctx.writer.write().await,
            "Team '{}' (#{}): {}",
            found.team.name,
            found.team.id,
            if members.is_empty() {
                "no member".to_string()
            } else {
                members.join(", ")
            }
        )?;

        Ok(())
    }
}
