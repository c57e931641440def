use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::stats::GetReviewerStatsInterface;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Show how many pull requests each reviewer is assigned to
#[derive(Parser)]
pub(crate) struct StatsCommand;

#[async_trait]
impl Command for StatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_stats: &dyn GetReviewerStatsInterface = ctx.core_module.resolve_ref();
        let stats = get_stats.run(&ctx.as_core_context()).await?;

        if stats.is_empty() {
            writeln!(ctx.writer.write().await, "No reviewer assignment.")?;
        } else {
            for entry in stats {
                writeln!(
                    ctx.writer.write().await,
                    "User #{}: {} pull request(s)",
                    entry.user_id,
                    entry.count
                )?;
            }
        }

        Ok(())
    }
}
