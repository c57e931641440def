use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::MergePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Merge a pull request
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Pull request ID
    pull_request_id: u64,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let merge: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = merge
            .run(&ctx.as_core_context(), self.pull_request_id)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request #{} is {}.",
            pr.id,
            pr.status
        )?;

        Ok(())
    }
}
