use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::CreatePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// Open a pull request and pick its reviewers
#[derive(Parser)]
pub(crate) struct PullRequestCreateCommand {
    /// Pull request title
    title: String,
    /// Author user ID
    author_id: u64,
}

#[async_trait]
impl Command for PullRequestCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = create
            .run(&ctx.as_core_context(), &self.title, self.author_id)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request #{} created with reviewers {}.",
            pr.id,
            format_reviewers(&pr.reviewer_ids)
        )?;

        Ok(())
    }
}
