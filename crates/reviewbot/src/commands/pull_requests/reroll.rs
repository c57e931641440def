use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::RerollReviewerInterface;
use shaku::HasComponent;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// Replace one reviewer of an open pull request
#[derive(Parser)]
pub(crate) struct PullRequestRerollCommand {
    /// Pull request ID
    pull_request_id: u64,
    /// Reviewer to replace
    old_reviewer_id: u64,
}

#[async_trait]
impl Command for PullRequestRerollCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reroll: &dyn RerollReviewerInterface = ctx.core_module.resolve_ref();
        let pr = reroll
            .run(
                &ctx.as_core_context(),
                self.pull_request_id,
                self.old_reviewer_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer #{} replaced, pull request #{} now has reviewers {}.",
            self.old_reviewer_id,
            pr.id,
            format_reviewers(&pr.reviewer_ids)
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use reviewbot_database_interface::DbService;
    use reviewbot_models::PullRequest;

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        let (_, users) = ctx
            .seed_team("backend", &["alice", "bob", "carol", "dave"])
            .await;
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    title: "Add cache".into(),
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&users[1..3]),
            )
            .await?;

        assert_eq!(
            test_command(ctx, &["pull-requests", "reroll", "1", "2"]).await,
            "Reviewer #2 replaced, pull request #1 now has reviewers [4, 3].\n"
        );

        Ok(())
    }
}
