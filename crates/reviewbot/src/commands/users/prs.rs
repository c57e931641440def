use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::ListReviewerPullRequestsInterface;
use shaku::HasComponent;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// List pull requests a user reviews
#[derive(Parser)]
pub(crate) struct UserPullRequestsCommand {
    /// User ID
    user_id: u64,
}

#[async_trait]
impl Command for UserPullRequestsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list: &dyn ListReviewerPullRequestsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list.run(&ctx.as_core_context(), self.user_id).await?;

        if pull_requests.is_empty() {
            writeln!(
                ctx.writer.write().await,
                "No pull request for reviewer #{}.",
                self.user_id
            )?;
        } else {
            for pr in pull_requests {
                writeln!(
                    ctx.writer.write().await,
                    "#{} [{}] {} (author #{}, reviewers {})",
                    pr.id,
                    pr.status,
                    pr.title,
                    pr.author_id,
                    format_reviewers(&pr.reviewer_ids)
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use reviewbot_database_interface::DbService;
    use reviewbot_models::{PullRequest, PullRequestStatus};

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        let (_, users) = ctx.seed_team("backend", &["alice", "bob", "carol"]).await;
        ctx.db_service
            .pull_requests_create(
                PullRequest {
                    title: "Add cache".into(),
                    status: PullRequestStatus::Merged,
                    ..Default::default()
                }
                .with_author(&users[0])
                .with_reviewers(&users[1..]),
            )
            .await?;

        assert_eq!(
            test_command(ctx, &["users", "prs", "2"]).await,
            "#1 [MERGED] Add cache (author #1, reviewers [2, 3])\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_unknown_user() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["users", "prs", "9"]).await,
            "No pull request for reviewer #9.\n"
        );

        Ok(())
    }
}
