//! Manual smoke test of the mutation catalog against a real repository.
//!
//! # Usage
//!
//! 1. Set `GITHUB_TOKEN` (and optionally `GITHUB_HOST`, `BOT_LOGIN`,
//!    `BOT_LEGACY_MILESTONES`; see `repo_steward::config`).
//!
//! 2. Set `TEST_REPO` to a scratch repository (`owner/repo`).
//!
//! 3. Set `TEST_ISSUE_ID` to the node ID of an open issue in it, and
//!    `TEST_SHA` to a commit SHA on it.
//!
//! 4. Optionally set `TEST_REPO_ID` to the repository's node ID. Check runs
//!    need it, and also need a GitHub App installation token.
//!
//! 5. Set `ENABLE_MUTATIONS=1` and run
//!    `cargo run --example live_smoke_test`.
//!
//! # Note
//!
//! Every operation here writes to the repository. Fire-and-log operations
//! return nothing, so they are reported as `[SENT]`; check the log output
//! for `Mutation failed` lines.

use std::env;

use repo_steward::config::BotConfig;
use repo_steward::mutations::{report_check_run, report_comment};
use repo_steward::policy::{CheckRunCompletion, NewCheckRun};
use repo_steward::types::{CheckConclusion, CommitState, NodeId, RepoId, Sha};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repo_steward=debug".into()),
        )
        .init();

    let config = BotConfig::from_env()?;

    let test_repo = env::var("TEST_REPO").map_err(|_| {
        anyhow::anyhow!("TEST_REPO environment variable not set (e.g., owner/repo)")
    })?;
    let repo = RepoId::parse_full_name(&test_repo)
        .ok_or_else(|| anyhow::anyhow!("TEST_REPO must be in owner/repo format"))?;
    let issue = NodeId::new(
        env::var("TEST_ISSUE_ID")
            .map_err(|_| anyhow::anyhow!("TEST_ISSUE_ID environment variable not set"))?,
    );
    let sha = Sha::new(
        env::var("TEST_SHA").map_err(|_| anyhow::anyhow!("TEST_SHA environment variable not set"))?,
    );
    let repo_node: Option<NodeId> = env::var("TEST_REPO_ID").ok().map(NodeId::new);

    if env::var("ENABLE_MUTATIONS").is_err() {
        anyhow::bail!("ENABLE_MUTATIONS not set; refusing to write to {}", repo);
    }

    let bot = config.connect()?;

    println!("\n=== Mutation Smoke Test ===\n");
    println!("Host:       {}", bot.info().host);
    println!("Repository: {}", repo);
    println!("Issue:      {}", issue);
    println!("Commit:     {}", sha.short());
    println!();

    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    // ─── Comments ────────────────────────────────────────────────────────────

    println!("--- Comments ---");

    let comment = bot
        .post_comment(&issue, "Smoke test comment from repo-steward.")
        .await;
    println!("  {}", report_comment(&comment));
    match comment {
        Ok(_) => {
            println!("  [PASS] PostComment");
            passed += 1;
        }
        Err(e) => {
            println!("  [FAIL] PostComment: {}", e);
            failed += 1;
        }
    }

    // ─── Check Runs ──────────────────────────────────────────────────────────

    println!("\n--- Check Runs ---");

    if let Some(repo_node) = repo_node {
        let new = NewCheckRun::new(
            repo_node,
            sha.clone(),
            "repo-steward smoke test",
            "Smoke test",
            "Running",
            format!("https://{}/{}", bot.info().host, repo.full_name()),
        );
        let created = bot.start_check_run(new).await;
        println!("  {}", report_check_run(&created));
        match created {
            Ok(check_run) => {
                println!("  [PASS] CreateCheckRun");
                passed += 1;
                bot.update_check_run(
                    &check_run,
                    CheckRunCompletion::new(CheckConclusion::Neutral, "Smoke test", "Done"),
                )
                .await;
                println!("  [SENT] UpdateCheckRun");
            }
            Err(e) => {
                println!("  [FAIL] CreateCheckRun: {}", e);
                println!("  [SKIP] UpdateCheckRun (no check run)");
                failed += 1;
                skipped += 1;
            }
        }
    } else {
        println!("  [SKIP] CreateCheckRun (no TEST_REPO_ID set)");
        println!("  [SKIP] UpdateCheckRun (no TEST_REPO_ID set)");
        skipped += 2;
    }

    // ─── REST Fallbacks ──────────────────────────────────────────────────────

    println!("\n--- REST Fallbacks ---");

    bot.send_status_check(
        &repo,
        &sha,
        CommitState::Success,
        &format!("https://{}/{}", bot.info().host, repo.full_name()),
        "repo-steward/smoke-test",
        "Smoke test status",
    )
    .await;
    println!("  [SENT] SendStatusCheck");

    // ─── Summary ─────────────────────────────────────────────────────────────

    println!("\n=== Summary ===\n");
    println!("Passed:  {}", passed);
    println!("Failed:  {}", failed);
    println!("Skipped: {}", skipped);

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
