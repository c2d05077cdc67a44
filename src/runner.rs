//! Drives the per-account pipeline and prints the human-readable report

use tracing::{error, info};

use crate::auth;
use crate::client::GmailSearchClient;
use crate::config::Config;
use crate::counter;
use crate::error::{JobMailError, Result};
use crate::models::{Account, AccountStats, CombinedReport};
use crate::query::{build_job_query, SearchQuery};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Process every configured account in order and return the combined report
///
/// Per account: acquire a session, count matches, print the stats. On
/// failure the run aborts unless `execution.continue_on_error` is set, in
/// which case the account is skipped and the rest proceed. The combined
/// totals are plain sums; threads are never merged across accounts.
pub async fn run(config: &Config) -> Result<CombinedReport> {
    if config.accounts.is_empty() {
        return Err(JobMailError::ConfigError(
            "no accounts configured; add [[accounts]] entries to the config file".to_string(),
        ));
    }

    let query = build_job_query(
        config.window.days_back,
        config.window.start_date.as_deref(),
    )?;

    println!("{}", RULE);
    println!("Job Application Email Counter (Gmail API)");
    println!("{}", RULE);
    println!("\nUsing Gmail search query:");
    println!("  {}\n", query);

    let mut combined = CombinedReport::default();
    let total = config.accounts.len();

    for (idx, account) in config.accounts.iter().enumerate() {
        println!("{}", THIN_RULE);
        println!(
            "[{}/{}] Processing account: {}",
            idx + 1,
            total,
            account.display_name
        );
        println!("Label      : {}", account.label);
        println!("Email note : {}", account.email);
        println!("{}", THIN_RULE);

        match process_account(account, &query, config).await {
            Ok(stats) => {
                println!("[{}] Done.", account.label);
                println!(
                    "[{}] Total matching emails      : {}",
                    account.label, stats.total_emails
                );
                println!(
                    "[{}] Approx. unique job threads : {}\n",
                    account.label, stats.unique_threads
                );
                combined.add(&stats);
            }
            Err(e) if config.execution.continue_on_error => {
                error!(account = %account.label, "Account failed, continuing: {}", e);
                println!("[{}] FAILED: {}\n", account.label, e);
            }
            Err(e) => return Err(e),
        }
    }

    print_combined(&combined, total);
    Ok(combined)
}

async fn process_account(
    account: &Account,
    query: &SearchQuery,
    config: &Config,
) -> Result<AccountStats> {
    info!(account = %account.label, "Acquiring session");
    let hub = auth::acquire_session(
        &account.label,
        &config.auth.credentials_path,
        &config.auth.token_dir,
    )
    .await?;

    let client = GmailSearchClient::new(hub);

    println!(
        "[{}] Fetching and counting job-related emails...",
        account.label
    );
    counter::count_matches(&client, query).await
}

fn print_combined(combined: &CombinedReport, total_accounts: usize) {
    println!("{}", RULE);
    println!(
        "Combined Summary ({}/{} accounts)",
        combined.accounts_processed, total_accounts
    );
    println!("{}", RULE);
    println!(
        "Total matching emails across accounts      : {}",
        combined.total_emails
    );
    println!(
        "Total approx. unique job threads (sum of each account): {}",
        combined.unique_threads
    );
    println!("{}", RULE);
    println!("Note: each account is counted separately; threads are not merged across accounts.");
    println!();
}
