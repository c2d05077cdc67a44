//! Job Application Email Counter
//!
//! Counts job-application-related emails and approximate distinct
//! application threads across multiple Gmail accounts. Per account the flow
//! is: authenticate (per-account token cache), build a date/keyword search
//! query, paginate matching message ids, fetch each message's thread id,
//! and tally totals plus distinct threads. An outer driver sums the
//! per-account stats into a combined report; threads are never merged
//! across accounts.
//!
//! # Example Usage
//!
//! ```no_run
//! use jobmail_counter::{config::Config, runner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml".as_ref()).await?;
//!     let report = runner::run(&config).await?;
//!     println!("{} emails, {} threads", report.total_emails, report.unique_threads);
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 credential management, one token cache per account
//! - [`client`] - Gmail API client behind the [`client::MailSearchClient`] seam
//! - [`config`] - TOML configuration (accounts, query window, execution policy)
//! - [`counter`] - Pagination and thread counting
//! - [`error`] - Error types and result alias
//! - [`models`] - Core data structures
//! - [`query`] - Gmail search query construction
//! - [`runner`] - Per-account driver and console reporting

pub mod auth;
pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod models;
pub mod query;
pub mod runner;

// Re-export commonly used types for convenience
pub use error::{JobMailError, Result};

pub use models::{Account, AccountStats, CombinedReport, MessageMetadata, MessagePage, MessageRef};

pub use client::{GmailSearchClient, MailSearchClient};

pub use config::{AuthConfig, Config, ExecutionConfig, WindowConfig};

pub use query::{build_job_query, build_job_query_at, SearchQuery};
