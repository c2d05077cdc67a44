use serde::{Deserialize, Serialize};

/// One mail account to process
///
/// The label keys this account's token cache (`token_<label>.json`); the
/// display name and email are used for reporting only. Accounts are supplied
/// by configuration, never hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub label: String,
    pub display_name: String,
    pub email: String,
}

/// One entry of a paginated message listing
///
/// The listing may or may not include the thread id; the counter always
/// resolves threads through a metadata fetch, so it is optional here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub id: String,
    pub thread_id: Option<String>,
}

/// One page of a message listing, with the continuation token for the next
/// page (absent on the last page)
#[derive(Debug, Clone, Default)]
pub struct MessagePage {
    pub refs: Vec<MessageRef>,
    pub next_page_token: Option<String>,
}

/// Minimal per-message metadata (headers limited to Subject)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub id: String,
    pub thread_id: String,
    pub subject: Option<String>,
}

/// Per-account counting result
///
/// `unique_threads <= total_emails` always holds: every counted message
/// belongs to exactly one thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStats {
    pub total_emails: usize,
    pub unique_threads: usize,
}

/// Sum of per-account stats across the run
///
/// Thread ids are NOT deduplicated across accounts: `unique_threads` is the
/// sum of each account's distinct count, not a global distinct count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedReport {
    pub total_emails: usize,
    pub unique_threads: usize,
    pub accounts_processed: usize,
}

impl CombinedReport {
    pub fn add(&mut self, stats: &AccountStats) {
        self.total_emails += stats.total_emails;
        self.unique_threads += stats.unique_threads;
        self.accounts_processed += 1;
    }
}
