//! Counts matching messages and approximates distinct applications by
//! counting distinct thread ids

use std::collections::HashSet;

use tracing::{debug, info};

use crate::client::MailSearchClient;
use crate::error::Result;
use crate::models::{AccountStats, MessageRef};
use crate::query::SearchQuery;

/// Count matching emails and distinct threads for one account
///
/// Two passes:
/// 1. Paginate the listing until the provider stops returning a
///    continuation token, accumulating every message ref. Pages are trusted
///    not to repeat items within one run.
/// 2. Fetch metadata for each ref sequentially and collect thread ids into
///    a set. One round trip per message; any single failure aborts this
///    account's count.
pub async fn count_matches<C>(client: &C, query: &SearchQuery) -> Result<AccountStats>
where
    C: MailSearchClient + ?Sized,
{
    let refs = list_all_messages(client, query).await?;
    let total_emails = refs.len();
    info!(total_emails, "Listing complete, resolving threads");

    let mut thread_ids: HashSet<String> = HashSet::new();
    for msg_ref in &refs {
        let meta = client.get_message_metadata(&msg_ref.id).await?;
        thread_ids.insert(meta.thread_id);
    }

    Ok(AccountStats {
        total_emails,
        unique_threads: thread_ids.len(),
    })
}

/// Paginate the full listing for a query
async fn list_all_messages<C>(client: &C, query: &SearchQuery) -> Result<Vec<MessageRef>>
where
    C: MailSearchClient + ?Sized,
{
    let mut refs = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = client
            .list_messages_page(query.as_str(), page_token.as_deref())
            .await?;
        debug!(page_size = page.refs.len(), "Accumulated listing page");
        refs.extend(page.refs);

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    Ok(refs)
}
