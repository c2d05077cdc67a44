//! Gmail API client behind a small trait so the counter can be tested
//! without the network

use async_trait::async_trait;
use google_gmail1::api::Message;
use tracing::debug;

use crate::auth::GmailHub;
use crate::error::{JobMailError, Result};
use crate::models::{MessageMetadata, MessagePage, MessageRef};

/// Page size for message listings; Gmail caps this at 500
const MAX_RESULTS_PER_PAGE: u32 = 500;

const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// The two remote operations the counter consumes
///
/// Production talks to Gmail; tests supply scripted pages and metadata.
#[async_trait]
pub trait MailSearchClient: Send + Sync {
    /// List one page of message refs matching a query. Pass the previous
    /// page's continuation token to advance; `None` starts from the top.
    async fn list_messages_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<MessagePage>;

    /// Fetch minimal metadata (thread id plus Subject) for one message
    async fn get_message_metadata(&self, id: &str) -> Result<MessageMetadata>;
}

/// Production client over the Gmail API hub
pub struct GmailSearchClient {
    hub: GmailHub,
}

impl GmailSearchClient {
    pub fn new(hub: GmailHub) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl MailSearchClient for GmailSearchClient {
    async fn list_messages_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<MessagePage> {
        let mut call = self
            .hub
            .users()
            .messages_list("me")
            .q(query)
            .max_results(MAX_RESULTS_PER_PAGE);

        if let Some(token) = page_token {
            call = call.page_token(token);
        }

        let (_, response) = call.add_scope(READONLY_SCOPE).doit().await?;

        let refs = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|msg| {
                msg.id.map(|id| MessageRef {
                    id,
                    thread_id: msg.thread_id,
                })
            })
            .collect::<Vec<_>>();

        debug!(page_size = refs.len(), "Fetched listing page");

        Ok(MessagePage {
            refs,
            next_page_token: response.next_page_token,
        })
    }

    async fn get_message_metadata(&self, id: &str) -> Result<MessageMetadata> {
        let (_, msg) = self
            .hub
            .users()
            .messages_get("me", id)
            .format("metadata")
            .add_metadata_headers("Subject")
            .add_scope(READONLY_SCOPE)
            .doit()
            .await?;

        parse_message_metadata(msg)
    }
}

/// Parse a Gmail API Message into our MessageMetadata structure
fn parse_message_metadata(msg: Message) -> Result<MessageMetadata> {
    let id = msg
        .id
        .ok_or_else(|| JobMailError::InvalidMessageFormat("Missing message ID".to_string()))?;

    let thread_id = msg
        .thread_id
        .ok_or_else(|| JobMailError::InvalidMessageFormat("Missing thread ID".to_string()))?;

    let subject = msg
        .payload
        .as_ref()
        .and_then(|p| p.headers.as_ref())
        .and_then(|headers| {
            headers.iter().find_map(|h| match (&h.name, &h.value) {
                (Some(name), Some(value)) if name.eq_ignore_ascii_case("subject") => {
                    Some(value.clone())
                }
                _ => None,
            })
        });

    Ok(MessageMetadata {
        id,
        thread_id,
        subject,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_gmail1::api::{MessagePart, MessagePartHeader};

    fn header(name: &str, value: &str) -> MessagePartHeader {
        MessagePartHeader {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_parse_message_metadata() {
        let msg = Message {
            id: Some("m1".to_string()),
            thread_id: Some("t1".to_string()),
            payload: Some(MessagePart {
                headers: Some(vec![
                    header("Subject", "Thanks for applying"),
                    header("From", "jobs@example.com"),
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let meta = parse_message_metadata(msg).unwrap();
        assert_eq!(meta.id, "m1");
        assert_eq!(meta.thread_id, "t1");
        assert_eq!(meta.subject.as_deref(), Some("Thanks for applying"));
    }

    #[test]
    fn test_parse_message_metadata_subject_case_insensitive() {
        let msg = Message {
            id: Some("m1".to_string()),
            thread_id: Some("t1".to_string()),
            payload: Some(MessagePart {
                headers: Some(vec![header("subject", "Application received")]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let meta = parse_message_metadata(msg).unwrap();
        assert_eq!(meta.subject.as_deref(), Some("Application received"));
    }

    #[test]
    fn test_parse_message_metadata_no_headers() {
        let msg = Message {
            id: Some("m1".to_string()),
            thread_id: Some("t1".to_string()),
            ..Default::default()
        };

        let meta = parse_message_metadata(msg).unwrap();
        assert_eq!(meta.subject, None);
    }

    #[test]
    fn test_parse_message_metadata_missing_thread_id() {
        let msg = Message {
            id: Some("m1".to_string()),
            ..Default::default()
        };

        let err = parse_message_metadata(msg).unwrap_err();
        assert!(matches!(err, JobMailError::InvalidMessageFormat(_)));
    }

    #[test]
    fn test_parse_message_metadata_missing_id() {
        let err = parse_message_metadata(Message::default()).unwrap_err();
        assert!(matches!(err, JobMailError::InvalidMessageFormat(_)));
    }
}
