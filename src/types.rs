//! Type definitions for outbound messages, per-item outcomes, and the
//! dispatch summary

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A name/value pair attached to an outbound message and forwarded to the
/// provider for downstream filtering and webhook correlation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One outbound email request.
///
/// Immutable once handed to the dispatcher: the dispatcher consumes the
/// item and threads its correlation fields through to the matching
/// [`SendOutcome`] unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Destination address(es)
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Rendered HTML body
    pub html_body: String,
    /// Template category, forwarded to the provider as a `category` tag
    pub category: String,
    /// Optional reply-to override
    pub reply_to: Option<String>,
    /// Free-form tags forwarded to the provider
    pub tags: Vec<Tag>,
    /// Caller-supplied identifier for correlating the outcome back to a
    /// business record (e.g. an invoice id)
    pub item_id: Option<String>,
}

impl OutboundEmail {
    /// Create a message to a single recipient.
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            html_body: html_body.into(),
            category: category.into(),
            reply_to: None,
            tags: Vec::new(),
            item_id: None,
        }
    }

    /// Add another recipient.
    #[must_use]
    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        self.to.push(to.into());
        self
    }

    /// Set the reply-to override.
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Attach a free-form tag.
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    /// Set the caller correlation identifier.
    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }
}

/// Provider acknowledgement for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier
    pub message_id: String,
    /// Name of the provider that accepted the message
    pub provider: &'static str,
}

/// Terminal state of one message after its retry loop settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendStatus {
    /// Accepted by the provider.
    Delivered {
        /// Provider-assigned message identifier
        message_id: String,
    },
    /// Every attempt failed; carries the last observed error.
    Failed { error: String },
}

/// Final result for one input message.
///
/// Produced exactly once per [`OutboundEmail`], after the message either
/// succeeded or exhausted its retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    /// Destination address(es), copied from the input item
    pub to: Vec<String>,
    /// Caller correlation identifier, threaded through unchanged
    pub item_id: Option<String>,
    /// Terminal delivery status
    pub status: SendStatus,
    /// Number of send attempts made (1 = succeeded or failed without retry)
    pub attempts: u32,
    /// When the retry loop for this message settled
    pub completed_at: DateTime<Utc>,
}

impl SendOutcome {
    /// Returns `true` if the message was accepted by the provider.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, SendStatus::Delivered { .. })
    }

    /// Provider message id, if the message was accepted.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        match &self.status {
            SendStatus::Delivered { message_id } => Some(message_id),
            SendStatus::Failed { .. } => None,
        }
    }

    /// Last observed error, if every attempt failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SendStatus::Delivered { .. } => None,
            SendStatus::Failed { error } => Some(error),
        }
    }
}

/// Identifier for a single dispatch call
///
/// A globally unique identifier (ULID) stamped on every dispatch so log
/// lines can be correlated with the returned summary. ULIDs are
/// lexicographically sortable by creation time and collision-resistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DispatchId(ulid::Ulid);

impl DispatchId {
    /// Generate a new unique dispatch id
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the underlying ULID
    #[must_use]
    pub const fn ulid(&self) -> ulid::Ulid {
        self.0
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Aggregated result of one dispatch call.
///
/// Created fresh per call; nothing is persisted across calls. The caller
/// owns durable logging of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    /// Identifier stamped on this dispatch call
    pub dispatch_id: DispatchId,
    /// Number of input items
    pub total: usize,
    /// Items accepted by the provider
    pub successful: usize,
    /// Items whose retries were exhausted
    pub failed: usize,
    /// Per-item outcomes, in per-group completion order (not input order;
    /// callers needing input order re-sort by their own `item_id`)
    pub results: Vec<SendOutcome>,
}

impl DispatchSummary {
    /// Aggregate per-item outcomes into a summary.
    ///
    /// Pure and idempotent: the same outcome set always yields the same
    /// counts, and `successful + failed == total == results.len()`.
    #[must_use]
    pub fn from_outcomes(dispatch_id: DispatchId, results: Vec<SendOutcome>) -> Self {
        let successful = results.iter().filter(|o| o.is_success()).count();
        Self {
            dispatch_id,
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }

    /// Returns `true` iff no item failed.
    #[must_use]
    pub const fn all_successful(&self) -> bool {
        self.failed == 0
    }
}
