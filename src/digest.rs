//! Digest history component and preview cards.
//!
//! Fetches past weekly digests from a fixed endpoint and renders summary
//! cards: week label, item count, sent date, recipient.

use serde::Serialize;
use serde_json::Value;

use crate::client::{WatchtowerClient, DEFAULT_LIMIT};
use crate::fetch::{FetchSlot, FetchState};
use crate::types::Digest;
use crate::util::{long_date, parse_iso_date, short_date};

/// Placeholder cards shown while a response is in flight.
pub const SKELETON_CARDS: usize = 6;

/// Placeholder for an absent sent date.
const NO_DATE: &str = "—";

/// The digest history list: one fetch lifecycle plus the view built from it.
///
/// Unlike the intel feed this component has no inputs; it always fetches the
/// same endpoint with the default limit.
pub struct DigestHistory {
    client: WatchtowerClient,
    slot: FetchSlot<Vec<Digest>>,
}

impl DigestHistory {
    pub fn new(client: WatchtowerClient) -> Self {
        Self {
            client,
            slot: FetchSlot::new(),
        }
    }

    /// Issue a fetch and wait for it to settle. Generation-guarded like the
    /// intel feed, so a detach while in flight discards the result.
    pub async fn refresh(&self) {
        let generation = self.slot.begin();
        match self.client.digest_history(DEFAULT_LIMIT).await {
            Ok(digests) => {
                log::debug!("Digest history resolved with {} records", digests.len());
                self.slot.resolve(generation, Ok(digests));
            }
            Err(err) => {
                log::warn!("Digest history fetch failed ({}): {}", err.class(), err);
                self.slot.resolve(generation, Err(err.to_string()));
            }
        }
    }

    /// Detach on unmount; any in-flight result is discarded.
    pub fn detach(&self) {
        self.slot.invalidate();
    }

    /// Current view state.
    pub fn view(&self) -> DigestHistoryView {
        match self.slot.snapshot() {
            FetchState::Idle | FetchState::Loading { .. } => DigestHistoryView::Loading {
                skeletons: SKELETON_CARDS,
            },
            FetchState::Error(message) => DigestHistoryView::Error {
                message,
                base_url: self.client.base_url().to_string(),
            },
            FetchState::Success(digests) if digests.is_empty() => DigestHistoryView::Empty {
                headline: "No digests yet".to_string(),
                help: "Digests are sent every Monday via POST /digest/send".to_string(),
            },
            FetchState::Success(digests) => DigestHistoryView::Cards {
                cards: digests.iter().map(digest_card).collect(),
            },
        }
    }
}

/// Visible state of the digest history list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DigestHistoryView {
    Loading { skeletons: usize },
    Error { message: String, base_url: String },
    Empty { headline: String, help: String },
    Cards { cards: Vec<DigestCard> },
}

/// One rendered digest preview card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestCard {
    /// "Week of Mar 4, 2024", or "Unknown week" when the date is absent.
    pub week_label: String,
    /// Long-form sent date, or a placeholder when absent.
    pub sent_date: String,
    /// Shown only when the digest records a recipient.
    pub recipient: Option<String>,
    /// "N intel item(s) included".
    pub items_line: String,
}

/// Build the preview card for one digest record.
pub fn digest_card(digest: &Digest) -> DigestCard {
    let total = total_items(&digest.content);
    DigestCard {
        week_label: week_label(digest.week_of.as_deref()),
        sent_date: sent_date_label(digest.sent_at.as_deref()),
        recipient: digest.recipient.clone().filter(|r| !r.is_empty()),
        items_line: format!(
            "{} intel item{} included",
            total,
            if total == 1 { "" } else { "s" }
        ),
    }
}

/// Week label for a digest: "Week of Mar 4, 2024".
pub fn week_label(week_of: Option<&str>) -> String {
    week_of
        .and_then(parse_iso_date)
        .map(|d| format!("Week of {}", short_date(d)))
        .unwrap_or_else(|| "Unknown week".to_string())
}

/// Long-form sent date: "Monday, March 4, 2024".
pub fn sent_date_label(sent_at: Option<&str>) -> String {
    sent_at
        .and_then(parse_iso_date)
        .map(long_date)
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// Total item count carried by a digest body.
///
/// Prefers an explicit numeric `total_items`; otherwise sums the lengths of
/// the arrays inside `grouped`; absent both, 0.
pub fn total_items(content: &Value) -> usize {
    if let Some(total) = content.get("total_items").and_then(Value::as_u64) {
        return total as usize;
    }
    if let Some(grouped) = content.get("grouped").and_then(Value::as_object) {
        return grouped
            .values()
            .map(|v| v.as_array().map_or(0, Vec::len))
            .sum();
    }
    0
}
