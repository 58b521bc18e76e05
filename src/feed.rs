//! Intel feed component.
//!
//! Fetches intel items, optionally scoped to one competitor, and exposes the
//! skeleton/error/empty/card states the dashboard renders. Items keep the
//! backend's order. Any input change supersedes the in-flight fetch; a stale
//! response can never overwrite the state for newer inputs.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::client::{WatchtowerClient, DEFAULT_LIMIT};
use crate::fetch::{FetchSlot, FetchState};
use crate::threat::{badge_for, ThreatBadge};
use crate::types::IntelItem;
use crate::util::{parse_iso_date, short_date};

/// Placeholder cards shown while a response is in flight.
pub const SKELETON_CARDS: usize = 6;

/// Inputs that parameterize the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FeedInputs {
    limit: usize,
    competitor: Option<String>,
}

/// The intel feed: one fetch lifecycle plus the view built from it.
///
/// The slot is shared with spawned fetch tasks; the generation captured at
/// issue time decides whether a resolution may commit.
pub struct IntelFeed {
    client: WatchtowerClient,
    inputs: Mutex<FeedInputs>,
    slot: Arc<FetchSlot<Vec<IntelItem>>>,
}

impl IntelFeed {
    /// Unfiltered feed with the default page size.
    pub fn new(client: WatchtowerClient) -> Self {
        Self {
            client,
            inputs: Mutex::new(FeedInputs {
                limit: DEFAULT_LIMIT,
                competitor: None,
            }),
            slot: Arc::new(FetchSlot::new()),
        }
    }

    /// Feed scoped to one competitor.
    pub fn for_competitor(client: WatchtowerClient, competitor: impl Into<String>) -> Self {
        let feed = Self::new(client);
        if let Ok(mut inputs) = feed.inputs.lock() {
            inputs.competitor = Some(competitor.into());
        }
        feed
    }

    /// Change the competitor filter. A change supersedes the in-flight fetch
    /// and issues a new one.
    pub fn set_competitor(&self, competitor: Option<String>) {
        let next = match self.inputs.lock() {
            Ok(mut inputs) => {
                if inputs.competitor == competitor {
                    return;
                }
                inputs.competitor = competitor;
                inputs.clone()
            }
            Err(_) => return,
        };
        self.spawn_fetch(next);
    }

    /// Change the result-count limit. A change supersedes the in-flight fetch
    /// and issues a new one.
    pub fn set_limit(&self, limit: usize) {
        let next = match self.inputs.lock() {
            Ok(mut inputs) => {
                if inputs.limit == limit {
                    return;
                }
                inputs.limit = limit;
                inputs.clone()
            }
            Err(_) => return,
        };
        self.spawn_fetch(next);
    }

    /// Issue a fetch for the current inputs on the runtime, without waiting.
    pub fn spawn_refresh(&self) {
        let inputs = match self.inputs.lock() {
            Ok(inputs) => inputs.clone(),
            Err(_) => return,
        };
        self.spawn_fetch(inputs);
    }

    /// Issue a fetch for the current inputs and wait for it to settle.
    ///
    /// The commit is generation-guarded: if the inputs changed while this
    /// fetch was in flight, its result is discarded.
    pub async fn refresh(&self) {
        let inputs = match self.inputs.lock() {
            Ok(inputs) => inputs.clone(),
            Err(_) => return,
        };
        let generation = self.slot.begin();
        let result = fetch_items(&self.client, &inputs).await;
        commit(&self.slot, generation, result);
    }

    /// Spawn a fetch task for `inputs`. The generation is captured
    /// synchronously so issue order matches call order.
    fn spawn_fetch(&self, inputs: FeedInputs) {
        let client = self.client.clone();
        let slot = Arc::clone(&self.slot);
        let generation = slot.begin();
        tokio::spawn(async move {
            let result = fetch_items(&client, &inputs).await;
            commit(&slot, generation, result);
        });
    }

    /// Detach the feed on unmount: any in-flight result is discarded and no
    /// further state updates become visible.
    pub fn detach(&self) {
        self.slot.invalidate();
    }

    /// Current view state.
    pub fn view(&self) -> FeedView {
        match self.slot.snapshot() {
            FetchState::Idle | FetchState::Loading { .. } => FeedView::Loading {
                skeletons: SKELETON_CARDS,
            },
            FetchState::Error(message) => FeedView::Error {
                message,
                base_url: self.client.base_url().to_string(),
            },
            FetchState::Success(items) if items.is_empty() => FeedView::Empty {
                headline: "No intel items yet".to_string(),
                help: "Run the pipeline via POST /intel/run to gather competitive intel"
                    .to_string(),
            },
            FetchState::Success(items) => FeedView::Items {
                cards: items.iter().map(intel_card).collect(),
            },
        }
    }
}

async fn fetch_items(
    client: &WatchtowerClient,
    inputs: &FeedInputs,
) -> Result<Vec<IntelItem>, crate::error::FetchError> {
    match inputs.competitor.as_deref() {
        Some(name) => client.intel_for_competitor(name, inputs.limit).await,
        None => client.list_intel(inputs.limit).await,
    }
}

fn commit(
    slot: &FetchSlot<Vec<IntelItem>>,
    generation: u64,
    result: Result<Vec<IntelItem>, crate::error::FetchError>,
) {
    match result {
        Ok(items) => {
            log::debug!("Intel fetch resolved with {} items", items.len());
            slot.resolve(generation, Ok(items));
        }
        Err(err) => {
            log::warn!("Intel fetch failed ({}): {}", err.class(), err);
            slot.resolve(generation, Err(err.to_string()));
        }
    }
}

/// Visible state of the feed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FeedView {
    Loading { skeletons: usize },
    Error { message: String, base_url: String },
    Empty { headline: String, help: String },
    Items { cards: Vec<IntelCard> },
}

/// One rendered intel card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelCard {
    pub competitor: String,
    pub badge: ThreatBadge,
    /// Signal type with underscores replaced by spaces.
    pub signal_label: String,
    pub threat_reason: Option<String>,
    pub summary: String,
    /// Recommended response, shown in its own callout when present.
    pub happyco_response: Option<String>,
    pub source_url: Option<String>,
    /// Display date, detection time preferred over creation time.
    pub date: Option<String>,
    /// Classifier confidence as a rounded percentage.
    pub confidence_pct: Option<u8>,
}

/// Build the card view for one intel item. Absent optional fields are simply
/// omitted from the card.
pub fn intel_card(item: &IntelItem) -> IntelCard {
    let date = item
        .detected_at
        .as_deref()
        .or(item.created_at.as_deref())
        .and_then(parse_iso_date)
        .map(short_date);

    IntelCard {
        competitor: item.competitor.clone(),
        badge: badge_for(&item.threat_level),
        signal_label: item.signal_type.replace('_', " "),
        threat_reason: item.threat_reason.clone().filter(|s| !s.is_empty()),
        summary: item.summary.clone(),
        happyco_response: item.happyco_response.clone().filter(|s| !s.is_empty()),
        source_url: item.source_url.clone().filter(|s| !s.is_empty()),
        date,
        confidence_pct: item
            .confidence
            .map(|c| (c * 100.0).round().clamp(0.0, 255.0) as u8),
    }
}
