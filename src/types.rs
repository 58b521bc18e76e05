//! Wire-level records returned by the Watchtower backend.
//!
//! Field names mirror the backend's JSON serializers exactly. Anything the
//! dashboard can render without is optional here: a missing value degrades to
//! omitted UI, never to a decode failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single competitive-intelligence item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelItem {
    pub id: String,
    pub competitor: String,
    /// Free-form category, e.g. PRODUCT_LAUNCH or PRICING_CHANGE.
    pub signal_type: String,
    /// Free-form on the wire; normalize with [`crate::threat::ThreatLevel::parse`].
    #[serde(default)]
    pub threat_level: String,
    #[serde(default)]
    pub threat_reason: Option<String>,
    pub summary: String,
    /// Recommended response for the HappyCo team.
    #[serde(default)]
    pub happyco_response: Option<String>,
    /// Classifier confidence in [0, 1].
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source_url: Option<String>,
    /// When the signal was detected. Preferred over `created_at` for display.
    #[serde(default)]
    pub detected_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A weekly digest record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    pub id: String,
    /// ISO date of the Monday the digest covers.
    #[serde(default)]
    pub week_of: Option<String>,
    /// Semi-structured digest body (backend JSONB). Carries either a numeric
    /// `total_items` or a `grouped` object of arrays.
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Envelope for the intel listing endpoints: `{ "items": [...], "count": N }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelResponse {
    #[serde(default)]
    pub items: Vec<IntelItem>,
    #[serde(default)]
    pub count: usize,
}

/// Envelope for `GET /digest/history`: `{ "digests": [...], "count": N }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestHistoryResponse {
    #[serde(default)]
    pub digests: Vec<Digest>,
    #[serde(default)]
    pub count: usize,
}

/// Response of the backend liveness probe, `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
