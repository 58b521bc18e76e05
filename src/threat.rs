//! Threat level normalization and badge rendering.

use serde::{Deserialize, Serialize};

/// Normalized threat level. Unknown or missing wire values fall back to Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    High,
    Medium,
    Low,
}

impl ThreatLevel {
    /// Normalize a wire value, case-insensitively. Anything unrecognized is Low.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HIGH" => ThreatLevel::High,
            "MEDIUM" => ThreatLevel::Medium,
            _ => ThreatLevel::Low,
        }
    }

    /// Uppercase label shown inside the badge.
    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::High => "HIGH",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::Low => "LOW",
        }
    }

    /// Visual style class for the badge at this level.
    pub fn style_class(self) -> &'static str {
        match self {
            ThreatLevel::High => "bg-red-500/15 text-red-600 dark:text-red-400 border-red-500/30",
            ThreatLevel::Medium => {
                "bg-amber-500/15 text-amber-600 dark:text-amber-400 border-amber-500/30"
            }
            ThreatLevel::Low => {
                "bg-emerald-500/15 text-emerald-600 dark:text-emerald-400 border-emerald-500/30"
            }
        }
    }

    /// Badge view for this level.
    pub fn badge(self) -> ThreatBadge {
        ThreatBadge {
            label: self.label(),
            class: self.style_class(),
        }
    }
}

/// Rendered badge: normalized label plus its style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatBadge {
    pub label: &'static str,
    pub class: &'static str,
}

/// Badge for a raw wire value.
pub fn badge_for(raw: &str) -> ThreatBadge {
    ThreatLevel::parse(raw).badge()
}
