//! Tracked competitor directory.
//!
//! A fixed name ↔ slug table, known at build time. Must stay in sync with the
//! backend's competitor registry.

use serde::Serialize;

/// A tracked competitor: display name and URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competitor {
    pub name: &'static str,
    pub slug: &'static str,
}

/// Competitors tracked by Watchtower.
pub const COMPETITORS: &[Competitor] = &[
    Competitor { name: "AppFolio", slug: "appfolio" },
    Competitor { name: "Buildium", slug: "buildium" },
    Competitor { name: "SmartRent", slug: "smartrent" },
    Competitor { name: "Entrata", slug: "entrata" },
];

/// Resolve a URL slug to a display name, case-insensitively.
pub fn slug_to_name(slug: &str) -> Option<&'static str> {
    COMPETITORS
        .iter()
        .find(|c| c.slug.eq_ignore_ascii_case(slug))
        .map(|c| c.name)
}

/// Resolve a display name to its URL slug, case-insensitively.
pub fn name_to_slug(name: &str) -> Option<&'static str> {
    COMPETITORS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.slug)
}

/// Card shown in competitor listings, linking to the detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorCard {
    pub name: String,
    pub href: String,
    /// "N signal(s) tracked", present only when a count is known.
    pub signals_line: Option<String>,
}

/// Build the listing card for a competitor.
pub fn competitor_card(competitor: &Competitor, intel_count: Option<usize>) -> CompetitorCard {
    CompetitorCard {
        name: competitor.name.to_string(),
        href: format!("/competitors/{}", competitor.slug),
        signals_line: intel_count.map(|n| {
            format!("{} signal{} tracked", n, if n == 1 { "" } else { "s" })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_a_bijection() {
        for competitor in COMPETITORS {
            let name = slug_to_name(competitor.slug).expect("slug resolves");
            assert_eq!(name, competitor.name);
            let slug = name_to_slug(name).expect("name resolves");
            assert_eq!(slug, competitor.slug);
        }
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        assert_eq!(slug_to_name("APPFOLIO"), Some("AppFolio"));
        assert_eq!(slug_to_name("AppFolio"), Some("AppFolio"));
        assert_eq!(name_to_slug("smartrent"), Some("smartrent"));
        assert_eq!(name_to_slug("ENTRATA"), Some("entrata"));
    }

    #[test]
    fn test_unknown_values_resolve_to_none() {
        assert_eq!(slug_to_name("yardi"), None);
        assert_eq!(slug_to_name(""), None);
        assert_eq!(name_to_slug("Yardi"), None);
    }

    #[test]
    fn test_competitor_card_pluralization() {
        let c = &COMPETITORS[0];
        assert_eq!(
            competitor_card(c, Some(1)).signals_line.as_deref(),
            Some("1 signal tracked")
        );
        assert_eq!(
            competitor_card(c, Some(4)).signals_line.as_deref(),
            Some("4 signals tracked")
        );
        assert!(competitor_card(c, None).signals_line.is_none());
    }

    #[test]
    fn test_competitor_card_href() {
        let card = competitor_card(&COMPETITORS[1], None);
        assert_eq!(card.href, "/competitors/buildium");
    }
}
