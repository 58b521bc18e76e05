//! Page shells and routing.
//!
//! Pages compose the components structurally: a header plus one feed or
//! history list. The competitor detail page resolves its slug through the
//! directory and becomes a terminal not-found view when resolution fails.

use crate::client::WatchtowerClient;
use crate::competitors;
use crate::digest::{DigestHistory, DigestHistoryView};
use crate::feed::{FeedView, IntelFeed};

/// Routing surface of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Competitor(String),
    DigestHistory,
    NotFound,
}

/// Parse a URL path into a route. Anything unrecognized is NotFound.
pub fn parse_route(path: &str) -> Route {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [] => Route::Dashboard,
        ["digest"] => Route::DigestHistory,
        ["competitors", slug] => Route::Competitor((*slug).to_string()),
        _ => Route::NotFound,
    }
}

/// A header navigation link.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const NAV_DASHBOARD: NavLink = NavLink {
    label: "← Dashboard",
    href: "/",
};
const NAV_DIGEST: NavLink = NavLink {
    label: "Digest History",
    href: "/digest",
};

/// Header block shared by all pages.
#[derive(Debug, Clone)]
pub struct PageHeader {
    pub nav: Vec<NavLink>,
    pub title: String,
    pub subtitle: String,
}

/// The dashboard: header plus the unfiltered intel feed.
pub struct DashboardPage {
    pub header: PageHeader,
    pub feed: IntelFeed,
}

/// Competitor detail: header with the resolved name plus a filtered feed.
pub struct CompetitorPage {
    pub header: PageHeader,
    pub name: String,
    pub feed: IntelFeed,
}

/// Digest history: header plus the digest list.
pub struct DigestPage {
    pub header: PageHeader,
    pub history: DigestHistory,
}

/// Terminal not-found view. Static; no data dependencies.
#[derive(Debug, Clone)]
pub struct NotFoundPage {
    pub title: &'static str,
    pub message: &'static str,
    pub back: NavLink,
}

impl NotFoundPage {
    fn competitor() -> Self {
        Self {
            title: "Competitor not found",
            message: "The competitor you're looking for doesn't exist or isn't tracked.",
            back: NavLink {
                label: "← Back to Dashboard",
                href: "/",
            },
        }
    }
}

/// A mounted page.
pub enum Page {
    Dashboard(DashboardPage),
    Competitor(CompetitorPage),
    Digest(DigestPage),
    NotFound(NotFoundPage),
}

/// Mount the page for a route.
///
/// An unresolvable competitor slug mounts the terminal not-found view.
pub fn mount(route: Route, client: WatchtowerClient) -> Page {
    match route {
        Route::Dashboard => Page::Dashboard(DashboardPage {
            header: PageHeader {
                nav: Vec::new(),
                title: "Watchtower".to_string(),
                subtitle: "HappyCo Competitive Intelligence Dashboard".to_string(),
            },
            feed: IntelFeed::new(client),
        }),
        Route::Competitor(slug) => match competitors::slug_to_name(&slug) {
            Some(name) => Page::Competitor(CompetitorPage {
                header: PageHeader {
                    nav: vec![NAV_DASHBOARD, NAV_DIGEST],
                    title: name.to_string(),
                    subtitle: format!("Competitive intelligence for {}", name),
                },
                name: name.to_string(),
                feed: IntelFeed::for_competitor(client, name),
            }),
            None => {
                log::info!("Unknown competitor slug '{}', mounting not-found", slug);
                Page::NotFound(NotFoundPage::competitor())
            }
        },
        Route::DigestHistory => Page::Digest(DigestPage {
            header: PageHeader {
                nav: vec![NAV_DASHBOARD],
                title: "Digest History".to_string(),
                subtitle: "Past Monday morning briefings".to_string(),
            },
            history: DigestHistory::new(client),
        }),
        Route::NotFound => Page::NotFound(NotFoundPage::competitor()),
    }
}

impl Page {
    /// Drive the page's fetch to completion. Not-found pages have nothing to
    /// fetch.
    pub async fn refresh(&self) {
        match self {
            Page::Dashboard(page) => page.feed.refresh().await,
            Page::Competitor(page) => page.feed.refresh().await,
            Page::Digest(page) => page.history.refresh().await,
            Page::NotFound(_) => {}
        }
    }

    /// Detach the page on unmount; in-flight fetches are discarded.
    pub fn detach(&self) {
        match self {
            Page::Dashboard(page) => page.feed.detach(),
            Page::Competitor(page) => page.feed.detach(),
            Page::Digest(page) => page.history.detach(),
            Page::NotFound(_) => {}
        }
    }

    /// True when the page's component settled in the error state.
    pub fn had_fetch_error(&self) -> bool {
        match self {
            Page::Dashboard(page) => matches!(page.feed.view(), FeedView::Error { .. }),
            Page::Competitor(page) => matches!(page.feed.view(), FeedView::Error { .. }),
            Page::Digest(page) => {
                matches!(page.history.view(), DigestHistoryView::Error { .. })
            }
            Page::NotFound(_) => false,
        }
    }

    /// Render the page as plain text.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        match self {
            Page::Dashboard(page) => {
                render_header(&mut lines, &page.header);
                render_section(&mut lines, "Intel Feed");
                render_feed(&mut lines, &page.feed.view());
            }
            Page::Competitor(page) => {
                render_header(&mut lines, &page.header);
                render_section(&mut lines, "Intel Feed");
                render_feed(&mut lines, &page.feed.view());
            }
            Page::Digest(page) => {
                render_header(&mut lines, &page.header);
                render_digests(&mut lines, &page.history.view());
            }
            Page::NotFound(page) => {
                lines.push(page.title.to_string());
                lines.push(page.message.to_string());
                lines.push(format!("{} ({})", page.back.label, page.back.href));
            }
        }
        lines.join("\n")
    }
}

fn render_header(lines: &mut Vec<String>, header: &PageHeader) {
    if !header.nav.is_empty() {
        let nav = header
            .nav
            .iter()
            .map(|link| format!("{} ({})", link.label, link.href))
            .collect::<Vec<_>>()
            .join("  |  ");
        lines.push(nav);
    }
    lines.push(header.title.clone());
    lines.push(header.subtitle.clone());
    lines.push(String::new());
}

fn render_section(lines: &mut Vec<String>, heading: &str) {
    lines.push(heading.to_string());
    lines.push("-".repeat(heading.len()));
}

fn render_feed(lines: &mut Vec<String>, view: &FeedView) {
    match view {
        FeedView::Loading { .. } => lines.push("Loading…".to_string()),
        FeedView::Error { message, base_url } => {
            lines.push("Failed to load intel".to_string());
            lines.push(message.clone());
            lines.push(format!("Ensure the backend is running at {}", base_url));
        }
        FeedView::Empty { headline, help } => {
            lines.push(headline.clone());
            lines.push(help.clone());
        }
        FeedView::Items { cards } => {
            for card in cards {
                let mut title = format!("{} [{}] · {}", card.competitor, card.badge.label, card.signal_label);
                if let Some(date) = &card.date {
                    title.push_str(&format!(" · {}", date));
                }
                lines.push(title);
                if let Some(reason) = &card.threat_reason {
                    lines.push(format!("  Threat: {}", reason));
                }
                lines.push(format!("  {}", card.summary));
                if let Some(response) = &card.happyco_response {
                    lines.push(format!("  HappyCo response: {}", response));
                }
                if let Some(url) = &card.source_url {
                    lines.push(format!("  Source: {}", url));
                }
                if let Some(pct) = card.confidence_pct {
                    lines.push(format!("  Confidence: {}%", pct));
                }
                lines.push(String::new());
            }
        }
    }
}

fn render_digests(lines: &mut Vec<String>, view: &DigestHistoryView) {
    match view {
        DigestHistoryView::Loading { .. } => lines.push("Loading…".to_string()),
        DigestHistoryView::Error { message, base_url } => {
            lines.push("Failed to load digests".to_string());
            lines.push(message.clone());
            lines.push(format!("Ensure the backend is running at {}", base_url));
        }
        DigestHistoryView::Empty { headline, help } => {
            lines.push(headline.clone());
            lines.push(help.clone());
        }
        DigestHistoryView::Cards { cards } => {
            for card in cards {
                lines.push(card.week_label.clone());
                lines.push(format!("  Sent {}", card.sent_date));
                if let Some(recipient) = &card.recipient {
                    lines.push(format!("  {}", recipient));
                }
                lines.push(format!("  {}", card.items_line));
                lines.push(String::new());
            }
        }
    }
}
