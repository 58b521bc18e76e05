//! Watchtower: competitive-intelligence dashboard client.
//!
//! Read-only consumer of the Watchtower backend API. Typed fetches for intel
//! items and digest history, a generation-counted fetch lifecycle per
//! component, and the card/badge/state view models the dashboard pages
//! render. The pipeline that produces the data (scraping, classification,
//! digest sending) lives in the backend and is only ever observed over HTTP.

pub mod client;
pub mod competitors;
pub mod config;
pub mod digest;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod pages;
pub mod threat;
pub mod types;
pub mod util;
