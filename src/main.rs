//! Watchtower terminal entry point: mount one dashboard page, drive its
//! fetch, and print the rendered view.
//!
//! Usage: `watchtower [route]` where route is `/`, `/competitors/{slug}`, or
//! `/digest`. The backend base URL comes from `WATCHTOWER_API_URL`.

use watchtower::client::WatchtowerClient;
use watchtower::config::ApiConfig;
use watchtower::pages;

#[tokio::main]
async fn main() {
    env_logger::init();

    let route_arg = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let config = ApiConfig::from_env();
    log::info!("Watchtower starting against {}", config.base_url);

    let client = WatchtowerClient::new(&config);
    let route = pages::parse_route(&route_arg);
    let page = pages::mount(route, client.clone());

    page.refresh().await;
    println!("{}", page.render());

    // A failed fetch usually means the backend is down or misaddressed; probe
    // the health endpoint so the operator can tell which.
    if page.had_fetch_error() {
        match client.health().await {
            Ok(health) => log::info!(
                "Backend at {} is reachable (status: {})",
                config.base_url,
                health.status
            ),
            Err(err) => log::warn!(
                "Backend health check at {} failed ({}): {}",
                config.base_url,
                err.class(),
                err
            ),
        }
    }
}
