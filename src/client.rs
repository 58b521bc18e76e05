//! HTTP client for the Watchtower backend API.
//!
//! Thin typed wrapper over reqwest: every method issues one GET and decodes a
//! JSON envelope. No retries and no caching; callers surface failures as a
//! single error state per component.

use url::Url;

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::types::{Digest, DigestHistoryResponse, HealthStatus, IntelItem, IntelResponse};

/// Default page size for feed and history fetches.
pub const DEFAULT_LIMIT: usize = 50;

/// Client for the backend's read API.
#[derive(Debug, Clone)]
pub struct WatchtowerClient {
    client: reqwest::Client,
    base_url: String,
}

impl WatchtowerClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// The configured base URL. Error banners include it so an operator can
    /// spot a misconfigured backend address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Network(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Network(format!("Base URL cannot have paths: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Latest intel items across all competitors: `GET /intel?limit=N`.
    pub async fn list_intel(&self, limit: usize) -> Result<Vec<IntelItem>, FetchError> {
        let mut url = self.endpoint(&["intel"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(self.get_json::<IntelResponse>(url).await?.items)
    }

    /// Intel items for one competitor: `GET /intel/{competitor}?limit=N`.
    ///
    /// The competitor name travels as a path segment and is percent-encoded.
    pub async fn intel_for_competitor(
        &self,
        competitor: &str,
        limit: usize,
    ) -> Result<Vec<IntelItem>, FetchError> {
        let mut url = self.endpoint(&["intel", competitor])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(self.get_json::<IntelResponse>(url).await?.items)
    }

    /// Intel items of one signal type: `GET /intel/signals/{signal_type}?limit=N`.
    pub async fn intel_by_signal(
        &self,
        signal_type: &str,
        limit: usize,
    ) -> Result<Vec<IntelItem>, FetchError> {
        let mut url = self.endpoint(&["intel", "signals", signal_type])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(self.get_json::<IntelResponse>(url).await?.items)
    }

    /// One intel item by id: `GET /intel/item/{id}`.
    ///
    /// Returns `Ok(None)` when the backend reports 404 for the id.
    pub async fn intel_item(&self, id: &str) -> Result<Option<IntelItem>, FetchError> {
        let url = self.endpoint(&["intel", "item", id])?;
        match self.get_json::<IntelItem>(url).await {
            Ok(item) => Ok(Some(item)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Semantic search over intel items: `GET /intel/search?q=...&limit=N`.
    pub async fn search_intel(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<IntelItem>, FetchError> {
        let mut url = self.endpoint(&["intel", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        Ok(self.get_json::<IntelResponse>(url).await?.items)
    }

    /// Past digests, most recent first: `GET /digest/history?limit=N`.
    pub async fn digest_history(&self, limit: usize) -> Result<Vec<Digest>, FetchError> {
        let mut url = self.endpoint(&["digest", "history"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        Ok(self.get_json::<DigestHistoryResponse>(url).await?.digests)
    }

    /// Backend liveness probe: `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = self.endpoint(&["health"])?;
        self.get_json::<HealthStatus>(url).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> WatchtowerClient {
        WatchtowerClient::new(&ApiConfig::with_base_url(server.uri()))
    }

    fn intel_item_json(id: &str, competitor: &str) -> serde_json::Value {
        json!({
            "id": id,
            "competitor": competitor,
            "signal_type": "PRODUCT_LAUNCH",
            "threat_level": "HIGH",
            "threat_reason": "Direct feature overlap",
            "summary": "Launched inspections product",
            "happyco_response": "Accelerate roadmap",
            "confidence": 0.85,
            "source_url": "https://example.com/post",
            "detected_at": "2024-03-04T09:00:00Z",
            "created_at": "2024-03-04T09:05:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_intel_hits_intel_with_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [intel_item_json("a", "AppFolio")],
                "count": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).list_intel(50).await.expect("items");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].competitor, "AppFolio");
    }

    #[tokio::test]
    async fn test_competitor_name_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "count": 0})))
            .mount(&server)
            .await;

        let items = client_for(&server)
            .intel_for_competitor("Smart Rent", 50)
            .await
            .expect("items");
        assert!(items.is_empty());

        let requests = server.received_requests().await.expect("recorded requests");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/intel/Smart%20Rent");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).list_intel(50).await.expect_err("error");
        assert_eq!(err.to_string(), "HTTP 500");
        assert_eq!(err.class(), "status");
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_intel(50).await.expect_err("error");
        assert_eq!(err.class(), "decode");
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_network() {
        // Bind a port, then release it so requests fail fast.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client =
            WatchtowerClient::new(&ApiConfig::with_base_url(format!("http://{}", addr)));
        let err = client.list_intel(50).await.expect_err("error");
        assert_eq!(err.class(), "network");
    }

    #[tokio::test]
    async fn test_intel_item_found_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel/item/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(intel_item_json("a", "Entrata")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/intel/item/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Intel item not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let found = client.intel_item("a").await.expect("ok");
        assert_eq!(found.expect("item").id, "a");
        let missing = client.intel_item("missing").await.expect("ok");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_search_intel_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel/search"))
            .and(query_param("q", "pricing"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [intel_item_json("s1", "Buildium")],
                "count": 1
            })))
            .mount(&server)
            .await;

        let items = client_for(&server)
            .search_intel("pricing", 20)
            .await
            .expect("items");
        assert_eq!(items[0].id, "s1");
    }

    #[tokio::test]
    async fn test_intel_by_signal_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/intel/signals/PRICING_CHANGE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "count": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .intel_by_signal("PRICING_CHANGE", 50)
            .await
            .expect("items");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_digest_history_decodes_digests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/digest/history"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "digests": [{
                    "id": "d1",
                    "week_of": "2024-03-04",
                    "content": {"total_items": 12},
                    "sent_at": "2024-03-04T09:00:00Z",
                    "recipient": "team@x.com"
                }],
                "count": 1
            })))
            .mount(&server)
            .await;

        let digests = client_for(&server).digest_history(50).await.expect("digests");
        assert_eq!(digests.len(), 1);
        assert_eq!(digests[0].recipient.as_deref(), Some("team@x.com"));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.expect("health");
        assert_eq!(health.status, "ok");
    }
}
