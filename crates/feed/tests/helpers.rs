//! Test helper utilities for feed crate integration tests.

use realloc_rs_feed::FeedConfig;
use url::Url;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock GraphQL server.
pub async fn start_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a FeedConfig pointing to a mock server.
pub fn feed_config_with_mock(mock: &MockServer) -> FeedConfig {
    FeedConfig::new().with_api_url(Url::parse(&mock.uri()).unwrap())
}

/// Load a fixture file as a string.
pub fn load_fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", path))
}

/// Mock the GraphQL response for one vault, matched on the address string
/// appearing in the request body.
pub async fn mock_vault_response(server: &MockServer, address_needle: &str, fixture_name: &str) {
    let body = load_fixture(fixture_name);
    Mock::given(method("POST"))
        .and(body_string_contains(address_needle))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mock an HTTP error for one vault.
pub async fn mock_vault_http_error(server: &MockServer, address_needle: &str, status_code: u16) {
    Mock::given(method("POST"))
        .and(body_string_contains(address_needle))
        .respond_with(ResponseTemplate::new(status_code).set_body_string("Internal Server Error"))
        .mount(server)
        .await;
}

/// Mock a vault-not-found response for one vault.
pub async fn mock_vault_not_found(server: &MockServer, address_needle: &str) {
    Mock::given(method("POST"))
        .and(body_string_contains(address_needle))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data":{"vaultByAddress":null}}"#),
        )
        .mount(server)
        .await;
}
