/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for kucoin-adapter tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use kucoin_adapter::{ApiKeyVersion, Credentials, EndpointConfig, KucoinClient};
use serde_json::{Value, json};
use sha2::Sha256;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-key";
pub const SECRET: &str = "test-secret";
pub const PASSPHRASE: &str = "test-passphrase";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials(version: ApiKeyVersion) -> Credentials {
    Credentials::new(API_KEY, SECRET, PASSPHRASE).with_key_version(version)
}

/// Client pointed at the mock server for both hosts
pub fn client_for(server: &MockServer, version: ApiKeyVersion) -> KucoinClient {
    KucoinClient::builder()
        .endpoints(EndpointConfig::new(&server.uri(), &server.uri()).expect("mock URI"))
        .credentials(test_credentials(version))
        .build()
        .expect("client should build")
}

pub fn success(data: Value) -> Value {
    json!({ "code": "200000", "msg": "", "data": data })
}

/// HMAC-SHA256 computed independently of the crate under test
pub fn reference_hmac(secret: &str, message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("any key size");
    mac.update(message);
    STANDARD.encode(mac.finalize().into_bytes())
}

pub fn header<'a>(request: &'a Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_else(|| panic!("missing header {name}"))
}

/// Rebuild the canonical string from what the server actually received
pub fn received_canonical(request: &Request) -> Vec<u8> {
    let mut canonical = Vec::new();
    canonical.extend_from_slice(header(request, "KC-API-TIMESTAMP").as_bytes());
    canonical.extend_from_slice(request.method.as_str().as_bytes());
    canonical.extend_from_slice(request.url.path().as_bytes());
    if let Some(query) = request.url.query() {
        canonical.push(b'?');
        canonical.extend_from_slice(query.as_bytes());
    }
    canonical.extend_from_slice(&request.body);
    canonical
}

/// Whether the received signature matches the received request
pub fn signature_matches(request: &Request) -> bool {
    header(request, "KC-API-SIGN") == reference_hmac(SECRET, &received_canonical(request))
}
