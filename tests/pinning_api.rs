//! HTTP-boundary tests for the pinning client.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use algocred::config::PinningConfig;
use algocred::{Error, PinataClient};

fn config_for(server: &MockServer) -> PinningConfig {
    PinningConfig {
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
        base_url: server.uri(),
        gateway: "https://gateway.pinata.cloud".to_string(),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn store_json_builds_gateway_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .and(header("pinata_api_key", "test-key"))
        .and(header("pinata_secret_api_key", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"IpfsHash": "QmMeta123"})))
        .mount(&server)
        .await;

    let client = PinataClient::new(&config_for(&server)).unwrap();
    let uri = client
        .store_json(&json!({"degree": "BS Computer Science", "year": 2026}))
        .await
        .unwrap();

    assert_eq!(uri, "https://gateway.pinata.cloud/ipfs/QmMeta123");
}

#[tokio::test]
async fn store_file_builds_gateway_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .and(header("pinata_api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"IpfsHash": "QmFile456"})))
        .mount(&server)
        .await;

    let client = PinataClient::new(&config_for(&server)).unwrap();
    let uri = client
        .store_file("certificate.pdf", b"%PDF-1.7 fake".to_vec())
        .await
        .unwrap();

    assert_eq!(uri, "https://gateway.pinata.cloud/ipfs/QmFile456");
}

#[tokio::test]
async fn non_success_status_surfaces_store_unavailable_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("invalid credentials supplied"),
        )
        .mount(&server)
        .await;

    let client = PinataClient::new(&config_for(&server)).unwrap();
    let err = client.store_json(&json!({"a": 1})).await.unwrap_err();

    match err {
        Error::StoreUnavailable(body) => {
            assert!(body.contains("invalid credentials supplied"));
            assert!(body.contains("401"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
