use cpl_chat::chat::completion_request;
use cpl_chat::config::ProviderConfig;
use cpl_chat::provider::{AzureOpenAiClient, CompletionProvider, ProviderError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(endpoint: String) -> ProviderConfig {
    ProviderConfig {
        endpoint,
        api_key: "test-key".into(),
        api_version: "2024-12-01-preview".into(),
        deployment: "gpt-4o-mini".into(),
    }
}

#[tokio::test]
async fn sends_deployment_scoped_request() {
    let server = MockServer::start().await;

    let request = completion_request("gpt-4o-mini", "What is CPL?");
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o-mini/chat/completions"))
        .and(query_param("api-version", "2024-12-01-preview"))
        .and(header("api-key", "test-key"))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant for the CPL course."},
                {"role": "user", "content": "What is CPL?"}
            ],
            "temperature": 0.3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "  A course.  "},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 3, "total_tokens": 23}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(reqwest::Client::new(), &config(server.uri())).unwrap();
    let resp = client.complete(&request).await.expect("completion");
    assert_eq!(resp.first_content(), Some("  A course.  "));
}

#[tokio::test]
async fn upstream_status_maps_to_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
        })))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(reqwest::Client::new(), &config(server.uri())).unwrap();
    let err = client
        .complete(&completion_request("gpt-4o-mini", "hi"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "AuthenticationError");
    assert!(matches!(err, ProviderError::Status { .. }));
    assert!(err.to_string().contains("invalid subscription key"));
}

#[tokio::test]
async fn undecodable_body_is_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = AzureOpenAiClient::new(reqwest::Client::new(), &config(server.uri())).unwrap();
    let err = client
        .complete(&completion_request("gpt-4o-mini", "hi"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "APIResponseValidationError");
}

#[tokio::test]
async fn unreachable_endpoint_is_connection_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr")
    };
    let client = AzureOpenAiClient::new(
        reqwest::Client::new(),
        &config(format!("http://{addr}")),
    )
    .unwrap();
    let err = client
        .complete(&completion_request("gpt-4o-mini", "hi"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "APIConnectionError");
}
