/// Integration tests with a mocked model API
/// Exercises the structured-output attempt, the free-text retry and the failure paths
use lead_agents::capture::LeadCaptureService;
use lead_agents::errors::AppError;
use lead_agents::events::LeadEvents;
use lead_agents::extraction::{ExtractionError, LeadExtractor};
use lead_agents::llm_client::OpenAiExtractor;
use lead_agents::repository::{InMemoryLeadRepository, LeadRepository};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Helper function to create an extractor pointed at the mock server
fn create_test_extractor(base_url: String) -> OpenAiExtractor {
    OpenAiExtractor::new(
        base_url,
        Some("sk-test".to_string()),
        "gpt-4o-mini".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

fn strict_request() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
}

fn any_request() -> MockBuilder {
    Mock::given(method("POST")).and(path("/v1/chat/completions"))
}

#[tokio::test]
async fn test_structured_output_success() {
    let mock_server = MockServer::start().await;

    strict_request()
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "temperature": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            r#"{"full_name": "John Doe", "email": "john@example.com", "phone": "555-123-4567", "source": "web"}"#,
        )))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let result = extractor
        .extract("Hi, I'm John Doe from the web form, john@example.com")
        .await
        .unwrap();

    assert_eq!(result.full_name, "John Doe");
    assert_eq!(result.email, "john@example.com");
    assert_eq!(result.phone, "555-123-4567");
    assert_eq!(result.source, "web");
}

#[tokio::test]
async fn test_rejected_response_format_retries_with_fenced_json() {
    let mock_server = MockServer::start().await;

    strict_request()
        .respond_with(ResponseTemplate::new(400).set_body_string("response_format not supported"))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    any_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "Sure! Here you go:\n```json\n{\"full_name\": \"Ann Lee\", \"email\": \"ann@lee.io\", \"phone\": null}\n```",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let result = extractor.extract("Ann Lee, ann@lee.io").await.unwrap();

    assert_eq!(result.full_name, "Ann Lee");
    assert_eq!(result.email, "ann@lee.io");
    assert_eq!(result.phone, "");
    assert_eq!(result.source, "manual");
}

#[tokio::test]
async fn test_non_object_strict_payload_triggers_retry() {
    let mock_server = MockServer::start().await;

    strict_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[1, 2, 3]")))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    any_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "The lead is {\"full_name\": \"Bo Chen\", \"email\": \"bo@chen.dev\", \"phone\": 5551112222, \"source\": \"referral\"} as requested.",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let result = extractor.extract("Bo Chen, referral").await.unwrap();

    assert_eq!(result.full_name, "Bo Chen");
    assert_eq!(result.phone, "5551112222");
    assert_eq!(result.source, "referral");
}

#[tokio::test]
async fn test_both_attempts_fail_with_upstream_status() {
    let mock_server = MockServer::start().await;

    any_request()
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let err = extractor.extract("anything").await.unwrap_err();

    assert_eq!(
        err,
        ExtractionError::UpstreamStatus {
            status: 503,
            body: "overloaded".to_string()
        }
    );
}

#[tokio::test]
async fn test_retry_without_json_is_unparseable() {
    let mock_server = MockServer::start().await;

    any_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("I could not find a lead.")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let err = extractor.extract("hello").await.unwrap_err();

    assert!(matches!(err, ExtractionError::UnparseableResponse(_)));
}

#[tokio::test]
async fn test_completion_without_choices_is_an_error() {
    let mock_server = MockServer::start().await;

    any_request()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"message": "quota exceeded"}})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let err = extractor.extract("hello").await.unwrap_err();

    assert!(matches!(err, ExtractionError::UnparseableResponse(_)));
}

#[tokio::test]
async fn test_empty_choices_store_no_lead() {
    let mock_server = MockServer::start().await;

    any_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let repository = Arc::new(InMemoryLeadRepository::new());
    let service = LeadCaptureService::new(
        Arc::new(create_test_extractor(format!("{}/v1", mock_server.uri()))),
        repository.clone(),
        LeadEvents::new(),
    );

    let err = service.capture("Jo Park, jo@park.io").await.unwrap_err();

    match err {
        AppError::WithContext { source, .. } => assert!(matches!(
            *source,
            AppError::Extraction(ExtractionError::UnparseableResponse(_))
        )),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(repository.list().is_empty());
}

#[tokio::test]
async fn test_null_content_reads_as_empty_object() {
    let mock_server = MockServer::start().await;

    strict_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let extractor = create_test_extractor(format!("{}/v1", mock_server.uri()));
    let result = extractor.extract("hello").await.unwrap();

    assert_eq!(result.full_name, "");
    assert_eq!(result.email, "");
    assert_eq!(result.source, "manual");
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let mock_server = MockServer::start().await;

    any_request()
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let extractor = OpenAiExtractor::new(
        format!("{}/v1", mock_server.uri()),
        Some("   ".to_string()),
        "gpt-4o-mini".to_string(),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = extractor.extract("Jo, jo@x.io").await.unwrap_err();
    assert_eq!(err, ExtractionError::CredentialMissing);
}
