use std::sync::Arc;

use faqbot_backend::knowledge::{
    sample_faqs, InMemoryKnowledgeStore, KnowledgeStore, NewKnowledgeEntry, SqliteKnowledgeStore,
};
use faqbot_backend::llm::GeminiClient;
use faqbot_backend::pipeline::{PipelineError, SupportPipeline};
use faqbot_backend::rag::{CONTEXT_CLOSE_MARKER, CONTEXT_OPEN_MARKER, NO_CONTEXT_SENTINEL};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini(server: &MockServer, key: Option<&str>) -> Arc<GeminiClient> {
    Arc::new(GeminiClient::new(
        &server.uri(),
        "gemini-2.5-flash",
        key.map(str::to_string),
    ))
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

fn prompt_of(request: &Request) -> String {
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn password_question_retrieves_the_matching_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply("Click \"Forgot Password\" on the login page."))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries([
        NewKnowledgeEntry::new(
            "How do I reset my password?",
            "Click \"Forgot Password\" on the login page.",
            Some("Account"),
        ),
        NewKnowledgeEntry::new(
            "What are your business hours?",
            "Monday to Friday, 9 AM to 6 PM.",
            Some("General"),
        ),
    ]));
    let pipeline = SupportPipeline::new(store, gemini(&server, Some("key")));

    let result = pipeline.answer("How do I reset my password").await.unwrap();

    assert_eq!(result.matched_count, 1);
    assert_eq!(result.answer_text, "Click \"Forgot Password\" on the login page.");

    let requests = server.received_requests().await.unwrap();
    let prompt = prompt_of(&requests[0]);
    assert!(prompt.contains("FAQ 1:\nQ: How do I reset my password?"));
    assert!(!prompt.contains("business hours"));
    assert!(prompt.contains("CUSTOMER QUERY: How do I reset my password"));
}

#[tokio::test]
async fn unmatched_query_still_calls_generation_with_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply("I could not find that, please contact support."))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries(sample_faqs()));
    let pipeline = SupportPipeline::new(store, gemini(&server, Some("key")));

    let result = pipeline.answer("asdf zzzz").await.unwrap();

    assert_eq!(result.matched_count, 0);
    let requests = server.received_requests().await.unwrap();
    let prompt = prompt_of(&requests[0]);
    assert!(prompt.contains(&format!(
        "{CONTEXT_OPEN_MARKER}\n{NO_CONTEXT_SENTINEL}\n{CONTEXT_CLOSE_MARKER}"
    )));
}

#[tokio::test]
async fn upstream_failure_is_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        })))
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries(sample_faqs()));
    let pipeline = SupportPipeline::new(store, gemini(&server, Some("key")));

    let err = pipeline.answer("What is your refund policy").await.unwrap_err();

    assert!(matches!(err, PipelineError::GenerationFailed));
    assert!(!err.to_string().contains("exhausted"));
}

#[tokio::test]
async fn missing_credential_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("unreachable"))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries(sample_faqs()));
    let pipeline = SupportPipeline::new(store, gemini(&server, None));

    let err = pipeline.answer("How can I track my order").await.unwrap_err();

    assert!(matches!(err, PipelineError::Configuration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_query_is_rejected_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("unreachable"))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries(sample_faqs()));
    let pipeline = SupportPipeline::new(store, gemini(&server, None));

    let err = pipeline.answer("").await.unwrap_err();

    // a missing key would be reported if validation ran later
    assert!(matches!(err, PipelineError::Validation(_)));
}

#[tokio::test]
async fn sqlite_store_drives_the_same_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply("We ship to over 100 countries."))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let store = SqliteKnowledgeStore::with_path(tmp.path().join("faqs.db"))
        .await
        .unwrap();
    for entry in sample_faqs() {
        store.insert(entry).await.unwrap();
    }
    let pipeline = SupportPipeline::new(Arc::new(store), gemini(&server, Some("key")));

    let result = pipeline
        .answer("Do you offer international shipping")
        .await
        .unwrap();

    // "offer" also hits the refund FAQ ("We offer a 30-day money-back guarantee")
    assert_eq!(result.matched_count, 2);
    assert_eq!(result.answer_text, "We ship to over 100 countries.");
}

#[tokio::test]
async fn concurrent_requests_share_one_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(reply("ok"))
        .expect(8)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryKnowledgeStore::with_entries(sample_faqs()));
    let pipeline = Arc::new(SupportPipeline::new(store, gemini(&server, Some("key"))));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let query = if i % 2 == 0 { "money-back guarantee" } else { "asdf zzzz" };
                pipeline.answer(query).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap().unwrap();
        let expected = if i % 2 == 0 { 1 } else { 0 };
        assert_eq!(result.matched_count, expected);
    }
}
