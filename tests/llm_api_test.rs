//! HTTP-level tests for the Ollama and OpenAI-compatible LLM client,
//! against a wiremock server standing in for the provider.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doc_qa::config::LlmConfig;
use doc_qa::llm::{Embedder, Generator, LlmClient};

fn ollama_config(base_url: String) -> LlmConfig {
    LlmConfig {
        provider: "ollama".to_string(),
        base_url,
        chat_model: "llama3.2".to_string(),
        embedding_model: "nomic-embed-text".to_string(),
        api_key: None,
        embedding_dim: 2,
    }
}

fn openai_config(base_url: String) -> LlmConfig {
    LlmConfig {
        provider: "openai".to_string(),
        base_url,
        chat_model: "gpt-4o-mini".to_string(),
        embedding_model: "text-embedding-3-small".to_string(),
        api_key: Some("test-key".to_string()),
        embedding_dim: 2,
    }
}

// ─── Embeddings ──────────────────────────────────────────

#[tokio::test]
async fn test_ollama_embed_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .and(body_partial_json(json!({"model": "nomic-embed-text"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [[0.1, 0.2], [0.3, 0.4]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), ollama_config(server.uri()));
    let vectors = client
        .embed_batch(&["first chunk".to_string(), "second chunk".to_string()])
        .await
        .unwrap();

    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors[0], vec![0.1, 0.2]);
    assert_eq!(vectors[1], vec![0.3, 0.4]);
}

#[tokio::test]
async fn test_openai_embed_sends_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [1.0, 0.0]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), openai_config(server.uri()));
    let vector = client.embed_single("a question").await.unwrap();
    assert_eq!(vector, vec![1.0, 0.0]);
}

#[tokio::test]
async fn test_embed_empty_batch_skips_the_network() {
    // No mock mounted: any request would 404 and fail the call
    let server = MockServer::start().await;
    let client = LlmClient::new(reqwest::Client::new(), ollama_config(server.uri()));
    let vectors = client.embed_batch(&[]).await.unwrap();
    assert!(vectors.is_empty());
}

#[tokio::test]
async fn test_embed_error_status_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), ollama_config(server.uri()));
    let err = client.embed_batch(&["text".to_string()]).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("500"), "got: {msg}");
    assert!(msg.contains("model not loaded"), "got: {msg}");
}

// ─── Generation ──────────────────────────────────────────

#[tokio::test]
async fn test_ollama_generate_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "The grace period is 30 days."},
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), ollama_config(server.uri()));
    let answer = client.generate("What is the grace period?").await.unwrap();
    assert_eq!(answer, "The grace period is 30 days.");
}

#[tokio::test]
async fn test_openai_generate_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Yes, it is covered."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), openai_config(server.uri()));
    let answer = client.generate("Is surgery covered?").await.unwrap();
    assert_eq!(answer, "Yes, it is covered.");
}

#[tokio::test]
async fn test_openai_generate_empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), openai_config(server.uri()));
    let err = client.generate("anything").await.unwrap_err();
    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn test_generate_error_status_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = LlmClient::new(reqwest::Client::new(), ollama_config(server.uri()));
    let err = client.generate("anything").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("429"), "got: {msg}");
    assert!(msg.contains("quota exceeded"), "got: {msg}");
}

// ─── Provider selection ──────────────────────────────────

#[tokio::test]
async fn test_unknown_provider_is_an_error() {
    let mut config = ollama_config("http://localhost:1".to_string());
    config.provider = "gemini".to_string();
    let client = LlmClient::new(reqwest::Client::new(), config);

    let err = client.embed_batch(&["text".to_string()]).await.unwrap_err();
    assert!(err.to_string().contains("unknown LLM provider"));

    let err = client.generate("prompt").await.unwrap_err();
    assert!(err.to_string().contains("unknown LLM provider"));
}
