//! Integration tests for [`openai_client::OpenAIClient::chat_completion`] against a mockito server
//! standing in for the OpenAI-compatible `/chat/completions` endpoint.

use mockito::Matcher;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, OpenAIClient, OpenAIClientError,
};
use serde_json::json;

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_706_529_600,
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 9, "total_tokens": 21 }
    })
    .to_string()
}

fn messages(question: &str) -> Vec<ChatCompletionRequestMessage> {
    vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content("You are a tutor.")
            .build()
            .unwrap()
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(question)
            .build()
            .unwrap()
            .into(),
    ]
}

/// **Test: First choice content is returned; model and messages are sent in the request body.**
#[tokio::test]
async fn chat_completion_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama-3.1-8b-instant",
            "messages": [
                { "role": "system", "content": "You are a tutor." },
                { "role": "user", "content": "I like play football" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("You mean \"I like playing football\"? Nice hobby!"))
        .create_async()
        .await;

    let client = OpenAIClient::new("gsk_test_key_1234567890".to_string(), server.url());
    let answer = client
        .chat_completion("llama-3.1-8b-instant", 0.1, messages("I like play football"))
        .await
        .unwrap();

    assert_eq!(answer, "You mean \"I like playing football\"? Nice hobby!");
    mock.assert_async().await;
}

/// **Test: A completion without choices is reported as EmptyResponse.**
#[tokio::test]
async fn chat_completion_without_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-empty",
                "object": "chat.completion",
                "created": 1_706_529_600,
                "model": "llama-3.1-8b-instant",
                "choices": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::new("gsk_test_key_1234567890".to_string(), server.url());
    let err = client
        .chat_completion("llama-3.1-8b-instant", 0.1, messages("Hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, OpenAIClientError::EmptyResponse));
}

/// **Test: An API error body is surfaced as OpenAIError, not retried into a hang.**
#[tokio::test]
async fn chat_completion_api_error_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "message": "Invalid API Key",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::new("gsk_bad".to_string(), server.url());
    let err = client
        .chat_completion("llama-3.1-8b-instant", 0.1, messages("Hi"))
        .await
        .unwrap_err();

    match err {
        OpenAIClientError::Api(e) => assert!(e.to_string().contains("Invalid API Key")),
        other => panic!("unexpected error: {:?}", other),
    }
}
