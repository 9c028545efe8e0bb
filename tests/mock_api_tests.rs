//! Mock API tests for the OpenAI-compatible clients
//!
//! A local wiremock server stands in for the transcription and chat endpoints.

use autoclip::analyze::{select_moments, CompletionClient, OpenAiClient};
use autoclip::error::AutoclipError;
use autoclip::transcribe::{Transcriber, WhisperClient};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

// ============================================================================
// Chat Completion Mock Tests
// ============================================================================

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_completion_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("  hello  \n")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string())
            .with_base_url(server.uri())
            .with_model("gpt-4o-mini");

        let content = client.complete("Say hello", 0.4).await.unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        let result = client.complete("hi", 0.7).await;

        assert!(matches!(result, Err(AutoclipError::Api(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_error_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "message": "model overloaded", "type": "server_error" }
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        let result = client.complete("hi", 0.7).await;

        assert!(matches!(result, Err(AutoclipError::Api(msg)) if msg.contains("overloaded")));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            OpenAiClient::new("test-key".to_string()).with_base_url(format!("{}/", server.uri()));
        assert_eq!(client.complete("hi", 0.4).await.unwrap(), "ok");
    }
}

// ============================================================================
// Moment Selection Mock Tests
// ============================================================================

mod moment_tests {
    use super::*;

    #[tokio::test]
    async fn test_fenced_moments_end_to_end() {
        let server = MockServer::start().await;
        let content = "```json\n[\
            {\"start\": 10, \"end\": 70, \"reason\": \"Funny story\", \"viral_score\": 80},\
            {\"start\": 100, \"end\": 110, \"reason\": \"Too short\", \"viral_score\": 99},\
            {\"start\": 200, \"end\": 260.5, \"reason\": \"Big reveal\", \"viral_score\": \"65\"}\
            ]\n```";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        let moments = select_moments(&client, "a long talk about many things", 10).await;

        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].start, 10.0);
        assert_eq!(moments[0].reason, "Funny story");
        assert_eq!(moments[1].end, 260.5);
        assert_eq!(moments[1].viral_score, 65);
    }

    #[tokio::test]
    async fn test_moments_truncated_to_max() {
        let server = MockServer::start().await;
        let content = json!([
            { "start": 0, "end": 40, "reason": "a", "viral_score": 10 },
            { "start": 50, "end": 90, "reason": "b", "viral_score": 20 },
            { "start": 100, "end": 140, "reason": "c", "viral_score": 30 }
        ])
        .to_string();
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(&content)))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        let moments = select_moments(&client, "text", 2).await;

        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].reason, "a");
        assert_eq!(moments[1].reason, "b");
    }

    #[tokio::test]
    async fn test_server_error_gives_no_moments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        assert!(select_moments(&client, "text", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_prose_reply_gives_no_moments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_reply("Here are some great moments you could use!")),
            )
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key".to_string()).with_base_url(server.uri());
        assert!(select_moments(&client, "text", 5).await.is_empty());
    }
}

// ============================================================================
// Whisper API Mock Tests
// ============================================================================

mod whisper_tests {
    use super::*;

    fn audio_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("audio.mp3");
        std::fs::write(&path, b"ID3 fake mp3 bytes").unwrap();
        path
    }

    #[tokio::test]
    async fn test_whisper_client_creation() {
        let client = WhisperClient::new("test-api-key".to_string());
        assert_eq!(client.name(), "OpenAI Whisper");
    }

    #[tokio::test]
    async fn test_word_level_transcription() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "Hello there world",
                "duration": 2.0,
                "words": [
                    { "word": " Hello", "start": 0.0, "end": 0.5 },
                    { "word": "there", "start": 0.6, "end": 1.0 },
                    { "word": "world", "start": 1.1, "end": 1.8 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = WhisperClient::new("test-key".to_string()).with_base_url(server.uri());
        let transcript = client.transcribe(&audio_file(&dir)).await.unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.words[0].text, "Hello");
        assert_eq!(transcript.words[2].start, 1.1);
        assert_eq!(transcript.text(), "Hello there world");
    }

    #[tokio::test]
    async fn test_segment_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "First part. Second part.",
                "segments": [
                    { "start": 0.0, "end": 2.5, "text": " First part." },
                    { "start": 2.5, "end": 5.0, "text": " Second part." }
                ]
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = WhisperClient::new("test-key".to_string()).with_base_url(server.uri());
        let transcript = client.transcribe(&audio_file(&dir)).await.unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.words[0].text, "First part.");
        assert_eq!(transcript.words[1].start, 2.5);
        assert_eq!(transcript.words[1].end, 5.0);
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = WhisperClient::new("bad-key".to_string()).with_base_url(server.uri());
        let result = client.transcribe(&audio_file(&dir)).await;

        assert!(
            matches!(result, Err(AutoclipError::Api(msg)) if msg.contains("Incorrect API key"))
        );
    }

    #[tokio::test]
    async fn test_whisper_handles_missing_file() {
        let client = WhisperClient::new("test-api-key".to_string());
        let result = client
            .transcribe(&PathBuf::from("/tmp/nonexistent_autoclip_test.mp3"))
            .await;

        // Should fail because the file doesn't exist
        assert!(result.is_err());
    }
}
