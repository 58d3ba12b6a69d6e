//! Remote question source. Pools are served as static JSON, fetched once
//! at session start in parallel with identity capture.

use std::time::Duration;

use physquiz_core::bank::parse_pool;
use physquiz_core::error::LoadError;
use physquiz_core::model::QuestionPool;

/// Fetch and parse a question pool from a static JSON endpoint.
pub async fn fetch_pool(url: &str) -> Result<QuestionPool, LoadError> {
    tracing::debug!(url, "fetching question pool");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("failed to build HTTP client");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Network(format!(
            "question source returned {status}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    let pool = parse_pool(&body)?;
    tracing::info!(url, questions = pool.len(), "question pool loaded");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const POOL_JSON: &str = r#"{
        "11-1": [
            {"id": "q1", "question": "¿Unidad de fuerza?",
             "options": ["Newton", "Joule", "Watt", "Pascal"],
             "correctAnswer": 0}
        ]
    }"#;

    #[tokio::test]
    async fn fetches_and_parses_a_grade_keyed_pool() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/questions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(POOL_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let pool = fetch_pool(&format!("{}/questions.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn server_error_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetch_pool(&format!("{}/questions.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let err = fetch_pool("http://127.0.0.1:9/questions.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[tokio::test]
    async fn invalid_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = fetch_pool(&format!("{}/questions.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
