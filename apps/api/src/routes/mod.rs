pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers::handle_evaluate;
use crate::interview::handlers::handle_interview;
use crate::resume::handlers::handle_parse_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/interview", post(handle_interview))
        .route("/evaluate", post(handle_evaluate))
        .route("/parse-resume", post(handle_parse_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::llm_client::LlmBackend;

    fn router_with(backend: Option<ScriptedBackend>) -> Router {
        build_router(AppState {
            llm: backend.map(|b| Arc::new(b) as Arc<dyn LlmBackend>),
            config: Config::default(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn interview_body(history: Value) -> Value {
        json!({
            "history": history,
            "resumeText": "Rust developer",
            "jobDescription": "Backend Engineer",
            "difficulty": "Hard"
        })
    }

    #[tokio::test]
    async fn test_interview_returns_model_text() {
        let app = router_with(Some(ScriptedBackend::replying(&[
            "Hi, I'm Sam. Tell me about yourself.",
        ])));

        let response = app
            .oneshot(json_request("/interview", interview_body(json!([]))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["text"], "Hi, I'm Sam. Tell me about yourself.");
    }

    #[tokio::test]
    async fn test_interview_rejects_history_ending_with_model() {
        let app = router_with(Some(ScriptedBackend::replying(&["unused"])));
        let history = json!([
            {"role": "user", "content": "Hello"},
            {"role": "model", "content": "Tell me about yourself."}
        ]);

        let response = app
            .oneshot(json_request("/interview", interview_body(history)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "CLIENT_STATE_ERROR");
    }

    #[tokio::test]
    async fn test_interview_without_backend_is_503() {
        let response = router_with(None)
            .oneshot(json_request("/interview", interview_body(json!([]))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_interview_upstream_failure_is_500() {
        let response = router_with(Some(ScriptedBackend::failing()))
            .oneshot(json_request("/interview", interview_body(json!([]))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert!(!body.to_string().contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_evaluate_returns_structured_result() {
        let app = router_with(Some(ScriptedBackend::replying(&[
            "```json\n{\"score\":8,\"strengths\":[\"Depth\"],\"weaknesses\":[],\"feedback\":\"Good\"}\n```",
        ])));
        let body = json!({
            "history": [{"role": "user", "content": "Please start the interview."}],
            "jobDescription": "Backend Engineer"
        });

        let response = app.oneshot(json_request("/evaluate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body,
            json!({"score": 8, "strengths": ["Depth"], "weaknesses": [], "feedback": "Good"})
        );
    }

    #[tokio::test]
    async fn test_evaluate_malformed_output_is_500() {
        let app = router_with(Some(ScriptedBackend::replying(&["Score: 8/10"])));
        let body = json!({"history": [], "jobDescription": "Backend Engineer"});

        let response = app.oneshot(json_request("/evaluate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_EVALUATION");
        assert!(!body.to_string().contains("8/10"));
    }

    #[tokio::test]
    async fn test_evaluate_without_backend_is_503() {
        let body = json!({"history": [], "jobDescription": "Backend Engineer"});
        let response = router_with(None)
            .oneshot(json_request("/evaluate", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    fn multipart_request(field_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"resume\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/parse-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_unsupported_type() {
        let response = router_with(None)
            .oneshot(multipart_request("file", "text/plain", b"Jane Doe"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_TYPE");
    }

    #[tokio::test]
    async fn test_parse_resume_requires_file_field() {
        let response = router_with(None)
            .oneshot(multipart_request("attachment", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_parse_resume_truncated_body_has_fixed_message() {
        let request = Request::builder()
            .method("POST")
            .uri("/parse-resume")
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=XBOUNDARYX",
            )
            .body(Body::from(
                "--XBOUNDARYX\r\nContent-Disposition: form-data; name=\"file\"\r\n\r\ncut off",
            ))
            .unwrap();
        let response = router_with(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(
            message == "Invalid multipart body" || message == "Failed to read upload",
            "parser detail leaked: {message}"
        );
    }

    #[tokio::test]
    async fn test_parse_resume_broken_docx_is_500() {
        let response = router_with(None)
            .oneshot(multipart_request(
                "file",
                crate::resume::extract::DOCX_CONTENT_TYPE,
                b"not a zip",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_reports_backend_state() {
        let response = router_with(None)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["llm_configured"], false);
    }
}
