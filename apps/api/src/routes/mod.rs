pub mod health;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

use crate::parsing::handlers::handle_parse;
use crate::state::AppState;
use crate::summary::handlers::handle_summarize;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/parse", post(handle_parse))
        .route("/api/v1/resumes/summarize", post(handle_summarize))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::nlp::RuleBasedPipeline;

    const BOUNDARY: &str = "resume-test-boundary";

    fn app() -> Router {
        build_router(AppState {
            config: Config::default(),
            pipeline: Arc::new(RuleBasedPipeline::new()),
        })
    }

    fn multipart_body(files: &[(&str, &str)]) -> Body {
        let mut body = String::new();
        for (name, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn upload(uri: &str, files: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart_body(files))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["nlp_backend"], "rules");
    }

    #[tokio::test]
    async fn test_parse_without_files_is_bad_request() {
        let response = app()
            .oneshot(upload("/api/v1/resumes/parse", &[]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_empty_file_input_is_bad_request() {
        // A form submitted with no file chosen sends a part with filename="".
        let response = app()
            .oneshot(upload("/api/v1/resumes/parse", &[("", "")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], crate::upload::NO_UPLOADS_MESSAGE);
    }

    #[tokio::test]
    async fn test_parse_returns_one_row_per_upload() {
        let files = [
            ("ann.txt", "Ann Lee\nann@example.com 5550001111\nRust and Kafka"),
            ("bob.txt", "Bob Ray\nbob@example.com\nExcel and forecasting"),
        ];
        let response = app()
            .oneshot(upload("/api/v1/resumes/parse", &files))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["processed"], 2);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["file_name"], "ann.txt");
        assert_eq!(rows[0]["email"], "ann@example.com");
        assert_eq!(rows[0]["phone"], "5550001111");
        assert!(rows.iter().all(|r| r["skill_cluster"].as_u64().unwrap() < 2));
    }

    #[tokio::test]
    async fn test_parse_csv_download() {
        let files = [("ann.txt", "Ann Lee\nann@example.com\nRust")];
        let response = app()
            .oneshot(upload("/api/v1/resumes/parse?format=csv", &files))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("resume_results.csv"));
        let body = body_string(response).await;
        assert!(body.starts_with("file_name,email,phone,skills,Skill Cluster\n"));
    }

    #[tokio::test]
    async fn test_summarize_keyword_csv() {
        let files = [("a.txt", "We drive growth through strategy and strategy again")];
        let response = app()
            .oneshot(upload(
                "/api/v1/resumes/summarize?strategy=keyword&format=csv",
                &files,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "File,Summary\na.txt,growth strategy\n"
        );
    }

    #[tokio::test]
    async fn test_summarize_tfidf_json() {
        let files = [("a.txt", "revenue revenue growth and the team")];
        let response = app()
            .oneshot(upload("/api/v1/resumes/summarize?strategy=tfidf", &files))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["strategy"], "tfidf");
        assert_eq!(json["summaries"][0]["summary"][0], "revenue");
    }

    #[tokio::test]
    async fn test_summarize_tfidf_csv_is_rejected() {
        let files = [("a.txt", "anything")];
        let response = app()
            .oneshot(upload(
                "/api/v1/resumes/summarize?strategy=tfidf&format=csv",
                &files,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_unprocessable() {
        let files = [("cv.docx", "plain text pretending to be docx")];
        let response = app()
            .oneshot(upload("/api/v1/resumes/parse", &files))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
