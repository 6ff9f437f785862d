//! Feedback API client implementation.
//!
//! This module provides the client for the three endpoints the front-end
//! uses: creating a feedback record, listing all records, and fetching the
//! per-faculty aggregate. Requests are issued once; failures are reported to
//! the caller and never retried.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{FacultyCount, FeedbackRecord, NewFeedback, SubmitResponse};
use crate::config::ApiConfig;

/// Path of the feedback collection.
const FEEDBACK_PATH: &str = "/api/feedback";

/// Path of the per-faculty aggregate.
const FACULTY_STATS_PATH: &str = "/api/feedback/faculty-stats";

/// The feedback API client.
///
/// Cheap to clone; clones share the underlying connection pool, which is what
/// lets background tasks each own a handle.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the feedback service, without a trailing slash.
    base_url: String,
}

impl FeedbackClient {
    /// Create a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or the HTTP client
    /// cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        let client = Self::build_http_client(timeout)?;
        let base_url = normalize_base_url(&config.base_url)?;

        info!("Feedback client created");
        Ok(Self { client, base_url })
    }

    /// Create a client for the given base URL with no request timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Self::build_http_client(None)?;
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Build the HTTP client.
    fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(ApiError::Network)
    }

    /// Submit a new feedback record.
    ///
    /// Calls `POST /api/feedback`. The server's `message` is returned on
    /// success; on a non-success status it is carried by
    /// [`ApiError::Rejected`].
    #[instrument(skip(self, feedback), fields(faculty = %feedback.faculty, rating = feedback.rating))]
    pub async fn submit_feedback(&self, feedback: &NewFeedback) -> Result<SubmitResponse> {
        debug!("Submitting feedback");

        let url = self.url(FEEDBACK_PATH);
        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(feedback)
            .send()
            .await?;

        let status = response.status();
        let body = if is_json(&response) {
            read_submit_body(response).await
        } else {
            SubmitResponse::default()
        };

        if status.is_success() {
            info!(status = %status, "Feedback accepted");
            Ok(body)
        } else {
            warn!(status = %status, message = ?body.message, "Feedback rejected");
            Err(ApiError::Rejected {
                status,
                message: body.message.filter(|m| !m.is_empty()),
            })
        }
    }

    /// Fetch every stored feedback record.
    ///
    /// Calls `GET /api/feedback`. Anything other than a JSON array with a
    /// success status is an error.
    #[instrument(skip(self))]
    pub async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        let url = self.url(FEEDBACK_PATH);
        let response = self.get(&url).await?;

        if !is_json(&response) {
            let content_type = content_type(&response).unwrap_or("none").to_string();
            let body = response.text().await.unwrap_or_default();
            debug!(body = %body, "Non-JSON feedback response");
            return Err(ApiError::UnexpectedContentType(content_type));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let records: Vec<FeedbackRecord> = parse_array(value)?;

        debug!("Fetched {} feedback records", records.len());
        Ok(records)
    }

    /// Fetch the per-faculty submission counts.
    ///
    /// Calls `GET /api/feedback/faculty-stats`. The body is parsed as JSON
    /// whatever the content type claims.
    #[instrument(skip(self))]
    pub async fn faculty_stats(&self) -> Result<Vec<FacultyCount>> {
        let url = self.url(FACULTY_STATS_PATH);
        let response = self.get(&url).await?;

        let text = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        let counts: Vec<FacultyCount> = parse_array(value)?;

        debug!("Fetched {} faculty aggregates", counts.len());
        Ok(counts)
    }

    /// Perform a GET request and reject non-success statuses.
    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %body, "Error response");
            Err(ApiError::from_status(status, &body))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Read an optional `{message}` body, treating unreadable JSON as empty.
async fn read_submit_body(response: Response) -> SubmitResponse {
    match response.json::<SubmitResponse>().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Ignoring unreadable response body: {}", e);
            SubmitResponse::default()
        }
    }
}

fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

fn is_json(response: &Response) -> bool {
    content_type(response).is_some_and(|ct| ct.contains("application/json"))
}

/// Deserialize a JSON value that must be an array.
fn parse_array<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<Vec<T>> {
    if !value.is_array() {
        return Err(ApiError::InvalidResponse(format!(
            "expected a JSON array, got: {}",
            value
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Normalize the base URL by removing trailing slashes and checking it parses.
fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    reqwest::Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Course, Faculty};
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_feedback() -> NewFeedback {
        NewFeedback {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            course: Course::BcaYear1,
            faculty: Faculty::Karuna,
            rating: 4,
            comment: "Good".to_string(),
            feedback_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://backend.example.com/").unwrap(),
            "https://backend.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://backend.example.com///").unwrap(),
            "https://backend.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_array_rejects_object() {
        let result: Result<Vec<FacultyCount>> = parse_array(json!({"error": "oops"}));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_submit_feedback_posts_json_and_returns_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/feedback"))
            .and(body_json(json!({
                "name": "A",
                "email": "a@x.com",
                "course": "BCA Year 1 (2024-2027)",
                "faculty": "Karuna",
                "rating": 4,
                "comment": "Good",
                "feedbackDate": "2025-03-14"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Created"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let response = client.submit_feedback(&sample_feedback()).await.unwrap();

        assert_eq!(response.message.as_deref(), Some("Created"));
    }

    #[tokio::test]
    async fn test_submit_feedback_success_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let response = client.submit_feedback(&sample_feedback()).await.unwrap();

        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn test_submit_feedback_rejected_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/feedback"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid rating"})),
            )
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let err = client.submit_feedback(&sample_feedback()).await.unwrap_err();

        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message.as_deref(), Some("Invalid rating"));
            }
            other => panic!("Expected Rejected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_feedback_network_failure() {
        // Bind then drop a listener so the port is known to refuse connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FeedbackClient::with_base_url(&format!("http://{}", addr)).unwrap();
        let err = client.submit_feedback(&sample_feedback()).await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_list_feedback_returns_records_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "1", "name": "First", "course": "C", "faculty": "F", "rating": 3},
                {"_id": "2", "name": "Second", "course": "C", "faculty": "F", "rating": 5}
            ])))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let records = client.list_feedback().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "First");
        assert_eq!(records[1].name, "Second");
    }

    #[tokio::test]
    async fn test_list_feedback_tolerates_loose_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "65f0", "id": "65f0", "name": "A", "course": "C", "faculty": "F", "rating": 4},
                {"_id": "65f1", "name": null, "course": "C", "faculty": null, "rating": 2}
            ])))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let records = client.list_feedback().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), Some("65f0"));
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].faculty, "");
        assert_eq!(records[1].rating, 2);
    }

    #[tokio::test]
    async fn test_list_feedback_rejects_non_json_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let err = client.list_feedback().await.unwrap_err();

        assert!(matches!(err, ApiError::UnexpectedContentType(ct) if ct.contains("text/html")));
    }

    #[tokio::test]
    async fn test_list_feedback_rejects_non_array_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feedback": []})))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let err = client.list_feedback().await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_feedback_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let err = client.list_feedback().await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Rejected { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_faculty_stats_parses_counts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback/faculty-stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "Karuna", "count": 3},
                {"_id": "Ashwini", "count": 1}
            ])))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let counts = client.faculty_stats().await.unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].faculty.as_deref(), Some("Karuna"));
        assert_eq!(counts[0].count, 3);
    }

    #[tokio::test]
    async fn test_faculty_stats_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback/faculty-stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let err = client.faculty_stats().await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
