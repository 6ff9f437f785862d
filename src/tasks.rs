//! Async task management for non-blocking API operations.
//!
//! Network calls run as background tokio tasks so the UI keeps rendering.
//! Each task reports its result through an unbounded channel that the main
//! loop drains with `try_recv()` between frames.
//!
//! The flow is:
//! 1. The app records a [`PendingRequest`] while handling input
//! 2. The main loop takes the pending requests and hands them to `TaskSpawner`
//! 3. When a task completes it sends an [`ApiMessage`]
//! 4. The main loop passes the message back to the app

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::types::{FacultyCount, FeedbackRecord, NewFeedback, SubmitResponse};
use crate::api::{ApiError, FeedbackClient};

/// Work the app wants done off the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// Create a feedback record.
    Submit(NewFeedback),
    /// Load the feedback collection for the listing view.
    FetchFeedback { refresh: u64 },
    /// Load the per-faculty aggregate for the statistics view.
    FetchStats { refresh: u64 },
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Result of a create request.
    FeedbackSubmitted(Result<SubmitResponse, ApiError>),

    /// Feedback collection loaded.
    FeedbackFetched {
        /// Refresh counter value the fetch was issued for.
        refresh: u64,
        result: Result<Vec<FeedbackRecord>, ApiError>,
    },

    /// Faculty aggregate loaded.
    StatsFetched {
        refresh: u64,
        result: Result<Vec<FacultyCount>, ApiError>,
    },
}

/// Spawns background tasks for API calls.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    client: FeedbackClient,
}

impl TaskSpawner {
    /// Create a spawner that reports through `tx` using `client`.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, client: FeedbackClient) -> Self {
        Self { tx, client }
    }

    /// Start the background task for a pending request.
    pub fn spawn(&self, request: PendingRequest) {
        match request {
            PendingRequest::Submit(feedback) => self.spawn_submit(feedback),
            PendingRequest::FetchFeedback { refresh } => self.spawn_fetch_feedback(refresh),
            PendingRequest::FetchStats { refresh } => self.spawn_fetch_stats(refresh),
        }
    }

    /// Spawn a task that submits new feedback.
    pub fn spawn_submit(&self, feedback: NewFeedback) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.submit_feedback(&feedback).await;
            let _ = tx.send(ApiMessage::FeedbackSubmitted(result));
        });
    }

    /// Spawn a task that loads every feedback record.
    pub fn spawn_fetch_feedback(&self, refresh: u64) {
        debug!(refresh, "Fetching feedback list");
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.list_feedback().await;
            let _ = tx.send(ApiMessage::FeedbackFetched { refresh, result });
        });
    }

    /// Spawn a task that loads the faculty aggregate.
    pub fn spawn_fetch_stats(&self, refresh: u64) {
        debug!(refresh, "Fetching faculty stats");
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.faculty_stats().await;
            let _ = tx.send(ApiMessage::StatsFetched { refresh, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns `(receiver, spawner)`. The receiver is polled by the main loop.
pub fn create_task_channel(
    client: FeedbackClient,
) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_stats_reports_through_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback/faculty-stats"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"_id": "Karuna", "count": 2}])),
            )
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let (mut rx, spawner) = create_task_channel(client);

        spawner.spawn(PendingRequest::FetchStats { refresh: 7 });

        match rx.recv().await {
            Some(ApiMessage::StatsFetched { refresh, result }) => {
                assert_eq!(refresh, 7);
                assert_eq!(result.unwrap()[0].count, 2);
            }
            other => panic!("Unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_feedback_reports_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedback"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = FeedbackClient::with_base_url(&server.uri()).unwrap();
        let (mut rx, spawner) = create_task_channel(client);

        spawner.spawn(PendingRequest::FetchFeedback { refresh: 0 });

        match rx.recv().await {
            Some(ApiMessage::FeedbackFetched { result, .. }) => assert!(result.is_err()),
            other => panic!("Unexpected message: {:?}", other),
        }
    }
}
