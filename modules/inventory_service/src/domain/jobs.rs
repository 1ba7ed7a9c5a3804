//! Work offload for image analysis
//!
//! Jobs are opaque to this service: it only guarantees that a job was handed
//! to the durable queue before reporting success. The wire body keeps the
//! field names the analysis worker consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Analysis job as published to the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisJob {
    /// Job identifier returned to the submitter
    #[serde(rename = "image_id")]
    pub job_id: String,
    /// Submitting user
    #[serde(rename = "user_id")]
    pub submitter_id: Uuid,
    /// Where the worker fetches the payload from
    #[serde(rename = "image_url")]
    pub payload_reference: String,
    /// Submission time, unix seconds on the wire
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    pub submitted_at: DateTime<Utc>,
}

impl AnalysisJob {
    /// Create a job with a fresh identifier
    pub fn new(submitter_id: Uuid, payload_reference: String) -> Self {
        Self {
            job_id: format!("img_{}", Uuid::new_v4().simple()),
            submitter_id,
            payload_reference,
            submitted_at: Utc::now(),
        }
    }
}

/// Publisher trait for handing jobs to the queue
///
/// Implementations should:
/// - Declare the destination idempotently before the first publish
/// - Return only once the broker accepted the message
#[async_trait::async_trait]
pub trait JobPublisher: Send + Sync {
    async fn publish(&self, job: &AnalysisJob) -> anyhow::Result<()>;
}

/// Publisher used when no broker was reachable at startup
pub struct DisconnectedPublisher;

#[async_trait::async_trait]
impl JobPublisher for DisconnectedPublisher {
    async fn publish(&self, _job: &AnalysisJob) -> anyhow::Result<()> {
        anyhow::bail!("work queue is not connected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_job_wire_format() {
        let user = Uuid::new_v4();
        let job = AnalysisJob {
            job_id: "img_1".to_string(),
            submitter_id: user,
            payload_reference: "https://cdn.example.com/a.png".to_string(),
            submitted_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "image_id": "img_1",
                "user_id": user,
                "image_url": "https://cdn.example.com/a.png",
                "timestamp": 1_700_000_000,
            })
        );
    }

    #[test]
    fn test_new_job_ids_are_unique() {
        let user = Uuid::new_v4();
        let a = AnalysisJob::new(user, "a".to_string());
        let b = AnalysisJob::new(user, "a".to_string());
        assert!(a.job_id.starts_with("img_"));
        assert_ne!(a.job_id, b.job_id);
    }

    #[tokio::test]
    async fn test_disconnected_publisher_fails() {
        let job = AnalysisJob::new(Uuid::new_v4(), "a".to_string());
        assert!(DisconnectedPublisher.publish(&job).await.is_err());
    }
}
