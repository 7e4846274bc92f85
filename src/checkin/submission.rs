use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Payload reported to the remote endpoint after an accepted check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub user_email: String,
    pub manager_email: String,
    /// RFC 3339 in UTC with millisecond precision, e.g. `2026-10-17T05:45:00.000Z`
    pub timestamp: String,
}

impl CheckInRecord {
    pub fn new<Tz: TimeZone>(
        user_email: impl Into<String>,
        manager_email: impl Into<String>,
        at: &DateTime<Tz>,
    ) -> Self {
        Self {
            user_email: user_email.into(),
            manager_email: manager_email.into(),
            timestamp: at
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Delivers an accepted check-in somewhere outside the process
pub trait Submitter: Send + Sync + 'static {
    fn submit(
        &self,
        record: &CheckInRecord,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Posts check-in records as JSON to a fixed endpoint.
///
/// One request per record: no retries, no auth headers, and no timeout
/// beyond whatever the transport itself enforces.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.checkin_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Submitter for SubmissionClient {
    async fn submit(&self, record: &CheckInRecord) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint).json(record).send().await?;
        let status = response.status();

        // The endpoint has no response contract; only transport failures count
        if status.is_success() {
            tracing::debug!(endpoint = %self.endpoint, status = %status, "Check-in submitted");
        } else {
            tracing::warn!(
                endpoint = %self.endpoint,
                status = %status,
                "Check-in endpoint answered with a non-success status"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_record_timestamp_is_utc_millis() {
        let kyiv = FixedOffset::east_opt(3 * 3600).unwrap();
        let at = kyiv.with_ymd_and_hms(2026, 10, 17, 8, 45, 0).unwrap();

        let record = CheckInRecord::new("worker@example.com", "boss@example.com", &at);
        assert_eq!(record.timestamp, "2026-10-17T05:45:00.000Z");
    }

    #[test]
    fn test_record_wire_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 5, 45, 0).unwrap();
        let record = CheckInRecord::new("worker@example.com", "boss@example.com", &at);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "userEmail": "worker@example.com",
                "managerEmail": "boss@example.com",
                "timestamp": "2026-10-17T05:45:00.000Z",
            })
        );
    }

    #[tokio::test]
    async fn test_submit_to_closed_port_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SubmissionClient::new(format!("http://{}/checkin", addr));
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 5, 45, 0).unwrap();
        let record = CheckInRecord::new("worker@example.com", "boss@example.com", &at);

        let err = client.submit(&record).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }
}
