use serde::Deserialize;
use serde_json::Value;

use crate::BackendError;

pub type JobId = String;

/// Body of a successful `/start_download` call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct StartResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Job status as served by `/status`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub running: Option<bool>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub total_queued: Option<u32>,
    #[serde(default)]
    logs: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result_url: Option<String>,
}

impl StatusResponse {
    /// Log lines, or `None` when the field is absent or not a list.
    pub fn logs(&self) -> Option<Vec<String>> {
        let Value::Array(items) = self.logs.as_ref()? else {
            return None;
        };
        Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(line) => line.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusReply {
    Found(StatusResponse),
    /// HTTP 404 with the server's explanation, if any.
    NotFound { error: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct HistoryRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "soundcloud_url")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub s3_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct StatsResponse {
    #[serde(default)]
    pub total_jobs: Option<u64>,
    #[serde(default)]
    pub average_duration_seconds: Option<f64>,
    #[serde(default)]
    pub total_size_formatted: Option<String>,
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best effort: a non-JSON body yields no message.
    pub(crate) fn parse(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .and_then(|body| body.error)
            .filter(|error| !error.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StartFinished(Result<StartResponse, BackendError>),
    /// The poll timer fired for `job_id`.
    PollDue { job_id: JobId },
    StatusFetched {
        job_id: JobId,
        result: Result<StatusReply, BackendError>,
    },
    HistoryFetched(Result<Vec<HistoryRecord>, BackendError>),
    StatsFetched(Result<StatsResponse, BackendError>),
    HistoryCleared(Result<(), BackendError>),
}
