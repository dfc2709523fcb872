/// Opaque job identifier handed out by the backend at submission time.
pub type JobId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Error,
    NotFound,
    /// Any status string the panel does not know about.
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "error" => Self::Error,
            "not_found" => Self::NotFound,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One poll's worth of job status as reported by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSnapshot {
    pub status: Option<JobStatus>,
    pub running: Option<bool>,
    pub progress: Option<f64>,
    pub message: Option<String>,
    pub position: Option<u32>,
    pub total_queued: Option<u32>,
    /// Full log of the job; replaces the panel content on every poll.
    pub logs: Option<Vec<String>>,
    pub error: Option<String>,
    pub result_url: Option<String>,
}

/// Flags derived from a snapshot that drive reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags {
    pub running: bool,
    pub queued: bool,
    pub completed: bool,
    pub error: bool,
    pub not_found: bool,
}

impl StatusFlags {
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        let status = snapshot.status.as_ref();
        Self {
            running: snapshot.running == Some(true),
            queued: status == Some(&JobStatus::Queued),
            completed: status == Some(&JobStatus::Completed),
            error: non_empty(snapshot.error.as_deref()).is_some()
                || status == Some(&JobStatus::Error),
            not_found: status == Some(&JobStatus::NotFound),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed || self.error || self.not_found
    }
}

/// Outcome of a single status request as seen by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusFetch {
    Snapshot(StatusSnapshot),
    /// HTTP 404: the backend no longer knows the job.
    NotFound { error: Option<String> },
    /// Transport failure, non-ok status or malformed body.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    pub timestamp: Option<String>,
    pub platform: Option<String>,
    pub title: Option<String>,
    pub source_url: Option<String>,
    pub result_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsSummary {
    pub total_jobs: Option<u64>,
    pub average_duration_seconds: Option<f64>,
    pub total_size: Option<String>,
}

/// Treats empty strings the same as missing values.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
