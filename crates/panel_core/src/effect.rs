use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the form fields to `/start_download`.
    StartDownload { fields: Vec<(String, String)> },
    /// Start the recurring poll timer; replaces any live timer.
    StartPolling { job_id: JobId },
    /// Cancel the poll timer.
    StopPolling,
    FetchStatus { job_id: JobId },
    FetchHistory,
    FetchStats,
    ClearHistory,
    OpenUrl { url: String },
    CopyToClipboard { url: String },
}
