use crate::{
    HistoryEntry, JobId, LinkColumn, Platform, StatsSummary, StatusFetch, YtFormat,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Panel finished loading; `history_enabled` mirrors the backend setting.
    Started { history_enabled: bool },
    /// User edited the URL input.
    UrlChanged(String),
    /// User picked a platform radio button.
    PlatformSelected(Platform),
    /// User picked an output format for the quality-tiered platform.
    FormatSelected(YtFormat),
    Mp3BitrateSelected(String),
    Mp4QualitySelected(String),
    CodecSelected(String),
    /// User submitted the download form.
    SubmitClicked,
    /// Backend accepted the submission.
    StartAccepted {
        job_id: JobId,
        message: Option<String>,
    },
    /// Backend refused the submission or the request failed.
    StartRejected { error: String },
    /// Poll timer fired for a job.
    PollDue { job_id: JobId },
    /// A status request finished.
    StatusFetched { job_id: JobId, result: StatusFetch },
    HistoryLoaded(Result<Vec<HistoryEntry>, String>),
    StatsLoaded(Result<StatsSummary, String>),
    /// User confirmed the clear-history prompt.
    ClearHistoryConfirmed,
    HistoryCleared(Result<(), String>),
    /// Secondary click on a history link.
    HistoryLinkRightClicked {
        row: usize,
        column: LinkColumn,
        x: i32,
        y: i32,
    },
    ContextMenuAction(ContextAction),
    /// Ordinary click anywhere outside the context menu.
    ClickedElsewhere,
    ClipboardCopied(Result<(), String>),
    DismissNotice,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    OpenInNewTab,
    CopyToClipboard,
}
