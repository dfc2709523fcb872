use crate::{FormState, HistoryView, JobId, ProgressView, SectionVisibility};

pub const SUBMIT_IDLE_LABEL: &str = "Download starten";
pub const SUBMIT_BUSY_LABEL: &str = "Verarbeite...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub enabled: bool,
    /// Busy indicator shown while a job is being polled.
    pub busy: bool,
}

impl SubmitView {
    pub fn idle() -> Self {
        Self {
            enabled: true,
            busy: false,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_IDLE_LABEL
        }
    }
}

impl Default for SubmitView {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogPanelView {
    pub text: String,
    /// Set whenever the content changed and the view should follow the tail.
    pub scroll_to_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub message: &'static str,
    pub status_text: String,
    pub percent: u8,
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total_jobs: String,
    pub average_duration: String,
    pub total_size: String,
}

impl Default for StatsView {
    fn default() -> Self {
        Self {
            total_jobs: "-".to_string(),
            average_duration: "-".to_string(),
            total_size: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuView {
    pub url: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: FormState,
    pub sections: SectionVisibility,
    pub submit: SubmitView,
    pub current_job: Option<JobId>,
    pub progress: ProgressView,
    pub status_line: String,
    pub log: LogPanelView,
    pub result_url: Option<String>,
    pub error: Option<String>,
    /// Non-fatal warning, e.g. a rejected submission.
    pub notice: Option<String>,
    pub overlay: Option<OverlayView>,
    pub history: HistoryView,
    pub clear_history_enabled: bool,
    pub stats: StatsView,
    pub context_menu: Option<ContextMenuView>,
    pub dirty: bool,
}
