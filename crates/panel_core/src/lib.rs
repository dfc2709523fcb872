//! Panel core: pure job-status state machine and view-model helpers.
mod effect;
mod form;
mod history;
mod job;
mod msg;
mod progress;
mod state;
mod translate;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    section_visibility, FormState, Platform, SectionVisibility, YtFormat, DEFAULT_CODEC,
    DEFAULT_MP3_BITRATE, DEFAULT_MP4_QUALITY,
};
pub use history::{
    link_cell, platform_label, truncate_link_text, HistoryRowView, HistoryView, LinkCell,
    LinkColumn, NOT_AVAILABLE,
};
pub use job::{
    HistoryEntry, JobId, JobStatus, StatsSummary, StatusFetch, StatusFlags, StatusSnapshot,
};
pub use msg::{ContextAction, Msg};
pub use progress::{clamp_progress, ProgressTone, ProgressView};
pub use state::{
    AppState, STATUS_DONE, STATUS_FAILED, STATUS_PLACEHOLDER, STATUS_QUEUED, STATUS_READY,
    STATUS_SENDING, STATUS_SUBMITTED,
};
pub use translate::translate_error;
pub use update::{update, BUSY_NOTICE, COPY_FAILED, JOB_EXPIRED, STATUS_UNCLEAR};
pub use view_model::{
    AppViewModel, ContextMenuView, LogPanelView, OverlayView, StatsView, SubmitView,
    SUBMIT_BUSY_LABEL, SUBMIT_IDLE_LABEL,
};
