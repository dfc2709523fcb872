//! Panel engine: backend HTTP client, poll timer and effect execution.
mod client;
mod engine;
mod error;
mod timer;
mod types;

pub use client::{Backend, ClientSettings, ReqwestBackend};
pub use engine::EngineHandle;
pub use error::BackendError;
pub use timer::PollTimer;
pub use types::{
    EngineEvent, HistoryRecord, JobId, StartResponse, StatsResponse, StatusReply, StatusResponse,
};
