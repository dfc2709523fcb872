use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use panel_engine::{
    Backend, BackendError, HistoryRecord, StartResponse, StatsResponse, StatusReply,
    StatusResponse,
};

use crate::desktop::Desktop;
use crate::effects::EffectRunner;

/// In-memory backend. Every endpoint succeeds with empty data unless told
/// to panic, which loses the reply the way a crashed request task would.
#[derive(Default)]
pub struct ScriptedBackend {
    pub panic_on_stats: bool,
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn start_download(
        &self,
        _fields: &[(String, String)],
    ) -> Result<StartResponse, BackendError> {
        Ok(StartResponse {
            job_id: Some("job-1".into()),
            ..StartResponse::default()
        })
    }

    async fn status(&self, _job_id: &str) -> Result<StatusReply, BackendError> {
        Ok(StatusReply::Found(StatusResponse::default()))
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>, BackendError> {
        Ok(Vec::new())
    }

    async fn stats(&self) -> Result<StatsResponse, BackendError> {
        if self.panic_on_stats {
            panic!("stats handler crashed");
        }
        Ok(StatsResponse::default())
    }

    async fn clear_history(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingDesktop {
    opened: Arc<Mutex<Vec<String>>>,
    copied: Arc<Mutex<Vec<String>>>,
    clipboard_error: Option<String>,
}

impl RecordingDesktop {
    pub fn failing_clipboard(error: &str) -> Self {
        Self {
            clipboard_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl Desktop for RecordingDesktop {
    fn open_url(&self, url: &str) -> Result<(), String> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), String> {
        if let Some(error) = &self.clipboard_error {
            return Err(error.clone());
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn runner_with(backend: ScriptedBackend, desktop: RecordingDesktop) -> EffectRunner {
    EffectRunner::new(Arc::new(backend), Duration::from_secs(60), Box::new(desktop))
        .expect("engine")
}
