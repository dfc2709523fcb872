use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_logging::{panel_debug, panel_info};

use crate::client::Backend;
use crate::timer::PollTimer;
use crate::{EngineEvent, JobId};

enum EngineCommand {
    StartPolling { job_id: JobId },
    StopPolling,
    Request(Request),
}

enum Request {
    StartDownload { fields: Vec<(String, String)> },
    FetchStatus { job_id: JobId },
    FetchHistory,
    FetchStats,
    ClearHistory,
}

/// Runs backend requests and the poll timer on a background runtime.
/// Results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>, poll_interval: Duration) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("panel-engine".into())
            .spawn(move || {
                let mut timer = PollTimer::new(poll_interval);
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::StartPolling { job_id } => {
                            let tick_tx = event_tx.clone();
                            timer.start(runtime.handle(), job_id, move |job_id| {
                                let _ = tick_tx.send(EngineEvent::PollDue { job_id });
                            });
                        }
                        EngineCommand::StopPolling => {
                            timer.stop();
                        }
                        EngineCommand::Request(request) => {
                            let backend = backend.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let event = handle_request(backend.as_ref(), request).await;
                                let _ = event_tx.send(event);
                            });
                        }
                    }
                }
                timer.stop();
                panel_info!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_download(&self, fields: Vec<(String, String)>) {
        self.request(Request::StartDownload { fields });
    }

    pub fn start_polling(&self, job_id: JobId) {
        self.send(EngineCommand::StartPolling { job_id });
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn fetch_status(&self, job_id: JobId) {
        self.request(Request::FetchStatus { job_id });
    }

    pub fn fetch_history(&self) {
        self.request(Request::FetchHistory);
    }

    pub fn fetch_stats(&self) {
        self.request(Request::FetchStats);
    }

    pub fn clear_history(&self) {
        self.request(Request::ClearHistory);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn request(&self, request: Request) {
        self.send(EngineCommand::Request(request));
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_request(backend: &dyn Backend, request: Request) -> EngineEvent {
    match request {
        Request::StartDownload { fields } => {
            EngineEvent::StartFinished(backend.start_download(&fields).await)
        }
        Request::FetchStatus { job_id } => {
            panel_debug!("Fetching status for {job_id}");
            let result = backend.status(&job_id).await;
            EngineEvent::StatusFetched { job_id, result }
        }
        Request::FetchHistory => EngineEvent::HistoryFetched(backend.history().await),
        Request::FetchStats => EngineEvent::StatsFetched(backend.stats().await),
        Request::ClearHistory => EngineEvent::HistoryCleared(backend.clear_history().await),
    }
}
