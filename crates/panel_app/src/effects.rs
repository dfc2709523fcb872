use std::sync::Arc;
use std::time::Duration;

use panel_core::{
    Effect, HistoryEntry, JobStatus, Msg, StatsSummary, StatusFetch, StatusSnapshot,
};
use panel_engine::{
    Backend, BackendError, EngineEvent, EngineHandle, HistoryRecord, StatsResponse, StatusReply,
    StatusResponse,
};
use panel_logging::{panel_info, panel_warn};

use crate::desktop::Desktop;

/// Executes effects against the engine and the desktop, and turns engine
/// events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    desktop: Box<dyn Desktop>,
    in_flight: usize,
    polling: bool,
}

impl EffectRunner {
    pub fn new(
        backend: Arc<dyn Backend>,
        poll_interval: Duration,
        desktop: Box<dyn Desktop>,
    ) -> std::io::Result<Self> {
        Ok(Self {
            engine: EngineHandle::new(backend, poll_interval)?,
            desktop,
            in_flight: 0,
            polling: false,
        })
    }

    /// Runs `effects`. Desktop effects complete synchronously and their
    /// follow-up messages are returned.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartDownload { fields } => {
                    panel_info!("Submitting job ({} fields)", fields.len());
                    self.in_flight += 1;
                    self.engine.start_download(fields);
                }
                Effect::StartPolling { job_id } => {
                    self.polling = true;
                    self.engine.start_polling(job_id);
                }
                Effect::StopPolling => {
                    self.polling = false;
                    self.engine.stop_polling();
                }
                Effect::FetchStatus { job_id } => {
                    self.in_flight += 1;
                    self.engine.fetch_status(job_id);
                }
                Effect::FetchHistory => {
                    self.in_flight += 1;
                    self.engine.fetch_history();
                }
                Effect::FetchStats => {
                    self.in_flight += 1;
                    self.engine.fetch_stats();
                }
                Effect::ClearHistory => {
                    self.in_flight += 1;
                    self.engine.clear_history();
                }
                Effect::OpenUrl { url } => {
                    if let Err(err) = self.desktop.open_url(&url) {
                        panel_warn!("Opening {url} failed: {err}");
                    }
                }
                Effect::CopyToClipboard { url } => {
                    follow_ups.push(Msg::ClipboardCopied(self.desktop.copy_to_clipboard(&url)));
                }
            }
        }
        follow_ups
    }

    /// True while requests are outstanding or the poll timer runs.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0 || self.polling
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Forgets requests whose results will never arrive. Returns how many
    /// were dropped.
    pub fn abandon_pending(&mut self) -> usize {
        std::mem::take(&mut self.in_flight)
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        if !matches!(event, EngineEvent::PollDue { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        Some(map_event(event))
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StartFinished(Ok(response)) => match response.job_id {
            Some(job_id) => Msg::StartAccepted {
                job_id,
                message: response.message,
            },
            None => Msg::StartRejected {
                error: response
                    .error
                    .unwrap_or_else(|| "Keine Job-ID erhalten.".to_string()),
            },
        },
        EngineEvent::StartFinished(Err(err)) => Msg::StartRejected {
            error: start_error(&err),
        },
        EngineEvent::PollDue { job_id } => Msg::PollDue { job_id },
        EngineEvent::StatusFetched { job_id, result } => Msg::StatusFetched {
            job_id,
            result: map_status(result),
        },
        EngineEvent::HistoryFetched(result) => Msg::HistoryLoaded(
            result
                .map(|records| records.into_iter().map(map_history).collect())
                .map_err(|err| describe(&err, "Serverfehler History")),
        ),
        EngineEvent::StatsFetched(result) => Msg::StatsLoaded(
            result
                .map(map_stats)
                .map_err(|err| describe(&err, "Statistik-Serverfehler")),
        ),
        EngineEvent::HistoryCleared(result) => Msg::HistoryCleared(result.map_err(|err| {
            err.server_message()
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| "Unbekannter Fehler.".to_string())
        })),
    }
}

fn start_error(err: &BackendError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    describe(err, "Serverfehler")
}

/// "{prefix}: {status}" for HTTP failures, the error text otherwise.
fn describe(err: &BackendError, prefix: &str) -> String {
    match err.status() {
        Some(status) => format!("{prefix}: {status}"),
        None => err.to_string(),
    }
}

fn map_status(result: Result<StatusReply, BackendError>) -> StatusFetch {
    match result {
        Ok(StatusReply::Found(response)) => StatusFetch::Snapshot(map_snapshot(response)),
        Ok(StatusReply::NotFound { error }) => StatusFetch::NotFound { error },
        Err(err) => StatusFetch::Failed(describe(&err, "Status-Serverfehler")),
    }
}

fn map_snapshot(response: StatusResponse) -> StatusSnapshot {
    let logs = response.logs();
    StatusSnapshot {
        status: response.status.as_deref().map(JobStatus::parse),
        running: response.running,
        progress: response.progress,
        message: response.message,
        position: response.position,
        total_queued: response.total_queued,
        logs,
        error: response.error,
        result_url: response.result_url,
    }
}

fn map_history(record: HistoryRecord) -> HistoryEntry {
    HistoryEntry {
        timestamp: record.timestamp,
        platform: record.platform,
        title: record.title,
        source_url: record.source_url,
        result_url: record.s3_url,
    }
}

fn map_stats(stats: StatsResponse) -> StatsSummary {
    StatsSummary {
        total_jobs: stats.total_jobs,
        average_duration_seconds: stats.average_duration_seconds,
        total_size: stats.total_size_formatted,
    }
}
