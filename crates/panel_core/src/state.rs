use panel_logging::{panel_debug, panel_info};

use crate::job::non_empty;
use crate::view_model::{
    AppViewModel, ContextMenuView, LogPanelView, OverlayView, StatsView, SubmitView,
};
use crate::{
    translate_error, Effect, FormState, HistoryEntry, HistoryRowView, HistoryView, JobId,
    LinkColumn, ProgressView, StatsSummary,
};

pub const STATUS_READY: &str = "Bereit.";
pub const STATUS_SENDING: &str = "Sende Auftrag...";
pub const STATUS_SUBMITTED: &str = "Auftrag gesendet...";
pub const STATUS_DONE: &str = "Abgeschlossen!";
pub const STATUS_FAILED: &str = "Fehler!";
pub const STATUS_PLACEHOLDER: &str = "...";
pub const STATUS_QUEUED: &str = "In Warteschlange...";

const OVERLAY_MESSAGES: [&str; 12] = [
    "Hacking the mainframe...",
    "Route Gibson durch die Firewall...",
    "Einen Moment, ich Binge gerade das Internet durch...",
    "Lade 1.21 Gigawatt herunter...",
    "Komprimiere die Daten... mit purer Willenskraft.",
    "Die Bits und Bytes tanzen Cha-Cha-Cha.",
    "Frage die NSA nach dem schnellsten Weg...",
    "Polishing the pixels...",
    "Die Leitung glüht, alles nach Plan!",
    "Füttere den Hamster im Serverraum...",
    "Kalibriere den Fluxkompensator...",
    "Optimiere den Warp-Antrieb...",
];

/// Owned controller state: the current-job slot, the polling flag and every
/// visible fragment of the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    form: FormState,
    job: Option<JobId>,
    polling: bool,
    submit: SubmitView,
    progress: ProgressView,
    progress_running: bool,
    status_line: String,
    log: LogPanelView,
    result_url: Option<String>,
    error: Option<String>,
    notice: Option<String>,
    overlay: Option<&'static str>,
    overlay_count: usize,
    history_enabled: bool,
    history: HistoryView,
    clearing_history: bool,
    stats: StatsView,
    context_menu: Option<ContextMenuView>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status_line: STATUS_READY.to_string(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            form: self.form.clone(),
            sections: self.form.sections(),
            submit: self.submit.clone(),
            current_job: self.job.clone(),
            progress: self.progress,
            status_line: self.status_line.clone(),
            log: self.log.clone(),
            result_url: self.result_url.clone(),
            error: self.error.clone(),
            notice: self.notice.clone(),
            overlay: self.overlay.map(|message| OverlayView {
                message,
                status_text: self.status_line.clone(),
                percent: self.progress.percent,
                animated: self.progress_running,
            }),
            history: self.history.clone(),
            clear_history_enabled: self.history_enabled && !self.clearing_history,
            stats: self.stats.clone(),
            context_menu: self.context_menu.clone(),
            dirty: self.dirty,
        }
    }

    /// The job id last handed out by the backend. It survives terminal
    /// outcomes and is only dropped by a full reset.
    pub fn current_job(&self) -> Option<&JobId> {
        self.job.as_ref()
    }

    /// The job currently being polled, if any.
    pub fn active_job(&self) -> Option<&JobId> {
        self.job.as_ref().filter(|_| self.polling)
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    pub fn history_enabled(&self) -> bool {
        self.history_enabled
    }

    /// Returns true if state changed since the last call, then clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.mark_dirty();
        &mut self.form
    }

    pub(crate) fn form(&self) -> &FormState {
        &self.form
    }

    pub(crate) fn submit(&self) -> &SubmitView {
        &self.submit
    }

    pub(crate) fn set_history_enabled(&mut self, enabled: bool) {
        self.history_enabled = enabled;
        self.history = if enabled {
            HistoryView::Loading
        } else {
            HistoryView::Disabled
        };
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
        self.mark_dirty();
    }

    pub(crate) fn set_status_line(&mut self, text: impl Into<String>) {
        self.status_line = text.into();
        self.mark_dirty();
    }

    /// Renders the status line, adding the queue position when both counters
    /// are known.
    pub(crate) fn set_status_with_queue(
        &mut self,
        message: Option<&str>,
        queue: Option<(u32, u32)>,
    ) {
        let text = match (non_empty(message), queue) {
            (message, Some((position, total))) => format!(
                "{} (Position {position} von {total})",
                message.unwrap_or(STATUS_QUEUED)
            ),
            (Some(message), None) => message.to_string(),
            (None, None) => STATUS_PLACEHOLDER.to_string(),
        };
        self.set_status_line(text);
    }

    pub(crate) fn paint_progress(
        &mut self,
        value: f64,
        is_error: bool,
        is_running: bool,
        is_queued: bool,
    ) {
        self.progress = ProgressView::paint(value, is_error, is_running, is_queued);
        self.progress_running = is_running;
        self.mark_dirty();
    }

    /// Appends a client-side note to the log panel.
    pub(crate) fn append_log(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.log.text.push_str(line);
        self.log.text.push('\n');
        self.log.scroll_to_end = true;
        self.mark_dirty();
    }

    /// Replaces the log panel with the backend's full log.
    pub(crate) fn replace_log(&mut self, lines: &[String]) {
        self.log.text = lines.join("\n");
        self.log.text.push('\n');
        self.log.scroll_to_end = true;
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, raw: Option<&str>) {
        let text = translate_error(raw);
        self.error = Some(text.clone());
        self.set_status_line(STATUS_FAILED);
        let current = f64::from(self.progress.percent);
        self.paint_progress(current, true, false, false);
        self.append_log(&format!("Fehler angezeigt: {text}"));
    }

    pub(crate) fn show_result(&mut self, url: &str) {
        self.result_url = Some(url.to_string());
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn show_overlay(&mut self) {
        let message = OVERLAY_MESSAGES[self.overlay_count % OVERLAY_MESSAGES.len()];
        self.overlay_count = self.overlay_count.wrapping_add(1);
        self.overlay = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn hide_overlay(&mut self) {
        self.overlay = None;
        self.mark_dirty();
    }

    /// Baseline "ready" representation. Drops the current job and stops
    /// polling.
    pub(crate) fn reset_ui(&mut self, effects: &mut Vec<Effect>) {
        self.submit = SubmitView::idle();
        self.error = None;
        self.result_url = None;
        self.notice = None;
        self.log = LogPanelView::default();
        self.set_status_line(STATUS_READY);
        self.paint_progress(0.0, false, false, false);
        self.job = None;
        self.hide_overlay();
        self.stop_polling(effects);
        panel_debug!("UI state reset");
    }

    pub(crate) fn set_processing(&mut self, starting: bool) {
        self.submit.enabled = false;
        self.error = None;
        self.set_status_line(STATUS_SENDING);
        if starting {
            self.result_url = None;
            self.log = LogPanelView::default();
            self.paint_progress(0.0, false, false, false);
        }
    }

    pub(crate) fn show_busy_submit(&mut self) {
        self.submit = SubmitView {
            enabled: false,
            busy: true,
        };
        self.mark_dirty();
    }

    pub(crate) fn restore_submit(&mut self) {
        self.submit = SubmitView::idle();
        self.mark_dirty();
    }

    pub(crate) fn start_polling(&mut self, job_id: JobId, effects: &mut Vec<Effect>) {
        self.job = Some(job_id.clone());
        self.polling = true;
        self.show_busy_submit();
        panel_info!("Polling started for job {}", job_id);
        effects.push(Effect::StartPolling {
            job_id: job_id.clone(),
        });
        effects.push(Effect::FetchStatus { job_id });
    }

    pub(crate) fn stop_polling(&mut self, effects: &mut Vec<Effect>) {
        if self.polling {
            self.polling = false;
            effects.push(Effect::StopPolling);
            panel_info!("Polling stopped");
            self.mark_dirty();
        }
    }

    /// Forces the timer off even when the flag already says it is stopped.
    pub(crate) fn cancel_timer(&mut self, effects: &mut Vec<Effect>) {
        self.polling = false;
        effects.push(Effect::StopPolling);
    }

    pub(crate) fn request_history(&mut self, effects: &mut Vec<Effect>) {
        if !self.history_enabled {
            return;
        }
        self.history = HistoryView::Loading;
        self.mark_dirty();
        effects.push(Effect::FetchHistory);
    }

    pub(crate) fn apply_history(&mut self, result: Result<Vec<HistoryEntry>, String>) {
        if !self.history_enabled {
            return;
        }
        self.history = match result {
            Ok(entries) if entries.is_empty() => HistoryView::Empty,
            Ok(entries) => HistoryView::Rows(entries.iter().map(HistoryRowView::from_entry).collect()),
            Err(error) => HistoryView::Failed(error),
        };
        self.mark_dirty();
    }

    pub(crate) fn apply_stats(&mut self, stats: StatsSummary) {
        let or_placeholder = |value: Option<String>| {
            value.unwrap_or_else(|| crate::history::NOT_AVAILABLE.to_string())
        };
        self.stats = StatsView {
            total_jobs: or_placeholder(stats.total_jobs.map(|total| total.to_string())),
            average_duration: or_placeholder(
                stats.average_duration_seconds.map(|avg| avg.to_string()),
            ),
            total_size: or_placeholder(stats.total_size),
        };
        self.mark_dirty();
    }

    pub(crate) fn begin_clear_history(&mut self) -> bool {
        if !self.history_enabled || self.clearing_history {
            return false;
        }
        self.clearing_history = true;
        self.mark_dirty();
        true
    }

    pub(crate) fn finish_clear_history(&mut self, cleared: bool) {
        self.clearing_history = false;
        if cleared {
            self.history = HistoryView::Cleared;
        }
        self.mark_dirty();
    }

    /// Captures a history link for the context menu. Returns false when the
    /// target is not a link.
    pub(crate) fn open_context_menu(
        &mut self,
        row: usize,
        column: LinkColumn,
        x: i32,
        y: i32,
    ) -> bool {
        let url = self
            .history
            .rows()
            .get(row)
            .and_then(|entry| entry.cell(column).href())
            .map(ToOwned::to_owned);
        match url {
            Some(url) => {
                self.context_menu = Some(ContextMenuView { url, x, y });
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_context_menu(&mut self) -> Option<ContextMenuView> {
        let menu = self.context_menu.take();
        if menu.is_some() {
            self.mark_dirty();
        }
        menu
    }
}
