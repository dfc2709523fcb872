use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use panel_core::{update, AppState, AppViewModel, ContextAction, FormState, LinkColumn, Msg,
    COPY_FAILED};
use panel_logging::{panel_debug, panel_info, panel_warn};

use crate::effects::EffectRunner;
use crate::render::Renderer;

const EVENT_WAIT: Duration = Duration::from_millis(100);

/// Owns the panel state and drives it with engine events until idle.
pub struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer<W>,
    /// Longest quiet spell tolerated while requests are outstanding.
    stall_limit: Duration,
}

impl<W: Write> App<W> {
    pub fn new(runner: EffectRunner, renderer: Renderer<W>, stall_limit: Duration) -> Self {
        Self {
            state: AppState::new(),
            runner,
            renderer,
            stall_limit,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            inbox.extend(self.runner.run(effects));
            let was_dirty = state.consume_dirty();
            let view = state.view();
            self.state = state;
            if was_dirty {
                self.renderer.render(&view)?;
            }
        }
        Ok(())
    }

    /// Pumps engine events until no request is outstanding and no job is
    /// being polled. Requests whose reply never arrives within the stall
    /// limit are given up.
    pub fn run_until_idle(&mut self) -> io::Result<()> {
        let mut quiet = Duration::ZERO;
        while self.runner.is_busy() {
            match self.runner.next_msg(EVENT_WAIT) {
                Some(msg) => {
                    quiet = Duration::ZERO;
                    self.dispatch(msg)?;
                }
                None => {
                    quiet += EVENT_WAIT;
                    if quiet >= self.stall_limit {
                        let lost = self.runner.abandon_pending();
                        panel_warn!("No reply for {quiet:?}, giving up on {lost} request(s)");
                        if !self.runner.is_busy() {
                            break;
                        }
                        quiet = Duration::ZERO;
                    }
                }
            }
        }
        panel_debug!("Panel idle");
        Ok(())
    }

    /// Loads the panel, submits `form` and follows the job to its end.
    /// Returns false when the job ended in an error.
    pub fn submit(&mut self, form: FormState, history_enabled: bool) -> anyhow::Result<bool> {
        self.dispatch(Msg::Started { history_enabled })?;
        for msg in [
            Msg::UrlChanged(form.url),
            Msg::PlatformSelected(form.platform),
            Msg::FormatSelected(form.yt_format),
            Msg::Mp3BitrateSelected(form.mp3_bitrate),
            Msg::Mp4QualitySelected(form.mp4_quality),
            Msg::CodecSelected(form.codec_preference),
            Msg::SubmitClicked,
        ] {
            self.dispatch(msg)?;
        }
        self.run_until_idle()?;

        let view = self.view();
        match view.current_job {
            Some(job_id) => panel_info!("Job {job_id} finished: {}", view.status_line),
            None => panel_info!("Submission ended without a job"),
        }
        Ok(view.error.is_none())
    }

    pub fn show_history(&mut self, history_enabled: bool) -> anyhow::Result<()> {
        self.dispatch(Msg::Started { history_enabled })?;
        self.run_until_idle()?;
        Ok(())
    }

    /// Applies a context menu action to the link in `row`.
    pub fn link_action(
        &mut self,
        row: usize,
        column: LinkColumn,
        action: ContextAction,
    ) -> anyhow::Result<()> {
        self.dispatch(Msg::HistoryLinkRightClicked {
            row,
            column,
            x: 0,
            y: 0,
        })?;
        let Some(menu) = self.view().context_menu else {
            bail!("Zeile {row} enthält keinen Link");
        };
        self.dispatch(Msg::ContextMenuAction(action))?;
        if self.view().notice.as_deref() == Some(COPY_FAILED) {
            // Manual selection fallback.
            self.write_line(&menu.url)?;
        }
        Ok(())
    }

    pub fn show_stats(&mut self) -> anyhow::Result<()> {
        self.dispatch(Msg::Started {
            history_enabled: false,
        })?;
        self.run_until_idle()?;
        Ok(())
    }

    /// Returns false when the backend refused to clear the history.
    pub fn clear_history(
        &mut self,
        confirmed: impl FnOnce() -> anyhow::Result<bool>,
    ) -> anyhow::Result<bool> {
        self.dispatch(Msg::Started {
            history_enabled: true,
        })?;
        self.run_until_idle()?;
        if !confirmed()? {
            self.write_line("Abgebrochen.")?;
            return Ok(true);
        }
        self.dispatch(Msg::ClearHistoryConfirmed)?;
        self.run_until_idle()?;
        Ok(self.view().error.is_none())
    }

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        self.renderer
            .print_line(text)
            .context("writing to stdout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{runner_with, RecordingDesktop, ScriptedBackend};
    use std::time::Instant;

    fn app_with(backend: ScriptedBackend, stall_limit: Duration) -> App<Vec<u8>> {
        let runner = runner_with(backend, RecordingDesktop::default());
        App::new(runner, Renderer::new(Vec::new(), false), stall_limit)
    }

    #[test]
    fn lost_reply_does_not_hang_the_panel() {
        panel_logging::initialize_for_tests();
        let backend = ScriptedBackend {
            panic_on_stats: true,
        };
        let mut app = app_with(backend, Duration::from_millis(300));

        let started = Instant::now();
        app.show_stats().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!app.runner.is_busy());
    }

    #[test]
    fn answered_requests_finish_before_the_stall_limit() {
        panel_logging::initialize_for_tests();
        let mut app = app_with(ScriptedBackend::default(), Duration::from_secs(30));

        let started = Instant::now();
        app.show_stats().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!app.runner.is_busy());
    }
}
