//! Job progress bar drawn with indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use panel_core::{JobId, ProgressTone, ProgressView};

const TICK: Duration = Duration::from_millis(120);

/// Progress bar for one job. Success and error tones leave the bar on
/// screen as the job's final line.
pub struct JobProgressBar {
    job_id: JobId,
    tone: Option<ProgressTone>,
    bar: ProgressBar,
}

impl JobProgressBar {
    pub fn new(job_id: JobId, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        Self {
            job_id,
            tone: None,
            bar: ProgressBar::with_draw_target(Some(100), target),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn update(&mut self, progress: ProgressView, status: &str) {
        if self.tone != Some(progress.tone) {
            self.bar.set_style(style_for(progress.tone));
            if progress.tone == ProgressTone::Active {
                self.bar.enable_steady_tick(TICK);
            } else {
                self.bar.disable_steady_tick();
            }
            self.tone = Some(progress.tone);
        }
        self.bar.set_position(u64::from(progress.percent));
        self.bar.set_message(status.to_string());
        match progress.tone {
            ProgressTone::Success => self.bar.finish(),
            ProgressTone::Danger => self.bar.abandon(),
            _ => {}
        }
    }

    /// Runs `write` with the bar cleared so printed lines do not tear it.
    pub fn suspend<R>(&self, write: impl FnOnce() -> R) -> R {
        self.bar.suspend(write)
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

fn style_for(tone: ProgressTone) -> ProgressStyle {
    let template = match tone {
        ProgressTone::Active => "{spinner:.yellow} [{bar:30.blue/white}] {pos:>3}% {msg}",
        ProgressTone::Queued => "⏳ [{bar:30.white/white}] {pos:>3}% {msg}",
        ProgressTone::Success => "✓ [{bar:30.green/white}] {pos:>3}% {msg}",
        ProgressTone::Danger => "✗ [{bar:30.red/white}] {pos:>3}% {msg}",
        ProgressTone::Neutral => "  [{bar:30}] {pos:>3}% {msg}",
    };
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
