use std::io::{self, Write};

use panel_core::{AppViewModel, FormState, HistoryView, LinkCell, SectionVisibility, StatsView};

use crate::progress::JobProgressBar;

/// Writes the parts of the view model that changed since the last frame.
/// Job progress goes to an indicatif bar; everything else is printed
/// through it as plain lines.
pub struct Renderer<W: Write> {
    out: W,
    show_bar: bool,
    bar: Option<JobProgressBar>,
    last: Option<AppViewModel>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, show_bar: bool) -> Self {
        Self {
            out,
            show_bar,
            bar: None,
            last: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        let last = self.last.take();
        let changed = |pick: &dyn Fn(&AppViewModel) -> bool| match &last {
            Some(previous) => pick(previous),
            None => true,
        };
        let mut lines = Vec::new();

        if changed(&|prev| prev.form != view.form) && !view.form.url.is_empty() {
            lines.push(form_line(&view.form, view.sections));
        }
        if let Some(overlay) = &view.overlay {
            if changed(&|prev| prev.overlay.as_ref().map(|o| o.message) != Some(overlay.message)) {
                lines.push(format!("» {}", overlay.message));
            }
        }

        let previous_log = last.as_ref().map(|prev| prev.log.text.as_str()).unwrap_or("");
        if view.log.text != previous_log {
            lines.extend(
                fresh_log_lines(previous_log, &view.log.text)
                    .into_iter()
                    .map(|line| format!("  | {line}")),
            );
        }

        self.sync_bar(view.current_job.as_deref());
        let progress_changed = changed(&|prev| {
            prev.status_line != view.status_line || prev.progress != view.progress
        });
        if let Some(bar) = &mut self.bar {
            if progress_changed {
                bar.update(view.progress, &view.status_line);
                if bar.is_hidden() {
                    lines.push(format!("{:>3}% {}", view.progress.percent, view.status_line));
                }
            }
        }

        if let Some(error) = &view.error {
            if changed(&|prev| prev.error.as_ref() != Some(error)) {
                lines.push(format!("✗ {error}"));
            }
        }
        if let Some(notice) = &view.notice {
            if changed(&|prev| prev.notice.as_ref() != Some(notice)) {
                lines.push(format!("! {notice}"));
            }
        }
        if let Some(url) = &view.result_url {
            if changed(&|prev| prev.result_url.as_ref() != Some(url)) {
                lines.push(format!("✓ Download: {url}"));
            }
        }

        if view.history != HistoryView::Disabled && changed(&|prev| prev.history != view.history) {
            history_lines(&view.history, &mut lines);
        }
        if view.stats != StatsView::default() && changed(&|prev| prev.stats != view.stats) {
            lines.push(stats_line(&view.stats));
        }

        self.last = Some(view.clone());
        self.print(&lines)
    }

    /// Prints `line` without disturbing the progress bar.
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.print(&[line.to_string()])
    }

    /// Keeps one bar per job; a new or cleared job retires the old bar.
    fn sync_bar(&mut self, job_id: Option<&str>) {
        if self.bar.as_ref().map(JobProgressBar::job_id) == job_id {
            return;
        }
        if let Some(old) = self.bar.take() {
            if !old.is_finished() {
                old.clear();
            }
        }
        self.bar = job_id.map(|id| JobProgressBar::new(id.to_string(), self.show_bar));
    }

    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let out = &mut self.out;
        let mut write = || -> io::Result<()> {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            out.flush()
        };
        match &self.bar {
            Some(bar) => bar.suspend(write),
            None => write(),
        }
    }
}

/// Lines of `current` not already shown from `previous`. The backend keeps
/// a rolling window, so the tail of the old log may have become the head
/// of the new one.
fn fresh_log_lines<'a>(previous: &str, current: &'a str) -> Vec<&'a str> {
    let old: Vec<&str> = previous.lines().collect();
    let new: Vec<&str> = current.lines().collect();
    let overlap = (0..=old.len().min(new.len()))
        .rev()
        .find(|&len| old[old.len() - len..] == new[..len])
        .unwrap_or(0);
    new[overlap..].to_vec()
}

fn form_line(form: &FormState, sections: SectionVisibility) -> String {
    let mut line = format!("{} -> {}", form.url.trim(), form.platform);
    if sections.youtube_options {
        line.push_str(&format!(" ({})", form.yt_format.as_str()));
    }
    if sections.mp3_quality {
        line.push_str(&format!(", Bitrate {}", form.mp3_bitrate));
    }
    if sections.mp4_quality {
        line.push_str(&format!(", Qualität {}", form.mp4_quality));
    }
    if sections.codec_options {
        line.push_str(&format!(", Codec {}", form.codec_preference));
    }
    line
}

fn stats_line(stats: &StatsView) -> String {
    format!(
        "Aufträge: {} | Ø Dauer: {} s | Gesamtgröße: {}",
        stats.total_jobs, stats.average_duration, stats.total_size
    )
}

fn history_lines(history: &HistoryView, lines: &mut Vec<String>) {
    lines.push("Verlauf:".to_string());
    if let Some(placeholder) = history.placeholder() {
        lines.push(format!("  {placeholder}"));
        return;
    }
    for (index, row) in history.rows().iter().enumerate() {
        lines.push(format!(
            "  [{index}] {} | {} | {} | {} | {}",
            row.timestamp,
            row.platform,
            row.title,
            cell_text(&row.source),
            cell_text(&row.result)
        ));
    }
}

fn cell_text(cell: &LinkCell) -> &str {
    match cell {
        LinkCell::Link { text, .. } => text,
        LinkCell::Text(text) => text,
    }
}
