use panel_logging::{panel_debug, panel_info, panel_warn};

use crate::job::non_empty;
use crate::state::{STATUS_DONE, STATUS_SUBMITTED};
use crate::{
    AppState, ContextAction, Effect, Msg, StatusFetch, StatusFlags, StatusSnapshot,
};

pub const BUSY_NOTICE: &str =
    "Bitte warte, bis der aktuelle Auftrag abgeschlossen ist, bevor du einen neuen startest.";
pub const JOB_EXPIRED: &str = "Auftrag nicht gefunden (möglicherweise zu alt).";
pub const STATUS_UNCLEAR: &str = "Auftrag beendet, aber Status unklar.";
pub const COPY_FAILED: &str = "Kopieren fehlgeschlagen.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::Started { history_enabled } => {
            state.set_history_enabled(history_enabled);
            state.reset_ui(&mut effects);
            state.request_history(&mut effects);
            effects.push(Effect::FetchStats);
        }
        Msg::UrlChanged(url) => state.form_mut().url = url,
        Msg::PlatformSelected(platform) => state.form_mut().platform = platform,
        Msg::FormatSelected(format) => state.form_mut().yt_format = format,
        Msg::Mp3BitrateSelected(bitrate) => state.form_mut().mp3_bitrate = bitrate,
        Msg::Mp4QualitySelected(quality) => state.form_mut().mp4_quality = quality,
        Msg::CodecSelected(codec) => state.form_mut().codec_preference = codec,
        Msg::SubmitClicked => submit(&mut state, &mut effects),
        Msg::StartAccepted { job_id, message } => {
            let message = non_empty(message.as_deref()).map(ToOwned::to_owned);
            state.set_status_line(message.as_deref().unwrap_or(STATUS_SUBMITTED));
            state.append_log(&format!(
                "Auftrag {job_id} gestartet: {}",
                message.as_deref().unwrap_or_default()
            ));
            state.start_polling(job_id, &mut effects);
        }
        Msg::StartRejected { error } => {
            panel_warn!("Submission failed: {}", error);
            state.reset_ui(&mut effects);
            state.show_error(Some(&format!("Fehler beim Start: {error}")));
        }
        Msg::PollDue { job_id } => match state.current_job() {
            None => state.cancel_timer(&mut effects),
            Some(_) if !state.is_polling() => state.cancel_timer(&mut effects),
            Some(current) if *current != job_id => {
                panel_debug!("Ignoring tick for replaced job {}", job_id);
            }
            Some(_) => effects.push(Effect::FetchStatus { job_id }),
        },
        Msg::StatusFetched { job_id, result } => {
            if state.active_job() != Some(&job_id) {
                panel_debug!("Dropping stale status for job {}", job_id);
            } else {
                apply_status(&mut state, result, &mut effects);
            }
        }
        Msg::HistoryLoaded(result) => {
            if let Err(error) = &result {
                panel_warn!("Loading history failed: {}", error);
            }
            state.apply_history(result);
        }
        Msg::StatsLoaded(Ok(stats)) => state.apply_stats(stats),
        Msg::StatsLoaded(Err(error)) => {
            // Previous values stay on screen.
            panel_warn!("Loading stats failed: {}", error);
        }
        Msg::ClearHistoryConfirmed => {
            if state.begin_clear_history() {
                effects.push(Effect::ClearHistory);
            }
        }
        Msg::HistoryCleared(Ok(())) => {
            state.finish_clear_history(true);
            state.append_log("Verlauf erfolgreich gelöscht.");
            panel_info!("History cleared");
        }
        Msg::HistoryCleared(Err(error)) => {
            state.finish_clear_history(false);
            state.show_error(Some(&format!("Fehler beim Löschen: {error}")));
        }
        Msg::HistoryLinkRightClicked { row, column, x, y } => {
            state.open_context_menu(row, column, x, y);
        }
        Msg::ContextMenuAction(action) => {
            if let Some(menu) = state.take_context_menu() {
                match action {
                    ContextAction::OpenInNewTab => effects.push(Effect::OpenUrl { url: menu.url }),
                    ContextAction::CopyToClipboard => {
                        effects.push(Effect::CopyToClipboard { url: menu.url });
                        state.append_log("URL aus History kopiert.");
                    }
                }
            }
        }
        Msg::ClickedElsewhere => {
            state.take_context_menu();
        }
        Msg::ClipboardCopied(Ok(())) => state.append_log("Link kopiert."),
        Msg::ClipboardCopied(Err(error)) => {
            panel_warn!("Copy to clipboard failed: {}", error);
            state.set_notice(Some(COPY_FAILED.to_string()));
        }
        Msg::DismissNotice => state.set_notice(None),
        Msg::NoOp => {}
    }

    (state, effects)
}

fn submit(state: &mut AppState, effects: &mut Vec<Effect>) {
    if state.is_polling() {
        panel_warn!("Submission rejected while job is active");
        state.set_notice(Some(BUSY_NOTICE.to_string()));
        return;
    }
    if !state.submit().enabled {
        // A start request is already in flight.
        return;
    }
    state.reset_ui(effects);
    state.set_processing(true);
    state.show_overlay();
    let fields = state.form().to_fields();
    effects.push(Effect::StartDownload { fields });
}

fn apply_status(state: &mut AppState, result: StatusFetch, effects: &mut Vec<Effect>) {
    match result {
        StatusFetch::NotFound { error } => {
            state.show_error(Some(non_empty(error.as_deref()).unwrap_or(JOB_EXPIRED)));
            state.stop_polling(effects);
            state.hide_overlay();
            state.restore_submit();
        }
        StatusFetch::Failed(error) => {
            state.stop_polling(effects);
            state.reset_ui(effects);
            state.append_log(&format!("Polling fehlgeschlagen: {error}"));
            state.show_error(Some(&format!("Polling-Fehler: {error}.")));
        }
        StatusFetch::Snapshot(snapshot) => reconcile(state, snapshot, effects),
    }
}

fn reconcile(state: &mut AppState, snapshot: StatusSnapshot, effects: &mut Vec<Effect>) {
    if let Some(logs) = &snapshot.logs {
        state.replace_log(logs);
    }

    let flags = StatusFlags::from_snapshot(&snapshot);
    state.paint_progress(
        snapshot.progress.unwrap_or(0.0),
        flags.error,
        flags.running,
        flags.queued,
    );

    let queue = match (flags.queued, snapshot.position, snapshot.total_queued) {
        (true, Some(position), Some(total)) => Some((position, total)),
        _ => None,
    };
    state.set_status_with_queue(snapshot.message.as_deref(), queue);

    if flags.is_terminal() {
        state.stop_polling(effects);
        state.hide_overlay();

        let error = non_empty(snapshot.error.as_deref());
        let message = non_empty(snapshot.message.as_deref());
        if flags.error {
            state.show_error(error.or(message));
        } else if flags.completed {
            state.set_status_line(STATUS_DONE);
            state.paint_progress(100.0, false, false, false);
            if let Some(url) = non_empty(snapshot.result_url.as_deref()) {
                state.show_result(url);
            }
            state.request_history(effects);
            effects.push(Effect::FetchStats);
        } else {
            state.show_error(Some(error.or(message).unwrap_or(STATUS_UNCLEAR)));
        }
        state.restore_submit();
    } else if (flags.running || flags.queued) && state.submit().enabled {
        state.show_busy_submit();
    }
}
