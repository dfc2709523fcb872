use std::sync::Once;

use pretty_assertions::assert_eq;

use panel_core::{
    clamp_progress, update, AppState, Effect, JobStatus, Msg, ProgressTone, StatusFetch,
    StatusSnapshot, JOB_EXPIRED, STATUS_DONE, STATUS_FAILED, STATUS_READY, STATUS_UNCLEAR,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

fn polling(job_id: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started { history_enabled: true });
    let (state, _) = update(state, Msg::SubmitClicked);
    let (mut state, _) = update(
        state,
        Msg::StartAccepted {
            job_id: job_id.to_string(),
            message: None,
        },
    );
    state.consume_dirty();
    state
}

fn snapshot(state: AppState, job_id: &str, snapshot: StatusSnapshot) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::StatusFetched {
            job_id: job_id.to_string(),
            result: StatusFetch::Snapshot(snapshot),
        },
    )
}

fn running(progress: f64, message: &str) -> StatusSnapshot {
    StatusSnapshot {
        status: Some(JobStatus::Running),
        running: Some(true),
        progress: Some(progress),
        message: Some(message.to_string()),
        ..StatusSnapshot::default()
    }
}

#[test]
fn displayed_progress_is_rounded_and_clamped() {
    let cases = [
        (-5.0, 0),
        (0.0, 0),
        (0.4, 0),
        (0.5, 1),
        (42.6, 43),
        (99.5, 100),
        (100.0, 100),
        (250.0, 100),
        (f64::NAN, 0),
        (f64::INFINITY, 100),
    ];
    for (value, expected) in cases {
        assert_eq!(clamp_progress(value), expected, "value {value}");
    }

    let (state, _) = snapshot(polling("job-1"), "job-1", running(173.2, "Lade..."));
    assert_eq!(state.view().progress.percent, 100);
}

#[test]
fn running_snapshot_updates_progress_status_and_logs() {
    init_logging();
    let state = polling("job-1");
    let mut snap = running(42.4, "Download: 42%");
    snap.logs = Some(vec!["12:00:00 - Auftrag eingereiht.".into(), "12:00:02 - Start".into()]);

    let (mut state, effects) = snapshot(state, "job-1", snap);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.progress.percent, 42);
    assert_eq!(view.progress.tone, ProgressTone::Active);
    assert_eq!(view.status_line, "Download: 42%");
    assert_eq!(
        view.log.text,
        "12:00:00 - Auftrag eingereiht.\n12:00:02 - Start\n"
    );
    assert!(view.log.scroll_to_end);
    assert!(state.is_polling());
    assert!(state.consume_dirty());
}

#[test]
fn log_panel_is_replaced_not_appended() {
    init_logging();
    let mut first = running(10.0, "a");
    first.logs = Some(vec!["one".into(), "two".into()]);
    let (state, _) = snapshot(polling("job-1"), "job-1", first);

    let mut second = running(20.0, "b");
    second.logs = Some(vec!["three".into()]);
    let (state, _) = snapshot(state, "job-1", second);
    assert_eq!(state.view().log.text, "three\n");

    // A snapshot without logs leaves the panel alone.
    let (state, _) = snapshot(state, "job-1", running(30.0, "c"));
    assert_eq!(state.view().log.text, "three\n");
}

#[test]
fn queued_snapshot_renders_position() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Queued),
        running: Some(false),
        message: Some("Warten".into()),
        position: Some(3),
        total_queued: Some(7),
        ..StatusSnapshot::default()
    };
    let (state, effects) = snapshot(polling("job-1"), "job-1", snap);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.status_line, "Warten (Position 3 von 7)");
    assert_eq!(view.progress.tone, ProgressTone::Queued);
}

#[test]
fn queued_snapshot_without_counters_renders_message_only() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Queued),
        message: Some("Warten".into()),
        position: Some(3),
        ..StatusSnapshot::default()
    };
    let (state, _) = snapshot(polling("job-1"), "job-1", snap);
    assert_eq!(state.view().status_line, "Warten");
}

#[test]
fn missing_message_renders_placeholder() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Running),
        running: Some(true),
        ..StatusSnapshot::default()
    };
    let (state, _) = snapshot(polling("job-1"), "job-1", snap);
    assert_eq!(state.view().status_line, "...");
}

#[test]
fn submit_stays_busy_through_non_terminal_snapshots() {
    init_logging();
    let queued = StatusSnapshot {
        status: Some(JobStatus::Queued),
        running: Some(false),
        position: Some(1),
        total_queued: Some(2),
        ..StatusSnapshot::default()
    };
    let (state, _) = snapshot(polling("job-1"), "job-1", queued);
    let (state, _) = snapshot(state, "job-1", running(10.0, "Lade..."));
    let (state, _) = snapshot(state, "job-1", running(55.0, "Lade..."));

    let view = state.view();
    assert!(!view.submit.enabled);
    assert!(view.submit.busy);
    assert_eq!(view.submit.label(), "Verarbeite...");

    let done = StatusSnapshot {
        status: Some(JobStatus::Completed),
        running: Some(false),
        ..StatusSnapshot::default()
    };
    let (state, _) = snapshot(state, "job-1", done);
    let view = state.view();
    assert!(view.submit.enabled);
    assert_eq!(view.submit.label(), "Download starten");
}

#[test]
fn completed_snapshot_shows_result_and_refreshes_views() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Completed),
        running: Some(false),
        progress: Some(80.0),
        message: Some("Upload erfolgreich!".into()),
        result_url: Some("https://x/y.mp3".into()),
        ..StatusSnapshot::default()
    };
    let (state, effects) = snapshot(polling("job-1"), "job-1", snap);
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::StopPolling, Effect::FetchHistory, Effect::FetchStats]
    );
    assert_eq!(view.progress.percent, 100);
    assert_eq!(view.progress.tone, ProgressTone::Success);
    assert_eq!(view.status_line, STATUS_DONE);
    assert_eq!(view.result_url.as_deref(), Some("https://x/y.mp3"));
    assert!(view.submit.enabled);
    assert!(!view.submit.busy);
    assert!(view.overlay.is_none());
    assert_eq!(view.error, None);
    assert!(!state.is_polling());
    assert_eq!(state.active_job(), None);
}

#[test]
fn error_snapshot_shows_error_and_stops() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Error),
        running: Some(false),
        progress: Some(37.0),
        message: Some("Fehler: Video unavailable".into()),
        error: Some("ERROR: Video unavailable".into()),
        ..StatusSnapshot::default()
    };
    let (state, effects) = snapshot(polling("job-1"), "job-1", snap);
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(
        view.error.as_deref(),
        Some("Fehler: Dieses Video ist nicht (mehr) verfügbar.")
    );
    assert_eq!(view.status_line, STATUS_FAILED);
    assert_eq!(view.progress.percent, 37);
    assert_eq!(view.progress.tone, ProgressTone::Danger);
    assert!(view.submit.enabled);
    assert!(view
        .log
        .text
        .ends_with("Fehler angezeigt: Fehler: Dieses Video ist nicht (mehr) verfügbar.\n"));
}

#[test]
fn error_field_alone_counts_as_error() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::Running),
        running: Some(true),
        error: Some("disk full".into()),
        ..StatusSnapshot::default()
    };
    let (state, effects) = snapshot(polling("job-1"), "job-1", snap);
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.view().error.as_deref(), Some("disk full"));
}

#[test]
fn not_found_status_in_body_is_ambiguous_terminal() {
    init_logging();
    let snap = StatusSnapshot {
        status: Some(JobStatus::NotFound),
        ..StatusSnapshot::default()
    };
    let (state, effects) = snapshot(polling("job-1"), "job-1", snap);
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.view().error.as_deref(), Some(STATUS_UNCLEAR));
    assert!(state.view().submit.enabled);
}

#[test]
fn http_404_stops_polling_without_full_reset() {
    init_logging();
    let mut snap = running(55.0, "Lade...");
    snap.logs = Some(vec!["line".into()]);
    let (state, _) = snapshot(polling("job-1"), "job-1", snap);

    let (state, effects) = update(
        state,
        Msg::StatusFetched {
            job_id: "job-1".into(),
            result: StatusFetch::NotFound { error: None },
        },
    );
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert!(!state.is_polling());
    assert_eq!(state.current_job().map(String::as_str), Some("job-1"));
    assert_eq!(view.error.as_deref(), Some(JOB_EXPIRED));
    assert!(view.log.text.starts_with("line\n"));
    assert_eq!(view.progress.percent, 55);
    assert!(view.submit.enabled);
    assert!(view.overlay.is_none());
}

#[test]
fn http_404_uses_server_error_text() {
    init_logging();
    let (state, _) = update(
        polling("job-1"),
        Msg::StatusFetched {
            job_id: "job-1".into(),
            result: StatusFetch::NotFound {
                error: Some("Job nicht gefunden oder bereits aufgeräumt.".into()),
            },
        },
    );
    assert_eq!(
        state.view().error.as_deref(),
        Some("Job nicht gefunden oder bereits aufgeräumt.")
    );
}

#[test]
fn fetch_failure_clears_job_and_stops_timer() {
    init_logging();
    let (state, effects) = update(
        polling("job-1"),
        Msg::StatusFetched {
            job_id: "job-1".into(),
            result: StatusFetch::Failed("Status-Serverfehler: 500".into()),
        },
    );
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.current_job(), None);
    assert!(!state.is_polling());
    assert!(view.submit.enabled);
    assert_eq!(
        view.error.as_deref(),
        Some("Polling-Fehler: Status-Serverfehler: 500.")
    );
    assert!(view
        .log
        .text
        .starts_with("Polling fehlgeschlagen: Status-Serverfehler: 500\n"));
}

#[test]
fn tick_fetches_status_for_current_job() {
    init_logging();
    let (_state, effects) = update(
        polling("job-1"),
        Msg::PollDue {
            job_id: "job-1".into(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchStatus {
            job_id: "job-1".into()
        }]
    );
}

#[test]
fn tick_without_polling_cancels_timer() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PollDue {
            job_id: "job-1".into(),
        },
    );
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert!(!state.is_polling());

    // After a 404 the job id is kept but polling is off.
    let (state, _) = update(
        polling("job-2"),
        Msg::StatusFetched {
            job_id: "job-2".into(),
            result: StatusFetch::NotFound { error: None },
        },
    );
    let (_state, effects) = update(
        state,
        Msg::PollDue {
            job_id: "job-2".into(),
        },
    );
    assert_eq!(effects, vec![Effect::StopPolling]);
}

#[test]
fn stale_responses_are_dropped() {
    init_logging();
    let state = polling("job-2");
    let before = state.view();

    let (state, effects) = snapshot(state, "job-1", running(90.0, "old"));
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);

    let (state, effects) = update(
        state,
        Msg::PollDue {
            job_id: "job-1".into(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_polling());
}

#[test]
fn responses_after_stop_are_dropped() {
    init_logging();
    let (state, _) = update(
        polling("job-1"),
        Msg::StatusFetched {
            job_id: "job-1".into(),
            result: StatusFetch::NotFound { error: None },
        },
    );
    let before = state.view();
    let (state, effects) = snapshot(state, "job-1", running(10.0, "late"));
    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn reset_after_failure_returns_to_ready_on_next_start() {
    init_logging();
    let (state, _) = update(
        polling("job-1"),
        Msg::StatusFetched {
            job_id: "job-1".into(),
            result: StatusFetch::Failed("connection refused".into()),
        },
    );
    let (state, _) = update(state, Msg::Started { history_enabled: true });
    let view = state.view();
    assert_eq!(view.status_line, STATUS_READY);
    assert_eq!(view.error, None);
    assert_eq!(view.progress.percent, 0);
}
