/// Visual treatment of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressTone {
    #[default]
    Neutral,
    /// Job is running; the indicator animates.
    Active,
    Queued,
    Success,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub percent: u8,
    pub tone: ProgressTone,
}

impl ProgressView {
    pub fn paint(value: f64, is_error: bool, is_running: bool, is_queued: bool) -> Self {
        let percent = clamp_progress(value);
        let tone = if is_error {
            ProgressTone::Danger
        } else if is_queued {
            ProgressTone::Queued
        } else if percent == 100 && !is_running {
            ProgressTone::Success
        } else if is_running {
            ProgressTone::Active
        } else {
            ProgressTone::Neutral
        };
        Self { percent, tone }
    }
}

/// Rounds and clamps a reported progress value into `0..=100`.
pub fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}
