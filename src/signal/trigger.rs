use crate::{
    foundation::core::ClockMs,
    foundation::error::{SlideError, SlideResult},
};

/// Per-frame source of a normalized progress value (beat, chord or phrase
/// completion ratio). `None` means no timing information right now, e.g.
/// before playback starts or between phrases.
pub trait SignalSource {
    /// Latest progress sample in `[0, 1]`, if any.
    fn poll(&mut self, now: ClockMs) -> Option<f64>;
}

impl<F> SignalSource for F
where
    F: FnMut(ClockMs) -> Option<f64>,
{
    fn poll(&mut self, now: ClockMs) -> Option<f64> {
        self(now)
    }
}

/// How consecutive samples are compared to decide on a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TriggerMode {
    /// Fire when progress drops below the previous sample: a new span began.
    #[default]
    Wrap,
    /// Fire when progress rises across `at` (e.g. 0.5 for the off-beat).
    Crossing {
        /// Threshold in `[0, 1]`.
        at: f64,
    },
}

impl TriggerMode {
    /// Check the threshold of [`TriggerMode::Crossing`].
    pub fn validate(&self) -> SlideResult<()> {
        match *self {
            Self::Wrap => Ok(()),
            Self::Crossing { at } if (0.0..=1.0).contains(&at) => Ok(()),
            Self::Crossing { at } => Err(SlideError::validation(format!(
                "trigger crossing threshold must be in [0, 1], got {at}"
            ))),
        }
    }
}

/// Edge detector over successive progress samples.
#[derive(Clone, Debug, Default)]
pub struct ProgressTrigger {
    mode: TriggerMode,
    previous: Option<f64>,
    after_gap: bool,
}

impl ProgressTrigger {
    /// Trigger with no history.
    pub fn new(mode: TriggerMode) -> Self {
        Self {
            mode,
            previous: None,
            after_gap: false,
        }
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Feed the latest sample; returns `true` when a transition should start.
    ///
    /// A `None` sample marks a gap between spans. In [`TriggerMode::Wrap`] the
    /// first sample after a gap belongs to a new span and fires; a crossing
    /// needs two samples in the same span.
    pub fn observe(&mut self, sample: Option<f64>) -> bool {
        let Some(cur) = sample else {
            self.previous = None;
            self.after_gap = true;
            return false;
        };
        let fired = match (self.previous, self.mode) {
            (None, TriggerMode::Wrap) => self.after_gap,
            (None, TriggerMode::Crossing { .. }) => false,
            (Some(prev), TriggerMode::Wrap) => cur < prev,
            (Some(prev), TriggerMode::Crossing { at }) => prev < at && cur >= at,
        };
        self.previous = Some(cur);
        self.after_gap = false;
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/trigger.rs"]
mod tests;
