use std::{io::Read, rc::Rc};

use crate::{
    foundation::core::ClockMs,
    foundation::error::{SlideError, SlideResult},
    signal::trigger::SignalSource,
};

/// Which span list of a [`TimingTrack`] a signal follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Beats of the song.
    #[default]
    Beat,
    /// Chord changes.
    Chord,
    /// Lyric phrases.
    Phrase,
}

/// One timed span on the song timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedSpan {
    /// Start position in song milliseconds.
    pub start_ms: f64,
    /// Length in milliseconds (> 0).
    pub duration_ms: f64,
    /// Chord name, lyric text, or nothing for beats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TimedSpan {
    /// Position just past the span.
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Normalized position of `position_ms` inside the span, if it is inside.
    pub fn progress(&self, position_ms: f64) -> Option<f64> {
        if position_ms < self.start_ms || position_ms >= self.end_ms() {
            return None;
        }
        Some((position_ms - self.start_ms) / self.duration_ms)
    }
}

/// Song timing data: beats, chords, and lyric phrases, each sorted by start.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingTrack {
    /// Beat spans, unlabelled.
    #[serde(default)]
    pub beats: Vec<TimedSpan>,
    /// Chord spans labelled with the chord name.
    #[serde(default)]
    pub chords: Vec<TimedSpan>,
    /// Lyric phrase spans labelled with their text.
    #[serde(default)]
    pub phrases: Vec<TimedSpan>,
}

impl TimingTrack {
    /// Parse and validate a JSON track.
    pub fn from_json_str(s: &str) -> SlideResult<Self> {
        let track: Self = serde_json::from_str(s)?;
        track.validate()?;
        Ok(track)
    }

    /// Parse and validate a JSON track from a reader.
    pub fn from_reader<R: Read>(reader: R) -> SlideResult<Self> {
        let track: Self = serde_json::from_reader(reader)?;
        track.validate()?;
        Ok(track)
    }

    /// Reject negative or non-finite starts, non-positive durations, and
    /// span lists that are unsorted or overlapping.
    pub fn validate(&self) -> SlideResult<()> {
        for kind in [SpanKind::Beat, SpanKind::Chord, SpanKind::Phrase] {
            let spans = self.spans(kind);
            for (i, span) in spans.iter().enumerate() {
                if !span.start_ms.is_finite() || span.start_ms < 0.0 {
                    return Err(SlideError::validation(format!(
                        "{kind:?} span {i} start_ms must be finite and >= 0"
                    )));
                }
                if !span.duration_ms.is_finite() || span.duration_ms <= 0.0 {
                    return Err(SlideError::validation(format!(
                        "{kind:?} span {i} duration_ms must be finite and > 0"
                    )));
                }
            }
            for (i, w) in spans.windows(2).enumerate() {
                if w[0].start_ms > w[1].start_ms {
                    return Err(SlideError::validation(format!(
                        "{kind:?} spans must be sorted by start_ms"
                    )));
                }
                if w[0].end_ms() > w[1].start_ms {
                    return Err(SlideError::validation(format!(
                        "{kind:?} span {i} overlaps span {}",
                        i + 1
                    )));
                }
            }
        }
        Ok(())
    }

    /// Span list for `kind`.
    pub fn spans(&self, kind: SpanKind) -> &[TimedSpan] {
        match kind {
            SpanKind::Beat => &self.beats,
            SpanKind::Chord => &self.chords,
            SpanKind::Phrase => &self.phrases,
        }
    }

    /// Span covering `position_ms`, with its index. Gaps between spans yield `None`.
    pub fn span_at(&self, kind: SpanKind, position_ms: f64) -> Option<(usize, &TimedSpan)> {
        let spans = self.spans(kind);
        let idx = spans.partition_point(|s| s.start_ms <= position_ms);
        if idx == 0 {
            return None;
        }
        let span = &spans[idx - 1];
        span.progress(position_ms).map(|_| (idx - 1, span))
    }

    /// Normalized progress through the span covering `position_ms`.
    pub fn progress_at(&self, kind: SpanKind, position_ms: f64) -> Option<f64> {
        self.span_at(kind, position_ms)
            .and_then(|(_, span)| span.progress(position_ms))
    }

    /// Label of the span covering `position_ms`.
    pub fn label_at(&self, kind: SpanKind, position_ms: f64) -> Option<&str> {
        self.span_at(kind, position_ms)
            .and_then(|(_, span)| span.label.as_deref())
    }

    /// End of the last span across all lists (0 for an empty track).
    pub fn end_ms(&self) -> f64 {
        [&self.beats, &self.chords, &self.phrases]
            .into_iter()
            .flatten()
            .map(TimedSpan::end_ms)
            .fold(0.0, f64::max)
    }
}

/// Adapts a [`TimingTrack`] to [`SignalSource`]: song position is the clock
/// minus the playback origin.
#[derive(Clone, Debug)]
pub struct TrackSignal {
    track: Rc<TimingTrack>,
    kind: SpanKind,
    origin: ClockMs,
}

impl TrackSignal {
    pub fn new(track: Rc<TimingTrack>, kind: SpanKind, origin: ClockMs) -> Self {
        Self {
            track,
            kind,
            origin,
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    /// Song position at clock time `now`.
    pub fn position_ms(&self, now: ClockMs) -> f64 {
        now.since(self.origin)
    }
}

impl SignalSource for TrackSignal {
    fn poll(&mut self, now: ClockMs) -> Option<f64> {
        self.track.progress_at(self.kind, self.position_ms(now))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/timing.rs"]
mod tests;
