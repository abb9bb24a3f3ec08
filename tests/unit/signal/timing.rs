use super::*;

const TRACK: &str = r#"{
    "beats": [
        { "start_ms": 0, "duration_ms": 500 },
        { "start_ms": 500, "duration_ms": 500 },
        { "start_ms": 1000, "duration_ms": 500 }
    ],
    "chords": [
        { "start_ms": 0, "duration_ms": 1000, "label": "Am" },
        { "start_ms": 1000, "duration_ms": 1000, "label": "F" }
    ],
    "phrases": [
        { "start_ms": 200, "duration_ms": 300, "label": "hello" },
        { "start_ms": 900, "duration_ms": 400, "label": "world" }
    ]
}"#;

fn track() -> TimingTrack {
    TimingTrack::from_json_str(TRACK).unwrap()
}

#[test]
fn progress_is_relative_to_the_covering_span() {
    let t = track();
    assert_eq!(t.progress_at(SpanKind::Beat, 250.0), Some(0.5));
    assert_eq!(t.progress_at(SpanKind::Beat, 500.0), Some(0.0));
    assert_eq!(t.progress_at(SpanKind::Chord, 1500.0), Some(0.5));
    assert_eq!(t.progress_at(SpanKind::Beat, 1500.0), None);
}

#[test]
fn gaps_and_lead_in_have_no_progress() {
    let t = track();
    assert_eq!(t.progress_at(SpanKind::Phrase, 100.0), None);
    assert_eq!(t.progress_at(SpanKind::Phrase, 600.0), None);
    assert_eq!(t.label_at(SpanKind::Phrase, 950.0), Some("world"));
    assert_eq!(t.span_at(SpanKind::Phrase, 950.0).map(|(i, _)| i), Some(1));
}

#[test]
fn end_covers_every_list() {
    assert_eq!(track().end_ms(), 2000.0);
    assert_eq!(TimingTrack::default().end_ms(), 0.0);
}

#[test]
fn unsorted_or_empty_spans_are_rejected() {
    let unsorted = r#"{ "beats": [
        { "start_ms": 500, "duration_ms": 100 },
        { "start_ms": 0, "duration_ms": 100 }
    ] }"#;
    assert!(matches!(
        TimingTrack::from_json_str(unsorted).unwrap_err(),
        SlideError::Validation(_)
    ));

    let zero = r#"{ "chords": [ { "start_ms": 0, "duration_ms": 0 } ] }"#;
    assert!(TimingTrack::from_json_str(zero).is_err());

    assert!(matches!(
        TimingTrack::from_json_str("{ not json").unwrap_err(),
        SlideError::Serde(_)
    ));
}

#[test]
fn track_signal_offsets_by_origin() {
    let mut signal = TrackSignal::new(Rc::new(track()), SpanKind::Beat, ClockMs(10_000.0));
    assert_eq!(signal.poll(ClockMs(9_000.0)), None);
    assert_eq!(signal.poll(ClockMs(10_250.0)), Some(0.5));
    assert_eq!(signal.position_ms(ClockMs(10_250.0)), 250.0);
}

#[test]
fn overlapping_spans_are_rejected() {
    let overlapping = r#"{ "phrases": [
        { "start_ms": 0, "duration_ms": 2000, "label": "long" },
        { "start_ms": 500, "duration_ms": 100, "label": "short" }
    ] }"#;
    let err = TimingTrack::from_json_str(overlapping).unwrap_err();
    assert!(err.to_string().contains("overlaps"), "{err}");

    let touching = r#"{ "beats": [
        { "start_ms": 0, "duration_ms": 500 },
        { "start_ms": 500, "duration_ms": 500 }
    ] }"#;
    TimingTrack::from_json_str(touching).unwrap();
}
