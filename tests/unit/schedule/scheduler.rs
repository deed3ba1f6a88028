use super::*;

fn fps(n: u32) -> Fps {
    Fps::integer(n).unwrap()
}

fn three_cues() -> Vec<Cue> {
    vec![
        Cue::new(0.0, 3.0, "A"),
        Cue::new(3.0, 6.0, "B"),
        Cue::new(6.0, 8.0, "C"),
    ]
}

#[test]
fn three_cue_scenario_at_60fps() {
    let s = schedule(&three_cues(), fps(60), &TimingConfig::default());
    assert_eq!(s.len(), 3);

    let froms: Vec<u64> = s.iter().map(|iv| iv.from_frame.0).collect();
    assert_eq!(froms, vec![0, 180, 360]);

    // Non-final cues lose the 6-frame gap.
    assert_eq!(s[0].duration_frames, 174);
    assert_eq!(s[1].duration_frames, 174);
    // (8 - 6) * 60 + 2 * 60
    assert_eq!(s[2].duration_frames, 240);

    assert!(s[0].is_first && !s[0].is_last);
    assert!(!s[1].is_first && !s[1].is_last);
    assert!(!s[2].is_first && s[2].is_last);
}

#[test]
fn single_cue_gets_preroll_and_outro() {
    let s = schedule(&[Cue::new(5.0, 10.0, "X")], fps(30), &TimingConfig::default());
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].from_frame, FrameIndex(0));
    // 5 * 30 + 5 * 30 (pre-roll) + 2 * 30 (outro)
    assert_eq!(s[0].duration_frames, 360);
    assert!(s[0].is_first && s[0].is_last);
}

#[test]
fn preroll_extends_first_cue_backwards() {
    let cues = vec![Cue::new(1.5, 3.0, "A"), Cue::new(3.0, 4.0, "B")];
    let s = schedule(&cues, fps(60), &TimingConfig::default());
    assert_eq!(s[0].from_frame, FrameIndex(0));
    // 90 base + 90 pre-roll - 6 gap
    assert_eq!(s[0].duration_frames, 174);
    assert_eq!(s[1].from_frame, FrameIndex(180));
}

#[test]
fn preroll_disabled_keeps_first_start() {
    let cfg = TimingConfig {
        pre_roll: false,
        ..TimingConfig::default()
    };
    let cues = vec![Cue::new(1.5, 3.0, "A"), Cue::new(3.0, 4.0, "B")];
    let s = schedule(&cues, fps(60), &cfg);
    assert_eq!(s[0].from_frame, FrameIndex(90));
    assert_eq!(s[0].duration_frames, 84);
}

#[test]
fn zero_length_cues_still_get_one_frame() {
    let cues = vec![
        Cue::new(1.0, 1.0, "a"),
        Cue::new(2.0, 2.0, "b"),
        Cue::new(3.0, 3.0, "c"),
    ];
    let s = schedule(&cues, fps(60), &TimingConfig::default());
    for iv in &s {
        assert!(iv.duration_frames >= 1);
    }
    // Interior cue: max(1, 1 - 6) floors to 1.
    assert_eq!(s[1].duration_frames, 1);
}

#[test]
fn negative_duration_is_floored_not_rejected() {
    let s = schedule(&[Cue::new(4.0, 2.0, "bad")], fps(30), &TimingConfig::default());
    // 1 + 120 pre-roll + 60 outro
    assert_eq!(s[0].duration_frames, 181);
}

#[test]
fn empty_input_yields_empty_schedule() {
    assert!(schedule(&[], fps(60), &TimingConfig::default()).is_empty());
    assert_eq!(total_duration_frames(&[], fps(60), &TimingConfig::default()), 0);
}

#[test]
fn total_duration_adds_outro() {
    let total = total_duration_frames(&three_cues(), fps(60), &TimingConfig::default());
    assert_eq!(total, 600);

    let s = schedule(&three_cues(), fps(60), &TimingConfig::default());
    assert_eq!(s[2].range().end.0, total);
}

#[test]
fn total_duration_rounds_up() {
    let cues = vec![Cue::new(0.0, 1.001, "a")];
    assert_eq!(
        total_duration_frames(&cues, fps(60), &TimingConfig::default()),
        181
    );
}

#[test]
fn interval_lookup_respects_gaps() {
    let s = schedule(&three_cues(), fps(60), &TimingConfig::default());
    assert_eq!(interval_at(&s, FrameIndex(0)).unwrap().cue_index, 0);
    assert_eq!(interval_at(&s, FrameIndex(173)).unwrap().cue_index, 0);
    // Micro-gap frames 174..180 are blank.
    assert!(interval_at(&s, FrameIndex(174)).is_none());
    assert!(interval_at(&s, FrameIndex(179)).is_none());
    assert_eq!(interval_at(&s, FrameIndex(180)).unwrap().cue_index, 1);
    assert_eq!(interval_at(&s, FrameIndex(599)).unwrap().cue_index, 2);
    assert!(interval_at(&s, FrameIndex(600)).is_none());
}

#[test]
fn local_frame_is_signed() {
    let s = schedule(&three_cues(), fps(60), &TimingConfig::default());
    assert_eq!(s[1].local_frame(FrameIndex(190)), 10);
    assert_eq!(s[1].local_frame(FrameIndex(170)), -10);
}

#[test]
fn custom_gap_and_outro() {
    let cfg = TimingConfig {
        gap_seconds: 0.5,
        outro_seconds: 0.0,
        ..TimingConfig::default()
    };
    let s = schedule(&three_cues(), fps(10), &cfg);
    assert_eq!(s[0].duration_frames, 25);
    assert_eq!(s[2].duration_frames, 20);
}
