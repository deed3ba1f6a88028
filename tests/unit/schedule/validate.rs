use super::*;

#[test]
fn well_formed_list_has_no_violations() {
    let cues = vec![
        Cue::new(0.0, 1.0, "a"),
        Cue::new(1.0, 2.0, "b"),
        Cue::new(2.5, 2.5, "c"),
    ];
    assert!(validate_cues(&cues).is_empty());
    assert!(ensure_valid_cues(&cues).is_ok());
}

#[test]
fn reports_negative_start_and_duration() {
    let cues = vec![Cue::new(-1.0, 1.0, "a"), Cue::new(3.0, 2.0, "b")];
    assert_eq!(
        validate_cues(&cues),
        vec![
            CueViolation::NegativeStart {
                index: 0,
                start: -1.0
            },
            CueViolation::NegativeDuration {
                index: 1,
                start: 3.0,
                end: 2.0
            },
        ]
    );
}

#[test]
fn reports_overlap_and_unsorted() {
    let cues = vec![
        Cue::new(0.0, 2.0, "a"),
        Cue::new(1.5, 3.0, "overlaps a"),
        Cue::new(1.0, 4.0, "starts before b"),
    ];
    assert_eq!(
        validate_cues(&cues),
        vec![
            CueViolation::Overlap {
                index: 1,
                previous_end: 2.0,
                start: 1.5
            },
            CueViolation::Unsorted {
                index: 2,
                previous_start: 1.5,
                start: 1.0
            },
        ]
    );
}

#[test]
fn non_finite_times_skip_other_checks() {
    let cues = vec![Cue::new(0.0, 1.0, "a"), Cue::new(f64::NAN, 5.0, "nan")];
    let v = validate_cues(&cues);
    assert_eq!(v.len(), 1);
    assert!(matches!(v[0], CueViolation::NonFiniteTime { index: 1, .. }));
    assert_eq!(v[0].index(), 1);
}

#[test]
fn strict_check_joins_messages() {
    let cues = vec![Cue::new(1.0, 2.0, "a"), Cue::new(1.5, 2.5, "b")];
    let err = ensure_valid_cues(&cues).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("validation error:"));
    assert!(msg.contains("cue 1"));
    assert!(msg.contains("overlaps"));
}
