use super::*;
use crate::{
    composition::model::OutputPreset, layout::measure::FixedAdvanceMeasurer, schedule::cue::Cue,
};

fn comp() -> CaptionComposition {
    CaptionComposition::new(
        OutputPreset::Landscape1920x1080,
        vec![
            Cue::new(0.0, 3.0, "abcd").with_secondary("short"),
            Cue::new(3.0, 6.0, "a much longer primary line").with_secondary("x"),
        ],
    )
}

#[test]
fn unmeasured_session_uses_fallback_width() {
    let session = CaptionSession::new(comp(), SessionOpts::default()).unwrap();
    let f = session.eval_frame(FrameIndex(10)).unwrap();
    assert_eq!(f.captions.len(), 1);
    assert_eq!(f.captions[0].layout.measured_width, None);
    assert_eq!(f.captions[0].layout.target_width, 1824.0);
}

#[test]
fn measuring_updates_layout() {
    let session = CaptionSession::new(comp(), SessionOpts::default()).unwrap();
    let mut m = FixedAdvanceMeasurer { advance_em: 0.5 };
    assert_eq!(session.measure_pending(&mut m).unwrap(), 2);
    assert_eq!(session.measure_pending(&mut m).unwrap(), 0);

    // "abcd" at 90px * 0.5em = 180px, below the 0.6 ratio floor.
    let f = session.eval_frame(FrameIndex(10)).unwrap();
    assert_eq!(f.captions[0].layout.measured_width, Some(180.0));
    assert_eq!(f.captions[0].layout.target_width, 1094.0);

    // 26 chars * 45px = 1170px wins over the floor.
    let f = session.eval_frame(FrameIndex(200)).unwrap();
    assert_eq!(f.captions[0].layout.target_width, 1170.0);
}

#[test]
fn resize_requests_remeasure_until_released() {
    let mut session = CaptionSession::new(comp(), SessionOpts::default()).unwrap();
    let mut m = FixedAdvanceMeasurer::default();
    session.measure_pending(&mut m).unwrap();

    assert_eq!(session.observed_count(), 2);
    assert_eq!(session.notify_resize(), 2);
    assert_eq!(session.measure_pending(&mut m).unwrap(), 2);

    session.release_observers();
    assert_eq!(session.observed_count(), 0);
    assert_eq!(session.notify_resize(), 0);
    assert_eq!(session.measure_pending(&mut m).unwrap(), 0);
}

#[test]
fn parallel_range_matches_sequential() {
    let seq = CaptionSession::new(comp(), SessionOpts::default()).unwrap();
    let par = CaptionSession::new(
        comp(),
        SessionOpts {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    let range = FrameRange::new(FrameIndex(0), seq.duration()).unwrap();
    let a = seq.eval_range(range).unwrap();
    let b = par.eval_range(range).unwrap();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.frame, y.frame);
        assert_eq!(x.captions.len(), y.captions.len());
        for (cx, cy) in x.captions.iter().zip(&y.captions) {
            assert_eq!(cx.cue_index, cy.cue_index);
            assert_eq!(cx.opacity, cy.opacity);
        }
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = CaptionSession::new(
        comp(),
        SessionOpts {
            parallel: true,
            threads: Some(0),
        },
    )
    .err()
    .unwrap();
    assert!(matches!(err, CuecastError::Validation(_)));
}

#[test]
fn invalid_composition_is_rejected() {
    let mut c = comp();
    c.canvas.height = 0;
    assert!(CaptionSession::new(c, SessionOpts::default()).is_err());
}
