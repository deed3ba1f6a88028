use super::*;

#[test]
fn defaults_at_60_fps() {
    let fps = Fps::integer(60).unwrap();
    let cfg = TimingConfig::default();
    assert_eq!(cfg.gap_frames(fps), 6);
    assert_eq!(cfg.outro_frames(fps), 120);

    let fade = cfg.fade_params(fps);
    assert_eq!(fade.fade_in_frames, 14);
    assert_eq!(fade.fade_out_frames, 18);
    assert_eq!(fade.outro_frames, 120);
    assert_eq!(fade.ease, Ease::Standard);
}

#[test]
fn negative_seconds_clamp_to_zero_frames() {
    let fps = Fps::integer(30).unwrap();
    let cfg = TimingConfig {
        gap_seconds: -1.0,
        outro_seconds: -3.0,
        ..TimingConfig::default()
    };
    assert_eq!(cfg.gap_frames(fps), 0);
    assert_eq!(cfg.outro_frames(fps), 0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: TimingConfig = serde_json::from_str(r#"{"gap_seconds": 0.25}"#).unwrap();
    assert_eq!(cfg.gap_seconds, 0.25);
    assert_eq!(cfg.outro_seconds, 2.0);
    assert!(cfg.pre_roll);
    assert_eq!(cfg.fade_in_frames, 14);
}
