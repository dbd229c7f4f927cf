use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps { num: 30, den: 0 }.validate().is_err());
}

#[test]
fn secs_round_to_nearest_frame() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(3.0), 90);
    assert_eq!(fps.secs_to_frames_round(5.0), 150);
    assert_eq!(fps.secs_to_frames_round(0.5), 15);
    // 0.8s * 30 = 24.000000000000004 in f64; rounding absorbs the error
    assert_eq!(fps.secs_to_frames_round(0.8), 24);
    assert_eq!(fps.secs_to_frames_round(0.1), 3);
}

#[test]
fn negative_and_nan_seconds_map_to_zero_frames() {
    let fps = Fps::default();
    assert_eq!(fps.secs_to_frames_round(-2.0), 0);
    assert_eq!(fps.secs_to_frames_round(f64::NAN), 0);
}

#[test]
fn ntsc_rate_rounds_per_frame() {
    let fps = Fps::new(30_000, 1001).unwrap();
    assert_eq!(fps.secs_to_frames_round(10.0), 300);
    assert!((fps.frames_to_secs(300) - 10.01).abs() < 1e-9);
}

#[test]
fn default_format_is_uhd_30() {
    let f = OutputFormat::default();
    assert_eq!((f.width, f.height), (3840, 2160));
    assert_eq!(f.fps, Fps { num: 30, den: 1 });
    f.validate().unwrap();
}
