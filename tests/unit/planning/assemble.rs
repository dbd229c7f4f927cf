use super::*;
use crate::plan::model::{INTRO_SHOT_ID, ShotStatus, TransitionKind};

fn two_shots() -> Vec<Shot> {
    vec![
        Shot::approved("a", 1, "Street facade at dusk", 10.0),
        Shot::approved("b", 2, "Open-plan kitchen", 5.0),
    ]
}

#[test]
fn proportional_example_lays_out_contiguously() {
    let plan = generate_montage_plan("Harbor View", &two_shots(), 30.0).unwrap();
    assert_eq!(plan.timeline.len(), 2);
    assert!((plan.timeline[0].duration_sec - 20.0).abs() < 1e-9);
    assert!((plan.timeline[1].duration_sec - 10.0).abs() < 1e-9);
    assert_eq!(plan.timeline[0].start_sec, 3.0);
    assert!((plan.timeline[1].start_sec - 23.0).abs() < 1e-9);
    assert!((plan.clips_end_sec() - 33.0).abs() < 1e-9);
    assert!((plan.span_sec() - 37.0).abs() < 1e-9);
}

#[test]
fn stretched_clips_get_motion_and_shortened_clips_get_trim() {
    let plan = generate_montage_plan("p", &two_shots(), 30.0).unwrap();
    assert_eq!(plan.timeline[0].motion_effect, Some(MotionEffect::SlowZoomIn));
    assert_eq!(plan.timeline[0].trim_end_sec, None);

    let plan = generate_montage_plan("p", &two_shots(), 6.0).unwrap();
    // 4s and 2s out of 10s and 5s of source
    assert!((plan.timeline[0].trim_end_sec.unwrap() - 4.0).abs() < 1e-9);
    assert!((plan.timeline[1].trim_end_sec.unwrap() - 2.0).abs() < 1e-9);
    assert!(plan.timeline.iter().all(|e| e.motion_effect.is_none()));
}

#[test]
fn exact_fit_has_no_treatment() {
    let plan = generate_montage_plan("p", &two_shots(), 15.0).unwrap();
    for e in &plan.timeline {
        assert_eq!(e.trim_end_sec, None);
        assert_eq!(e.motion_effect, None);
    }
}

#[test]
fn stretched_aerial_pans() {
    let shots = vec![Shot::approved("a", 0, "Drone orbit of the tower", 4.0)];
    let plan = generate_montage_plan("p", &shots, 12.0).unwrap();
    assert_eq!(plan.timeline[0].motion_effect, Some(MotionEffect::SlowPan));
}

#[test]
fn filters_unapproved_and_sorts_by_order() {
    let shots = vec![
        Shot::approved("late", 9, "Bedroom", 5.0),
        Shot::approved("skip", 0, "Lobby", 5.0).with_status(ShotStatus::Rejected),
        Shot::approved("early", 1, "Facade", 5.0),
        Shot::approved("pending", 2, "Pool", 5.0).with_status(ShotStatus::Pending),
    ];
    let plan = generate_montage_plan("p", &shots, 20.0).unwrap();
    let ids: Vec<&str> = plan.timeline.iter().map(|e| e.shot_id.as_str()).collect();
    assert_eq!(ids, ["early", "late"]);
    assert_eq!(plan.transitions.len(), plan.timeline.len());
    assert_eq!(plan.transitions[0].from_shot_id, INTRO_SHOT_ID);
    assert_eq!(plan.transitions[0].to_shot_id, "early");
    assert_eq!(plan.transitions[1].from_shot_id, "early");
}

#[test]
fn zero_approved_shots_is_a_precondition_error() {
    let err = generate_montage_plan("p", &[], 30.0).unwrap_err();
    assert!(matches!(err, MontageError::Precondition(_)));

    let shots = vec![Shot::approved("a", 0, "Lobby", 5.0).with_status(ShotStatus::Pending)];
    let err = generate_montage_plan("p", &shots, 30.0).unwrap_err();
    assert!(matches!(err, MontageError::Precondition(_)));
}

#[test]
fn bad_durations_fail_with_descriptive_errors() {
    let err = generate_montage_plan("p", &two_shots(), f64::NAN).unwrap_err();
    assert!(matches!(err, MontageError::Validation(_)));

    let mut shots = two_shots();
    shots[1].duration = 0.0;
    let err = generate_montage_plan("p", &shots, 30.0).unwrap_err();
    assert!(err.to_string().contains("'b'"));
}

#[test]
fn unapproved_shot_with_bad_duration_is_ignored() {
    let mut shots = two_shots();
    shots.push(
        Shot::approved("broken", 3, "Lobby", f64::NAN).with_status(ShotStatus::Rejected),
    );
    assert!(generate_montage_plan("p", &shots, 30.0).is_ok());
}

#[test]
fn duplicate_approved_ids_are_rejected() {
    let shots = vec![
        Shot::approved("a", 1, "Street facade", 4.0),
        Shot::approved("a", 2, "Lobby", 4.0),
    ];
    let err = generate_montage_plan("p", &shots, 20.0).unwrap_err();
    assert!(matches!(err, MontageError::Validation(_)));
    assert!(err.to_string().contains("'a'"));

    // A rejected take sharing the id never reaches the timeline.
    let mut shots = two_shots();
    shots.push(Shot::approved("a", 3, "Lobby", 4.0).with_status(ShotStatus::Rejected));
    let plan = generate_montage_plan("p", &shots, 30.0).unwrap();
    plan.validate().unwrap();
}

#[test]
fn fixed_blocks_come_from_config() {
    let plan = generate_montage_plan("Harbor View", &two_shots(), 30.0).unwrap();
    assert_eq!(plan.version, PLAN_VERSION);
    assert_eq!(plan.format.width, 3840);
    assert_eq!(plan.motion_graphics.intro.title, "Harbor View");
    assert_eq!(plan.motion_graphics.intro.duration_sec, 3.0);
    assert_eq!(plan.motion_graphics.outro.title, "Harbor View");
    assert_eq!(plan.motion_graphics.outro.duration_sec, 4.0);
    assert_eq!(plan.audio.music.ducked_gain_db, -28.0);
    assert_eq!(plan.style.preset, "luxury_minimal");
    assert_eq!(plan.timeline[1].clip_file, "montage/normalized/b.mp4");
    assert_eq!(plan.motion_graphics.lower_thirds.len(), 2);
}

#[test]
fn custom_config_changes_timing_not_algorithm() {
    let mut cfg = MontageConfig::default();
    cfg.intro_duration_sec = 1.0;
    cfg.transitions.first_after_intro.kind = TransitionKind::Cut;
    cfg.transitions.first_after_intro.duration_sec = 0.0;
    let planner = MontagePlanner::new(cfg).unwrap();
    let plan = planner.plan("p", &two_shots(), 30.0).unwrap();
    assert_eq!(plan.timeline[0].start_sec, 1.0);
    assert_eq!(plan.transitions[0].kind, TransitionKind::Cut);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut cfg = MontageConfig::default();
    cfg.min_clip_duration_sec = -1.0;
    assert!(MontagePlanner::new(cfg).is_err());
}

#[test]
fn probe_feeds_voiceover_length() {
    let probe = |path: &Path| -> MontageResult<f64> {
        assert_eq!(path, Path::new("audio/voiceover.mp3"));
        Ok(30.0)
    };
    let plan = MontagePlanner::default()
        .plan_with_probe("p", &two_shots(), Path::new("audio/voiceover.mp3"), &probe)
        .unwrap();
    assert!((plan.clips_end_sec() - 33.0).abs() < 1e-9);
}

#[test]
fn probe_errors_propagate() {
    let probe = |_: &Path| -> MontageResult<f64> { Err(MontageError::validation("no audio")) };
    let err = MontagePlanner::default()
        .plan_with_probe("p", &two_shots(), Path::new("x.mp3"), &probe)
        .unwrap_err();
    assert!(err.to_string().contains("no audio"));
}

#[test]
fn identical_inputs_give_identical_plans() {
    let a = generate_montage_plan("p", &two_shots(), 27.3).unwrap();
    let b = generate_montage_plan("p", &two_shots(), 27.3).unwrap();
    assert_eq!(a, b);
}
