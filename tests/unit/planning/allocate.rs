use super::*;

const EPS: f64 = 1e-6;
const FRAME: f64 = 1.0 / 30.0;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn proportional_split_without_floor() {
    let out = allocate_durations(&[10.0, 5.0], 30.0, 2.0, FRAME, EPS).unwrap();
    assert_eq!(out.len(), 2);
    assert!(approx(out[0], 20.0));
    assert!(approx(out[1], 10.0));
}

#[test]
fn short_source_is_floored_and_budget_conserved() {
    let out = allocate_durations(&[100.0, 1.0], 10.0, 2.0, FRAME, EPS).unwrap();
    assert!(approx(out[1], 2.0), "second clip got {}", out[1]);
    assert!(approx(out.iter().sum::<f64>(), 10.0));
    assert!(approx(out[0], 8.0));
}

#[test]
fn residual_lands_on_first_entry_even_below_floor() {
    // raw = [2 (floored), 9.90..]; rescale floors the first again; the
    // residual then drags it under 2s.
    let out = allocate_durations(&[1.0, 100.0], 10.0, 2.0, FRAME, EPS).unwrap();
    assert!((out.iter().sum::<f64>() - 10.0).abs() < 1e-9);
    assert!(out[0] < 2.0);
    assert!(out[1] >= 2.0);
}

#[test]
fn single_clip_gets_whole_budget() {
    let out = allocate_durations(&[3.0], 12.5, 2.0, FRAME, EPS).unwrap();
    assert_eq!(out, vec![12.5]);
}

#[test]
fn floor_saturation_keeps_every_clip_at_minimum() {
    let sources = vec![4.0; 20];
    let out = allocate_durations(&sources, 15.0, 2.0, FRAME, EPS).unwrap();
    assert_eq!(out.len(), 20);
    assert!(out.iter().all(|d| approx(*d, 2.0)));
    assert!(out.iter().sum::<f64>() > 15.0);
}

#[test]
fn residual_never_shrinks_first_entry_below_one_frame() {
    // floor total 14s vs 12.01s: the residual would leave the first clip at 0.01s
    let out = allocate_durations(&[3.0; 7], 12.01, 2.0, FRAME, EPS).unwrap();
    assert!(out.iter().all(|d| approx(*d, 2.0)), "{out:?}");

    // the same residual is applied when the first entry keeps a frame
    let out = allocate_durations(&[3.0; 7], 12.01, 2.0, 0.001, EPS).unwrap();
    assert!((out[0] - 0.01).abs() < 1e-9);
    assert!((out.iter().sum::<f64>() - 12.01).abs() < 1e-9);
}

#[test]
fn order_is_preserved() {
    let out = allocate_durations(&[1.0, 2.0, 3.0, 4.0], 40.0, 2.0, FRAME, EPS).unwrap();
    assert!(approx(out[0], 4.0));
    assert!(approx(out[1], 8.0));
    assert!(approx(out[2], 12.0));
    assert!(approx(out[3], 16.0));
}

#[test]
fn empty_input_allocates_nothing() {
    assert!(allocate_durations(&[], 10.0, 2.0, FRAME, EPS).unwrap().is_empty());
}

#[test]
fn non_finite_and_non_positive_inputs_are_rejected() {
    assert!(allocate_durations(&[1.0], 0.0, 2.0, FRAME, EPS).is_err());
    assert!(allocate_durations(&[1.0], f64::INFINITY, 2.0, FRAME, EPS).is_err());
    assert!(allocate_durations(&[1.0, f64::NAN], 10.0, 2.0, FRAME, EPS).is_err());
    assert!(allocate_durations(&[1.0, -3.0], 10.0, 2.0, FRAME, EPS).is_err());
    assert!(allocate_durations(&[1.0, 0.0], 10.0, 2.0, FRAME, EPS).is_err());
    assert!(allocate_durations(&[1.0], 10.0, 0.0, FRAME, EPS).is_err());
}
