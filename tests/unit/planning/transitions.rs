use super::*;
use crate::plan::model::TransitionKind;

fn pick(prev: Option<&str>, current: &str, first: bool) -> TransitionChoice {
    let prev = prev.map(|s| Shot::approved("p", 0, s, 5.0));
    let current = Shot::approved("c", 1, current, 5.0);
    select_transition(
        prev.as_ref(),
        &current,
        first,
        &KeywordTable::default(),
        &TransitionTimings::default(),
    )
}

#[test]
fn first_after_intro_always_fades() {
    let c = pick(None, "Close-up of the kitchen tap", true);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Fade, 0.5));
}

#[test]
fn aerial_fades() {
    let c = pick(Some("Lobby with chandelier"), "Drone shot over the pool", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Fade, 0.5));
}

#[test]
fn detail_cuts() {
    let c = pick(Some("Bedroom"), "Texture of oak flooring", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Cut, 0.0));
}

#[test]
fn aerial_outranks_detail() {
    let c = pick(Some("Bedroom"), "Aerial detail of the roof", false);
    assert_eq!(c.kind, TransitionKind::Fade);
}

#[test]
fn area_switch_crossfades_long() {
    let c = pick(Some("Street facade at dusk"), "Bright kitchen", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Crossfade, 0.8));
    let c = pick(Some("Master bedroom"), "Garden path", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Crossfade, 0.8));
}

#[test]
fn same_area_and_other_use_default() {
    let c = pick(Some("Kitchen"), "Bedroom", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Crossfade, 0.5));
    let c = pick(Some("Sunset mood"), "Bedroom", false);
    assert_eq!(c, TransitionChoice::new(TransitionKind::Crossfade, 0.5));
}

#[test]
fn build_links_shots_and_starts_from_intro() {
    let shots = [
        Shot::approved("a", 0, "Street facade", 5.0),
        Shot::approved("b", 1, "Lobby", 5.0),
        Shot::approved("c", 2, "Close-up of marble", 5.0),
    ];
    let refs: Vec<&Shot> = shots.iter().collect();
    let trs = build_transitions(&refs, &KeywordTable::default(), &TransitionTimings::default());
    assert_eq!(trs.len(), 3);
    assert_eq!(trs[0].from_shot_id, INTRO_SHOT_ID);
    assert_eq!(trs[0].to_shot_id, "a");
    assert_eq!(trs[0].kind, TransitionKind::Fade);
    assert_eq!((trs[1].from_shot_id.as_str(), trs[1].to_shot_id.as_str()), ("a", "b"));
    assert_eq!(trs[1].kind, TransitionKind::Crossfade);
    assert_eq!(trs[1].duration_sec, 0.8);
    assert_eq!(trs[2].kind, TransitionKind::Cut);
}
