use crate::{
    plan::model::{INTRO_SHOT_ID, Shot, TransitionEntry},
    planning::config::{TransitionChoice, TransitionTimings},
    scene::classifier::{Area, KeywordTable},
};

/// Pick the transition played as `current` begins. First matching rule wins:
///
/// 1. first clip after the intro card
/// 2. `current` is aerial
/// 3. `current` is a detail shot
/// 4. interior <-> exterior switch from `prev`
/// 5. default
pub fn select_transition(
    prev: Option<&Shot>,
    current: &Shot,
    is_first_after_intro: bool,
    keywords: &KeywordTable,
    timings: &TransitionTimings,
) -> TransitionChoice {
    if is_first_after_intro {
        return timings.first_after_intro.clone();
    }

    let tags = keywords.classify(&current.scene);
    if tags.is_aerial {
        return timings.aerial.clone();
    }
    if tags.is_detail {
        return timings.detail.clone();
    }

    if let Some(prev) = prev {
        let switched = matches!(
            (keywords.area(&prev.scene), keywords.area(&current.scene)),
            (Area::Interior, Area::Exterior) | (Area::Exterior, Area::Interior)
        );
        if switched {
            return timings.area_change.clone();
        }
    }

    timings.default.clone()
}

/// One transition per shot, in order. The first leads out of the intro card.
pub fn build_transitions(
    shots: &[&Shot],
    keywords: &KeywordTable,
    timings: &TransitionTimings,
) -> Vec<TransitionEntry> {
    let mut out = Vec::with_capacity(shots.len());
    let mut prev: Option<&Shot> = None;
    for (i, shot) in shots.iter().copied().enumerate() {
        let choice = select_transition(prev, shot, i == 0, keywords, timings);
        tracing::debug!(
            shot_id = %shot.id,
            kind = choice.kind.as_str(),
            duration_sec = choice.duration_sec,
            "transition selected"
        );
        out.push(TransitionEntry {
            from_shot_id: prev.map_or_else(|| INTRO_SHOT_ID.to_string(), |p| p.id.clone()),
            to_shot_id: shot.id.clone(),
            kind: choice.kind,
            duration_sec: choice.duration_sec,
        });
        prev = Some(shot);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/planning/transitions.rs"]
mod tests;
