use crate::{
    plan::model::{LowerThird, Shot},
    planning::config::LowerThirdConfig,
    scene::classifier::{Area, KeywordTable},
};

/// Emit a caption on every shot whose area differs from the previous shot's.
/// The first shot always gets one.
pub fn detect_lower_thirds(
    shots: &[&Shot],
    keywords: &KeywordTable,
    cfg: &LowerThirdConfig,
) -> Vec<LowerThird> {
    let mut out = Vec::new();
    let mut last_area: Option<Area> = None;
    for shot in shots {
        let area = keywords.area(&shot.scene);
        if last_area == Some(area) {
            continue;
        }
        out.push(LowerThird {
            shot_id: shot.id.clone(),
            text: label_from_scene(&shot.scene, cfg.label_words),
            position: cfg.position,
            appear_at_sec: cfg.appear_at_sec,
            duration_sec: cfg.duration_sec,
        });
        last_area = Some(area);
    }
    out
}

/// First `words` whitespace-separated words of the scene, trailing punctuation dropped.
pub fn label_from_scene(scene: &str, words: usize) -> String {
    let label = scene.split_whitespace().take(words).collect::<Vec<_>>().join(" ");
    label
        .trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | '-'))
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/planning/lower_thirds.rs"]
mod tests;
