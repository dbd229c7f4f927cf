use std::collections::HashSet;
use std::path::Path;

use crate::{
    foundation::error::{MontageError, MontageResult},
    plan::model::{
        MontagePlan, MotionEffect, MotionGraphics, PLAN_VERSION, Shot, TimelineEntry, TitleCard,
    },
    planning::{
        allocate::allocate_durations, config::MontageConfig, lower_thirds::detect_lower_thirds,
        probe::DurationProbe, transitions::build_transitions,
    },
};

/// Turns approved shots plus a narration length into a [`MontagePlan`].
///
/// Stateless apart from its configuration; identical inputs always produce an
/// identical plan.
#[derive(Clone, Debug, Default)]
pub struct MontagePlanner {
    config: MontageConfig,
}

impl MontagePlanner {
    /// Planner over a validated configuration.
    pub fn new(config: MontageConfig) -> MontageResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &MontageConfig {
        &self.config
    }

    /// Build the plan.
    ///
    /// `shots` may contain unapproved shots and be in any order; only approved
    /// shots are kept, sorted by `order` (ties keep input order).
    #[tracing::instrument(skip(self, shots), fields(shots = shots.len()))]
    pub fn plan(
        &self,
        project_name: &str,
        shots: &[Shot],
        voiceover_duration_sec: f64,
    ) -> MontageResult<MontagePlan> {
        let cfg = &self.config;

        let approved = approved_in_order(shots);
        if approved.is_empty() {
            return Err(MontageError::precondition(
                "no approved shots; nothing to montage",
            ));
        }
        if !voiceover_duration_sec.is_finite() || voiceover_duration_sec <= 0.0 {
            return Err(MontageError::validation(format!(
                "voiceover duration must be finite and > 0 (got {voiceover_duration_sec})"
            )));
        }
        let mut seen = HashSet::with_capacity(approved.len());
        for shot in &approved {
            if !seen.insert(shot.id.as_str()) {
                return Err(MontageError::validation(format!(
                    "approved shot id '{}' is used more than once",
                    shot.id
                )));
            }
            if !shot.duration.is_finite() || shot.duration <= 0.0 {
                return Err(MontageError::validation(format!(
                    "shot '{}' duration must be finite and > 0 (got {})",
                    shot.id, shot.duration
                )));
            }
        }

        let sources: Vec<f64> = approved.iter().map(|s| s.duration).collect();
        let durations = allocate_durations(
            &sources,
            voiceover_duration_sec,
            cfg.min_clip_duration_sec,
            cfg.format.fps.frame_duration_secs(),
            cfg.budget_epsilon_sec,
        )?;

        let mut timeline = Vec::with_capacity(approved.len());
        let mut cursor = cfg.intro_duration_sec;
        for (shot, &duration_sec) in approved.iter().zip(&durations) {
            let entry = self.timeline_entry(shot, cursor, duration_sec);
            tracing::debug!(
                shot_id = %shot.id,
                start_sec = entry.start_sec,
                duration_sec,
                source_sec = shot.duration,
                "clip placed"
            );
            cursor = entry.end_sec();
            timeline.push(entry);
        }

        let transitions = build_transitions(&approved, &cfg.keywords, &cfg.transitions);
        let lower_thirds = detect_lower_thirds(&approved, &cfg.keywords, &cfg.lower_thirds);

        Ok(MontagePlan {
            version: PLAN_VERSION,
            project_name: project_name.to_string(),
            format: cfg.format,
            timeline,
            transitions,
            motion_graphics: MotionGraphics {
                intro: TitleCard {
                    title: project_name.to_string(),
                    duration_sec: cfg.intro_duration_sec,
                    animation: cfg.cards.intro_animation.clone(),
                },
                lower_thirds,
                outro: TitleCard {
                    title: project_name.to_string(),
                    duration_sec: cfg.outro_duration_sec,
                    animation: cfg.cards.outro_animation.clone(),
                },
            },
            audio: cfg.audio.clone(),
            style: cfg.style.clone(),
        })
    }

    /// Probe the narration at `voiceover_path`, then [`plan`](Self::plan).
    pub fn plan_with_probe(
        &self,
        project_name: &str,
        shots: &[Shot],
        voiceover_path: &Path,
        probe: &dyn DurationProbe,
    ) -> MontageResult<MontagePlan> {
        let duration = probe.probe_duration(voiceover_path)?;
        self.plan(project_name, shots, duration)
    }

    fn timeline_entry(&self, shot: &Shot, start_sec: f64, duration_sec: f64) -> TimelineEntry {
        let eps = self.config.budget_epsilon_sec;
        let mut entry = TimelineEntry {
            shot_id: shot.id.clone(),
            clip_file: self.config.clips.clip_file(&shot.id),
            start_sec,
            duration_sec,
            trim_end_sec: None,
            motion_effect: None,
        };
        if duration_sec > shot.duration + eps {
            let aerial = self.config.keywords.classify(&shot.scene).is_aerial;
            entry.motion_effect = Some(if aerial {
                MotionEffect::SlowPan
            } else {
                MotionEffect::SlowZoomIn
            });
        } else if duration_sec < shot.duration - eps {
            entry.trim_end_sec = Some(duration_sec);
        }
        entry
    }
}

fn approved_in_order(shots: &[Shot]) -> Vec<&Shot> {
    let mut approved: Vec<&Shot> = shots.iter().filter(|s| s.is_approved()).collect();
    approved.sort_by_key(|s| s.order);
    approved
}

/// Plan with the default configuration.
pub fn generate_montage_plan(
    project_name: &str,
    shots: &[Shot],
    voiceover_duration_sec: f64,
) -> MontageResult<MontagePlan> {
    MontagePlanner::default().plan(project_name, shots, voiceover_duration_sec)
}

#[cfg(test)]
#[path = "../../tests/unit/planning/assemble.rs"]
mod tests;
