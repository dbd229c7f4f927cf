use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    foundation::core::Fps,
    foundation::error::{MontageError, MontageResult},
    plan::model::{LowerThirdPosition, MontagePlan, MotionEffect, TitleCard, TransitionKind},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// A clip placed on the frame grid.
pub struct ResolvedClip {
    /// Source shot id.
    pub shot_id: String,
    /// Clip path joined onto the project root.
    pub file: PathBuf,
    /// First frame on the output timeline.
    pub start_frame: u64,
    /// Length in frames.
    pub duration_frames: u64,
    /// Source trim point in seconds, passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_end_sec: Option<f64>,
    /// Camera move, passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_effect: Option<MotionEffect>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// A transition overlaid on the start of its target clip.
pub struct ResolvedTransition {
    /// Previous shot id or `"intro"`.
    pub from_shot_id: String,
    /// Target shot id.
    pub to_shot_id: String,
    /// Transition kind.
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Start frame; equal to the target clip's start frame.
    pub start_frame: u64,
    /// Length in frames.
    pub duration_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// A caption placed on the frame grid.
pub struct ResolvedLowerThird {
    /// Parent shot id.
    pub shot_id: String,
    /// Caption text.
    pub text: String,
    /// Screen anchor.
    pub position: LowerThirdPosition,
    /// Parent clip start frame plus the appear offset.
    pub appear_at_frame: u64,
    /// Length in frames.
    pub duration_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Intro or outro card on the frame grid.
pub struct ResolvedCard {
    /// Card title.
    pub title: String,
    /// Animation preset.
    pub animation: String,
    /// First frame.
    pub start_frame: u64,
    /// Length in frames.
    pub duration_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Audio directives with paths joined onto the project root.
pub struct ResolvedAudio {
    /// Narration file.
    pub voiceover_file: PathBuf,
    /// Narration gain in dB.
    pub voiceover_gain_db: f64,
    /// Music file.
    pub music_file: PathBuf,
    /// Music gain in dB.
    pub music_gain_db: f64,
    /// Music gain under narration in dB.
    pub music_ducked_gain_db: f64,
    /// Ducking fade in milliseconds.
    pub duck_fade_ms: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Frame-exact render schedule derived from a [`MontagePlan`].
///
/// Rebuilt on every render request and never persisted.
pub struct ResolvedPlan {
    /// Frame rate the schedule was resolved at.
    pub fps: Fps,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Opening card.
    pub intro: ResolvedCard,
    /// Clips in play order.
    pub clips: Vec<ResolvedClip>,
    /// One transition per clip.
    pub transitions: Vec<ResolvedTransition>,
    /// Captions.
    pub lower_thirds: Vec<ResolvedLowerThird>,
    /// Closing card, starting where the last clip ends.
    pub outro: ResolvedCard,
    /// Audio directives.
    pub audio: ResolvedAudio,
    /// Last clip end plus the outro.
    pub total_duration_frames: u64,
}

/// Resolve `plan` at its own output frame rate.
pub fn resolve_plan(plan: &MontagePlan, project_root: &Path) -> MontageResult<ResolvedPlan> {
    resolve_plan_at(plan, plan.format.fps, project_root)
}

/// Convert every seconds field of `plan` to frames at `fps` (`round(sec * fps)`).
///
/// Clip files are `project_root` joined with each entry's relative `clipFile`.
/// Their existence is not checked: the normalization step guarantees them and
/// a missing file surfaces at render time.
///
/// The total trusts that clips are contiguous and ends at the last clip plus
/// the outro; transitions and captions are overlays and never extend it.
#[tracing::instrument(skip(plan, project_root), fields(clips = plan.timeline.len()))]
pub fn resolve_plan_at(
    plan: &MontagePlan,
    fps: Fps,
    project_root: &Path,
) -> MontageResult<ResolvedPlan> {
    fps.validate()?;
    plan.validate()?;

    let to_frames = |secs: f64| fps.secs_to_frames_round(secs);

    let clips: Vec<ResolvedClip> = plan
        .timeline
        .iter()
        .map(|e| ResolvedClip {
            shot_id: e.shot_id.clone(),
            file: project_root.join(&e.clip_file),
            start_frame: to_frames(e.start_sec),
            duration_frames: to_frames(e.duration_sec),
            trim_end_sec: e.trim_end_sec,
            motion_effect: e.motion_effect,
        })
        .collect();

    let clip_starts: HashMap<&str, u64> = clips
        .iter()
        .map(|c| (c.shot_id.as_str(), c.start_frame))
        .collect();
    let start_of = |shot_id: &str, what: &str| {
        clip_starts.get(shot_id).copied().ok_or_else(|| {
            MontageError::resolution(format!(
                "{what} references shot '{shot_id}' which is not on the timeline"
            ))
        })
    };

    let transitions = plan
        .transitions
        .iter()
        .map(|t| -> MontageResult<ResolvedTransition> {
            Ok(ResolvedTransition {
                from_shot_id: t.from_shot_id.clone(),
                to_shot_id: t.to_shot_id.clone(),
                kind: t.kind.clone(),
                start_frame: start_of(&t.to_shot_id, "transition")?,
                duration_frames: to_frames(t.duration_sec),
            })
        })
        .collect::<MontageResult<Vec<_>>>()?;

    let lower_thirds = plan
        .motion_graphics
        .lower_thirds
        .iter()
        .map(|lt| -> MontageResult<ResolvedLowerThird> {
            Ok(ResolvedLowerThird {
                shot_id: lt.shot_id.clone(),
                text: lt.text.clone(),
                position: lt.position,
                appear_at_frame: add_frames(
                    start_of(&lt.shot_id, "lower third")?,
                    to_frames(lt.appear_at_sec),
                    "lower third",
                )?,
                duration_frames: to_frames(lt.duration_sec),
            })
        })
        .collect::<MontageResult<Vec<_>>>()?;

    let clips_end = match clips.last() {
        Some(c) => add_frames(c.start_frame, c.duration_frames, "clip")?,
        None => 0,
    };
    let mg = &plan.motion_graphics;
    let intro = resolve_card(&mg.intro, 0, to_frames(mg.intro.duration_sec));
    let outro = resolve_card(&mg.outro, clips_end, to_frames(mg.outro.duration_sec));
    let total_duration_frames = add_frames(clips_end, outro.duration_frames, "outro")?;

    let audio = ResolvedAudio {
        voiceover_file: project_root.join(&plan.audio.voiceover.file),
        voiceover_gain_db: plan.audio.voiceover.gain_db,
        music_file: project_root.join(&plan.audio.music.file),
        music_gain_db: plan.audio.music.gain_db,
        music_ducked_gain_db: plan.audio.music.ducked_gain_db,
        duck_fade_ms: plan.audio.music.duck_fade_ms,
    };

    tracing::debug!(total_duration_frames, "plan resolved");

    Ok(ResolvedPlan {
        fps,
        width: plan.format.width,
        height: plan.format.height,
        intro,
        clips,
        transitions,
        lower_thirds,
        outro,
        audio,
        total_duration_frames,
    })
}

fn add_frames(a: u64, b: u64, what: &str) -> MontageResult<u64> {
    a.checked_add(b).ok_or_else(|| {
        MontageError::resolution(format!("{what} frame position overflows the frame counter"))
    })
}

fn resolve_card(card: &TitleCard, start_frame: u64, duration_frames: u64) -> ResolvedCard {
    ResolvedCard {
        title: card.title.clone(),
        animation: card.animation.clone(),
        start_frame,
        duration_frames,
    }
}

impl ResolvedPlan {
    /// Pretty-printed JSON handed to the renderer.
    pub fn to_json_pretty(&self) -> MontageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MontageError::serde(format!("serialize resolved plan: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/frames.rs"]
mod tests;
