use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::OutputFormat;
use crate::foundation::error::{MontageError, MontageResult};

/// Schema version written into every [`MontagePlan`].
pub const PLAN_VERSION: u32 = 1;

/// `fromShotId` of the transition leading out of the intro card.
pub const INTRO_SHOT_ID: &str = "intro";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Review status of a shot in the project store.
pub enum ShotStatus {
    /// Accepted for the montage.
    Approved,
    /// Awaiting review.
    Pending,
    /// Rejected by the reviewer.
    Rejected,
    /// Any status this engine does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One camera take as stored upstream. Read-only to this engine.
pub struct Shot {
    /// Stable shot identifier.
    pub id: String,
    /// Position in the edit; sorting key, independent of array position.
    pub order: i64,
    /// Free-text scene description.
    pub scene: String,
    /// Source clip duration in seconds.
    pub duration: f64,
    /// Review status; only approved shots are planned.
    pub status: ShotStatus,
}

impl Shot {
    /// Convenience constructor for an approved shot.
    pub fn approved(
        id: impl Into<String>,
        order: i64,
        scene: impl Into<String>,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            order,
            scene: scene.into(),
            duration,
            status: ShotStatus::Approved,
        }
    }

    /// Same shot with a different status.
    pub fn with_status(mut self, status: ShotStatus) -> Self {
        self.status = status;
        self
    }

    /// True when the shot takes part in planning.
    pub fn is_approved(&self) -> bool {
        self.status == ShotStatus::Approved
    }

    /// Parse a JSON array of shots from disk.
    pub fn list_from_path(path: impl AsRef<Path>) -> MontageResult<Vec<Shot>> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open shots JSON '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| MontageError::serde(format!("parse shots JSON: {e}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Visual treatment bridging two consecutive clips.
///
/// The planner only emits the named kinds. Hand-edited plans may carry any
/// other renderer transition name; it is kept verbatim in [`Self::Other`].
pub enum TransitionKind {
    /// Hard cut.
    Cut,
    /// Fade through black.
    Fade,
    /// Cross-dissolve between clips.
    Crossfade,
    /// Directional wipe.
    Wipe,
    /// Any other renderer transition, e.g. `"dissolve"`.
    #[serde(untagged)]
    Other(String),
}

impl TransitionKind {
    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cut => "cut",
            Self::Fade => "fade",
            Self::Crossfade => "crossfade",
            Self::Wipe => "wipe",
            Self::Other(name) => name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Camera move applied to a clip stretched beyond its source duration.
pub enum MotionEffect {
    /// Slow push-in.
    SlowZoomIn,
    /// Slow pull-out.
    SlowZoomOut,
    /// Slow horizontal pan.
    SlowPan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Screen anchor of a lower-third caption.
pub enum LowerThirdPosition {
    /// Bottom-left corner.
    #[default]
    BottomLeft,
    /// Bottom-center.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Placement of one shot in the edit.
pub struct TimelineEntry {
    /// Source shot id.
    pub shot_id: String,
    /// Clip path relative to the project root.
    pub clip_file: String,
    /// Timeline start in seconds.
    pub start_sec: f64,
    /// Allocated screen time in seconds.
    pub duration_sec: f64,
    /// Source time at which to cut the tail, when the clip is shortened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_end_sec: Option<f64>,
    /// Camera move filling the extra time, when the clip is stretched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_effect: Option<MotionEffect>,
}

impl TimelineEntry {
    /// Timeline end in seconds.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Transition played as `to_shot_id` begins.
pub struct TransitionEntry {
    /// Previous shot id, or [`INTRO_SHOT_ID`] for the first clip.
    pub from_shot_id: String,
    /// Target shot id.
    pub to_shot_id: String,
    /// Transition kind.
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Transition length in seconds.
    pub duration_sec: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Fixed intro or outro card.
pub struct TitleCard {
    /// Card title (project name).
    pub title: String,
    /// Card length in seconds.
    pub duration_sec: f64,
    /// Animation preset name, interpreted by the renderer.
    pub animation: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Caption overlay anchored to a shot.
pub struct LowerThird {
    /// Parent shot id.
    pub shot_id: String,
    /// Caption text.
    pub text: String,
    /// Screen anchor.
    pub position: LowerThirdPosition,
    /// Offset from the parent clip start, in seconds.
    pub appear_at_sec: f64,
    /// On-screen time in seconds.
    pub duration_sec: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Intro/outro cards and captions.
pub struct MotionGraphics {
    /// Opening card.
    pub intro: TitleCard,
    /// Area captions, in timeline order.
    pub lower_thirds: Vec<LowerThird>,
    /// Closing card.
    pub outro: TitleCard,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Narration track.
pub struct VoiceoverTrack {
    /// Audio path relative to the project root.
    pub file: String,
    /// Gain in dB.
    pub gain_db: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Background music track, ducked under narration.
pub struct MusicTrack {
    /// Audio path relative to the project root.
    pub file: String,
    /// Base gain in dB.
    pub gain_db: f64,
    /// Gain in dB while narration plays.
    pub ducked_gain_db: f64,
    /// Fade time into and out of the ducked level, in milliseconds.
    pub duck_fade_ms: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Audio mix directives.
pub struct AudioMix {
    /// Narration.
    pub voiceover: VoiceoverTrack,
    /// Background music.
    pub music: MusicTrack,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual style preset. Tokens are passed through untouched.
pub struct StyleBlock {
    /// Preset name.
    pub preset: String,
    /// Typography and color tokens.
    #[serde(default, flatten)]
    pub tokens: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Seconds-based edit plan; the persisted source of truth for a render.
pub struct MontagePlan {
    /// Schema version ([`PLAN_VERSION`]).
    pub version: u32,
    /// Project display name.
    pub project_name: String,
    /// Output resolution and frame rate.
    pub format: OutputFormat,
    /// Clip placements in play order.
    pub timeline: Vec<TimelineEntry>,
    /// One transition per timeline entry.
    pub transitions: Vec<TransitionEntry>,
    /// Cards and captions.
    pub motion_graphics: MotionGraphics,
    /// Audio mix.
    pub audio: AudioMix,
    /// Style preset.
    pub style: StyleBlock,
}

impl MontagePlan {
    /// Parse a plan from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MontageResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MontageError::serde(format!("parse montage plan JSON: {e}")))
    }

    /// Parse a plan from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MontageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open montage plan JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> MontageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MontageError::serde(format!("serialize montage plan: {e}")))
    }

    /// End of the last clip in seconds (intro end when the timeline is empty).
    pub fn clips_end_sec(&self) -> f64 {
        self.timeline
            .last()
            .map_or(self.motion_graphics.intro.duration_sec, TimelineEntry::end_sec)
    }

    /// Total span: intro, clips and outro.
    pub fn span_sec(&self) -> f64 {
        self.clips_end_sec() + self.motion_graphics.outro.duration_sec
    }

    /// Structural checks. Run before resolving a plan that may have been edited
    /// after synthesis.
    pub fn validate(&self) -> MontageResult<()> {
        if self.version != PLAN_VERSION {
            return Err(MontageError::validation(format!(
                "unsupported plan version {} (expected {PLAN_VERSION})",
                self.version
            )));
        }
        self.format.validate()?;

        if self.timeline.is_empty() {
            return Err(MontageError::validation("plan timeline must be non-empty"));
        }
        if self.timeline.len() != self.transitions.len() {
            return Err(MontageError::validation(format!(
                "plan has {} timeline entries but {} transitions",
                self.timeline.len(),
                self.transitions.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.timeline.len());
        for entry in &self.timeline {
            if entry.shot_id.trim().is_empty() {
                return Err(MontageError::validation("timeline shotId must be non-empty"));
            }
            if !seen.insert(entry.shot_id.as_str()) {
                return Err(MontageError::validation(format!(
                    "shot '{}' appears more than once in the timeline",
                    entry.shot_id
                )));
            }
            if entry.clip_file.trim().is_empty() {
                return Err(MontageError::validation(format!(
                    "shot '{}' has an empty clipFile",
                    entry.shot_id
                )));
            }
            non_negative(entry.start_sec, &entry.shot_id, "startSec")?;
            positive(entry.duration_sec, &entry.shot_id, "durationSec")?;
            if let Some(trim) = entry.trim_end_sec {
                positive(trim, &entry.shot_id, "trimEndSec")?;
            }
        }

        if self.transitions[0].from_shot_id != INTRO_SHOT_ID {
            return Err(MontageError::validation(format!(
                "first transition must start from '{INTRO_SHOT_ID}', got '{}'",
                self.transitions[0].from_shot_id
            )));
        }
        for tr in &self.transitions {
            non_negative(tr.duration_sec, &tr.to_shot_id, "transition durationSec")?;
        }

        let mg = &self.motion_graphics;
        non_negative(mg.intro.duration_sec, "intro", "durationSec")?;
        non_negative(mg.outro.duration_sec, "outro", "durationSec")?;
        for lt in &mg.lower_thirds {
            non_negative(lt.appear_at_sec, &lt.shot_id, "lowerThird appearAtSec")?;
            positive(lt.duration_sec, &lt.shot_id, "lowerThird durationSec")?;
        }

        Ok(())
    }
}

fn non_negative(v: f64, owner: &str, field: &str) -> MontageResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(MontageError::validation(format!(
            "'{owner}' {field} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

fn positive(v: f64, owner: &str, field: &str) -> MontageResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MontageError::validation(format!(
            "'{owner}' {field} must be finite and > 0 (got {v})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plan/model.rs"]
mod tests;
