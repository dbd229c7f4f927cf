use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::OutputFormat;
use crate::foundation::error::{MontageError, MontageResult};
use crate::plan::model::{
    AudioMix, LowerThirdPosition, MusicTrack, StyleBlock, TransitionKind, VoiceoverTrack,
};
use crate::scene::classifier::KeywordTable;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A transition kind and its length.
pub struct TransitionChoice {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Length in seconds.
    pub duration_sec: f64,
}

impl TransitionChoice {
    /// Shorthand constructor.
    pub const fn new(kind: TransitionKind, duration_sec: f64) -> Self {
        Self { kind, duration_sec }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Transition used by each selector rule, in rule priority order.
pub struct TransitionTimings {
    /// Into the first clip, out of the intro card.
    pub first_after_intro: TransitionChoice,
    /// Into an aerial shot.
    pub aerial: TransitionChoice,
    /// Into a detail shot.
    pub detail: TransitionChoice,
    /// Between an interior and an exterior shot.
    pub area_change: TransitionChoice,
    /// Everything else.
    pub default: TransitionChoice,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            first_after_intro: TransitionChoice::new(TransitionKind::Fade, 0.5),
            aerial: TransitionChoice::new(TransitionKind::Fade, 0.5),
            detail: TransitionChoice::new(TransitionKind::Cut, 0.0),
            area_change: TransitionChoice::new(TransitionKind::Crossfade, 0.8),
            default: TransitionChoice::new(TransitionKind::Crossfade, 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Lower-third caption placement.
pub struct LowerThirdConfig {
    /// Offset from the parent clip start.
    pub appear_at_sec: f64,
    /// On-screen time.
    pub duration_sec: f64,
    /// Screen anchor.
    pub position: LowerThirdPosition,
    /// Number of leading scene words used as the caption.
    pub label_words: usize,
}

impl Default for LowerThirdConfig {
    fn default() -> Self {
        Self {
            appear_at_sec: 0.5,
            duration_sec: 3.0,
            position: LowerThirdPosition::BottomLeft,
            label_words: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Animation presets of the intro and outro cards.
pub struct CardConfig {
    /// Intro card animation.
    pub intro_animation: String,
    /// Outro card animation.
    pub outro_animation: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            intro_animation: "fade_in".to_string(),
            outro_animation: "fade_out".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Where the normalization step leaves each approved shot.
pub struct ClipNaming {
    /// Directory relative to the project root.
    pub dir: String,
    /// File extension without the dot.
    pub extension: String,
}

impl ClipNaming {
    /// `<dir>/<shot_id>.<extension>`.
    pub fn clip_file(&self, shot_id: &str) -> String {
        let dir = self.dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{shot_id}.{}", self.extension)
        } else {
            format!("{dir}/{shot_id}.{}", self.extension)
        }
    }
}

impl Default for ClipNaming {
    fn default() -> Self {
        Self {
            dir: "montage/normalized".to_string(),
            extension: "mp4".to_string(),
        }
    }
}

fn default_audio() -> AudioMix {
    AudioMix {
        voiceover: VoiceoverTrack {
            file: "audio/voiceover.mp3".to_string(),
            gain_db: 0.0,
        },
        music: MusicTrack {
            file: "audio/music.mp3".to_string(),
            gain_db: -18.0,
            ducked_gain_db: -28.0,
            duck_fade_ms: 500,
        },
    }
}

fn default_style() -> StyleBlock {
    let tokens = [
        ("headingFont", "Playfair Display"),
        ("bodyFont", "Inter"),
        ("primaryColor", "#FFFFFF"),
        ("accentColor", "#C9A96E"),
        ("backgroundColor", "#0B0B0B"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
    .collect::<BTreeMap<_, _>>();
    StyleBlock {
        preset: "luxury_minimal".to_string(),
        tokens,
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Every tunable constant of plan synthesis.
///
/// All fields default, so a JSON config only needs the values it overrides.
pub struct MontageConfig {
    /// Intro card length; not part of the allocated budget.
    pub intro_duration_sec: f64,
    /// Outro card length; not part of the allocated budget.
    pub outro_duration_sec: f64,
    /// Shortest watchable clip.
    pub min_clip_duration_sec: f64,
    /// Tolerance for budget and duration comparisons.
    pub budget_epsilon_sec: f64,
    /// Output format written into the plan.
    pub format: OutputFormat,
    /// Transition rule table.
    pub transitions: TransitionTimings,
    /// Caption placement.
    pub lower_thirds: LowerThirdConfig,
    /// Card animations.
    pub cards: CardConfig,
    /// Audio block copied into every plan.
    pub audio: AudioMix,
    /// Style block copied into every plan.
    pub style: StyleBlock,
    /// Clip path convention.
    pub clips: ClipNaming,
    /// Scene vocabulary.
    pub keywords: KeywordTable,
}

impl Default for MontageConfig {
    fn default() -> Self {
        Self {
            intro_duration_sec: 3.0,
            outro_duration_sec: 4.0,
            min_clip_duration_sec: 2.0,
            budget_epsilon_sec: 1e-6,
            format: OutputFormat::default(),
            transitions: TransitionTimings::default(),
            lower_thirds: LowerThirdConfig::default(),
            cards: CardConfig::default(),
            audio: default_audio(),
            style: default_style(),
            clips: ClipNaming::default(),
            keywords: KeywordTable::default(),
        }
    }
}

impl MontageConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> MontageResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MontageError::serde(format!("parse montage config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MontageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open montage config JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would make synthesis produce a corrupt plan.
    pub fn validate(&self) -> MontageResult<()> {
        for (name, v) in [
            ("intro_duration_sec", self.intro_duration_sec),
            ("outro_duration_sec", self.outro_duration_sec),
            ("budget_epsilon_sec", self.budget_epsilon_sec),
            ("lower_thirds.appear_at_sec", self.lower_thirds.appear_at_sec),
            ("transitions.first_after_intro", self.transitions.first_after_intro.duration_sec),
            ("transitions.aerial", self.transitions.aerial.duration_sec),
            ("transitions.detail", self.transitions.detail.duration_sec),
            ("transitions.area_change", self.transitions.area_change.duration_sec),
            ("transitions.default", self.transitions.default.duration_sec),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MontageError::validation(format!(
                    "config {name} must be finite and >= 0"
                )));
            }
        }
        if !self.min_clip_duration_sec.is_finite() || self.min_clip_duration_sec <= 0.0 {
            return Err(MontageError::validation(
                "config min_clip_duration_sec must be finite and > 0",
            ));
        }
        if !self.lower_thirds.duration_sec.is_finite() || self.lower_thirds.duration_sec <= 0.0 {
            return Err(MontageError::validation(
                "config lower_thirds.duration_sec must be finite and > 0",
            ));
        }
        if self.lower_thirds.label_words == 0 {
            return Err(MontageError::validation(
                "config lower_thirds.label_words must be > 0",
            ));
        }
        if self.clips.extension.trim().is_empty() {
            return Err(MontageError::validation(
                "config clips.extension must be non-empty",
            ));
        }
        self.format.validate()?;
        self.keywords.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/planning/config.rs"]
mod tests;
