//! Montage timeline planning and resolution for short real-estate marketing videos.
//!
//! The engine is two pure passes over in-memory data:
//!
//! 1. **Plan**: `approved shots + narration length -> MontagePlan` (seconds). Clip
//!    durations are allocated proportionally to source length within the narration
//!    budget; transitions, area captions, intro/outro cards, an audio mix and a style
//!    preset are added. The plan is the persisted, editable source of truth.
//! 2. **Resolve**: `MontagePlan + project root -> ResolvedPlan` (frames). Every
//!    seconds value is rounded onto the frame grid and clip paths are joined onto the
//!    project root. The resolved form is rebuilt for every render and never stored.
//!
//! Neither pass performs IO, decodes media or reads the clock; identical inputs give
//! identical outputs, so both are safe to call concurrently for unrelated projects.
//! Probing the narration length ([`DurationProbe`]), normalizing clips to
//! `montage/normalized/<shot>.<ext>` and persisting the plan belong to the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod plan;
mod planning;
mod resolve;
mod scene;

pub use foundation::core::{Fps, OutputFormat};
pub use foundation::error::{MontageError, MontageResult};
pub use plan::model::{
    AudioMix, INTRO_SHOT_ID, LowerThird, LowerThirdPosition, MontagePlan, MotionEffect,
    MotionGraphics, MusicTrack, PLAN_VERSION, Shot, ShotStatus, StyleBlock, TimelineEntry,
    TitleCard, TransitionEntry, TransitionKind, VoiceoverTrack,
};
pub use planning::allocate::allocate_durations;
pub use planning::assemble::{MontagePlanner, generate_montage_plan};
pub use planning::config::{
    CardConfig, ClipNaming, LowerThirdConfig, MontageConfig, TransitionChoice, TransitionTimings,
};
pub use planning::lower_thirds::{detect_lower_thirds, label_from_scene};
pub use planning::probe::DurationProbe;
pub use planning::transitions::{build_transitions, select_transition};
pub use resolve::frames::{
    ResolvedAudio, ResolvedCard, ResolvedClip, ResolvedLowerThird, ResolvedPlan,
    ResolvedTransition, resolve_plan, resolve_plan_at,
};
pub use scene::classifier::{Area, KeywordTable, SceneCategory, SceneTags, area, classify};
