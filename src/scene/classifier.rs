use std::collections::BTreeMap;

use crate::foundation::error::{MontageError, MontageResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Keyword category a scene description can be tagged with.
pub enum SceneCategory {
    /// Drone, aerial and panorama shots.
    Aerial,
    /// Facades, streets, pools, parks and other outdoor cues.
    Exterior,
    /// Lobbies, kitchens, bedrooms, hallways and other indoor cues.
    Interior,
    /// Close-ups, textures and material details.
    Detail,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Category flags for one scene; categories are not mutually exclusive.
pub struct SceneTags {
    /// Matched an exterior keyword.
    pub is_exterior: bool,
    /// Matched an interior keyword.
    pub is_interior: bool,
    /// Matched an aerial keyword.
    pub is_aerial: bool,
    /// Matched a detail keyword.
    pub is_detail: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Coarse physical area of a shot, used for caption and transition decisions.
pub enum Area {
    /// Indoors.
    Interior,
    /// Outdoors.
    Exterior,
    /// Neither set of keywords matched.
    Other,
}

impl Area {
    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interior => "interior",
            Self::Exterior => "exterior",
            Self::Other => "other",
        }
    }
}

const AERIAL_KEYWORDS: &[&str] = &[
    "aerial",
    "drone",
    "panorama",
    "panoramic",
    "bird's eye",
    "birds-eye",
    "bird's-eye",
    "flyover",
    "fly-over",
    "skyline",
];

const EXTERIOR_KEYWORDS: &[&str] = &[
    "exterior",
    "facade",
    "façade",
    "street",
    "pool",
    "park",
    "garden",
    "courtyard",
    "entrance",
    "building",
    "outside",
    "outdoor",
    "terrace",
    "balcony",
    "rooftop",
    "yard",
    "landscape",
    "aerial",
    "drone",
    "panorama",
];

const INTERIOR_KEYWORDS: &[&str] = &[
    "interior",
    "lobby",
    "kitchen",
    "bedroom",
    "hallway",
    "living room",
    "living area",
    "bathroom",
    "dining",
    "apartment",
    "inside",
    "indoor",
    "corridor",
    "lounge",
    "gym",
    "office",
    "staircase",
    "closet",
];

const DETAIL_KEYWORDS: &[&str] = &[
    "detail",
    "close-up",
    "closeup",
    "close up",
    "texture",
    "macro",
    "fixture",
    "material",
    "handle",
];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Category -> substring keywords. Matching is case-insensitive.
///
/// The default table holds the real-estate vocabulary; replace it through
/// [`crate::MontageConfig::keywords`] to extend or localize without touching
/// the classifier.
pub struct KeywordTable {
    entries: BTreeMap<SceneCategory, Vec<String>>,
}

impl KeywordTable {
    /// Empty table; every scene classifies as nothing/`other`.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Replace the keyword list for `category`.
    pub fn with_category<I, S>(mut self, category: SceneCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(category, keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Keywords registered for `category` (empty when unset).
    pub fn keywords(&self, category: SceneCategory) -> &[String] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reject blank keywords; a blank keyword would match every scene.
    pub fn validate(&self) -> MontageResult<()> {
        for (category, keywords) in &self.entries {
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(MontageError::validation(format!(
                    "keyword table entry {category:?} contains a blank keyword"
                )));
            }
        }
        Ok(())
    }

    /// True when any keyword of `category` occurs in `scene`, ignoring case.
    pub fn matches(&self, category: SceneCategory, scene: &str) -> bool {
        let haystack = scene.to_lowercase();
        self.keywords(category)
            .iter()
            .any(|k| haystack.contains(&k.to_lowercase()))
    }

    /// Tag a scene description with every matching category.
    pub fn classify(&self, scene: &str) -> SceneTags {
        SceneTags {
            is_exterior: self.matches(SceneCategory::Exterior, scene),
            is_interior: self.matches(SceneCategory::Interior, scene),
            is_aerial: self.matches(SceneCategory::Aerial, scene),
            is_detail: self.matches(SceneCategory::Detail, scene),
        }
    }

    /// Coarse area of a scene. Interior wins over exterior when both match.
    pub fn area(&self, scene: &str) -> Area {
        let tags = self.classify(scene);
        if tags.is_interior {
            Area::Interior
        } else if tags.is_exterior {
            Area::Exterior
        } else {
            Area::Other
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::empty()
            .with_category(SceneCategory::Aerial, AERIAL_KEYWORDS.iter().copied())
            .with_category(SceneCategory::Exterior, EXTERIOR_KEYWORDS.iter().copied())
            .with_category(SceneCategory::Interior, INTERIOR_KEYWORDS.iter().copied())
            .with_category(SceneCategory::Detail, DETAIL_KEYWORDS.iter().copied())
    }
}

/// Classify with the default keyword table.
pub fn classify(scene: &str) -> SceneTags {
    KeywordTable::default().classify(scene)
}

/// Area of a scene under the default keyword table.
pub fn area(scene: &str) -> Area {
    KeywordTable::default().area(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/classifier.rs"]
mod tests;
