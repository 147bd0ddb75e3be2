//! Hero scenes: static configuration plus progress lookup.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visual {
    FloatingEquipment,
    TechnicalDiagrams,
    StatsShowcase,
    Equipment3d,
    CallToAction,
    None,
}

impl Visual {
    pub const ALL: [Visual; 6] = [
        Visual::FloatingEquipment,
        Visual::TechnicalDiagrams,
        Visual::StatsShowcase,
        Visual::Equipment3d,
        Visual::CallToAction,
        Visual::None,
    ];

    /// Tag used in markup (`data-visual="..."`).
    pub fn tag(self) -> &'static str {
        match self {
            Visual::FloatingEquipment => "floating-equipment",
            Visual::TechnicalDiagrams => "technical-diagrams",
            Visual::StatsShowcase => "stats-showcase",
            Visual::Equipment3d => "3d-equipment",
            Visual::CallToAction => "call-to-action",
            Visual::None => "none",
        }
    }
}

impl fmt::Display for Visual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Visual {
    type Err = SceneConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Visual::ALL
            .into_iter()
            .find(|v| v.tag() == s)
            .ok_or_else(|| SceneConfigError::UnknownVisual(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneContent {
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub visual: Visual,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub id: &'static str,
    /// `[start, end)`; the last scene of a set also owns `end`.
    pub start: f32,
    pub end: f32,
    pub content: SceneContent,
}

impl Scene {
    #[inline]
    pub fn contains(&self, progress: f32) -> bool {
        self.start <= progress && progress < self.end
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneConfigError {
    #[error("scene list is empty")]
    Empty,
    #[error("scene `{id}` has a non-finite or inverted interval [{start}, {end})")]
    BadInterval { id: &'static str, start: f32, end: f32 },
    #[error("scenes must start at progress 0, first starts at {0}")]
    DoesNotStartAtZero(f32),
    #[error("scenes must end at progress 1, last ends at {0}")]
    DoesNotEndAtOne(f32),
    #[error("gap or overlap between `{prev}` (ends {prev_end}) and `{next}` (starts {next_start})")]
    NotContiguous {
        prev: &'static str,
        prev_end: f32,
        next: &'static str,
        next_start: f32,
    },
    #[error("unknown visual tag `{0}`")]
    UnknownVisual(String),
}

/// Validated, ordered scene list partitioning progress `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSet {
    scenes: Vec<Scene>,
}

impl SceneSet {
    pub fn new(scenes: Vec<Scene>) -> Result<Self, SceneConfigError> {
        let first = scenes.first().ok_or(SceneConfigError::Empty)?;
        for s in &scenes {
            if !s.start.is_finite() || !s.end.is_finite() || s.end <= s.start {
                return Err(SceneConfigError::BadInterval {
                    id: s.id,
                    start: s.start,
                    end: s.end,
                });
            }
        }
        if first.start != 0.0 {
            return Err(SceneConfigError::DoesNotStartAtZero(first.start));
        }
        for pair in scenes.windows(2) {
            if pair[0].end != pair[1].start {
                return Err(SceneConfigError::NotContiguous {
                    prev: pair[0].id,
                    prev_end: pair[0].end,
                    next: pair[1].id,
                    next_start: pair[1].start,
                });
            }
        }
        let last_end = scenes[scenes.len() - 1].end;
        if last_end != 1.0 {
            return Err(SceneConfigError::DoesNotEndAtOne(last_end));
        }
        Ok(Self { scenes })
    }

    /// Scene index for `progress`, or `None` when nothing matches.
    ///
    /// Intervals are half-open except the last, which also owns its end.
    pub fn index_at(&self, progress: f32) -> Option<usize> {
        if let Some(i) = self.scenes.iter().position(|s| s.contains(progress)) {
            return Some(i);
        }
        let last = self.scenes.len() - 1;
        (progress == self.scenes[last].end).then_some(last)
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn as_slice(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scene> {
        self.scenes.iter()
    }

    pub fn hero() -> Self {
        Self {
            scenes: default_scenes(),
        }
    }
}

impl Default for SceneSet {
    fn default() -> Self {
        Self::hero()
    }
}

fn scene(
    id: &'static str,
    start: f32,
    end: f32,
    headline: &'static str,
    subheadline: &'static str,
    visual: Visual,
) -> Scene {
    Scene {
        id,
        start,
        end,
        content: SceneContent {
            headline,
            subheadline,
            visual,
        },
    }
}

pub fn default_scenes() -> Vec<Scene> {
    vec![
        scene(
            "opening",
            0.0,
            0.2,
            "Enterprise Automation Solutions Since 2009",
            "Trusted by Fortune 500 Companies",
            Visual::FloatingEquipment,
        ),
        scene(
            "expertise",
            0.2,
            0.4,
            "Custom Control Systems",
            "Advanced SCADA Development",
            Visual::TechnicalDiagrams,
        ),
        scene(
            "trust",
            0.4,
            0.6,
            "15+ Years of Excellence",
            "500+ Successful Projects",
            Visual::StatsShowcase,
        ),
        scene(
            "innovation",
            0.6,
            0.8,
            "Cutting-Edge Technology",
            "Industry-Leading Solutions",
            Visual::Equipment3d,
        ),
        scene(
            "cta",
            0.8,
            1.0,
            "Partner with SSAC Today",
            "Schedule Your Consultation",
            Visual::CallToAction,
        ),
    ]
}
