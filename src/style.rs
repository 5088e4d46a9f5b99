//! Emotion identifiers and their visual styles.
//!
//! Every style is a static entry; anything that cannot be resolved falls back to
//! the neutral entry, so callers always hold a valid `&'static StyleDefinition`.

use serde::Serialize;

/// Closed set of emotion identifiers the renderer knows how to style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emotion {
    #[default]
    Neutral,
    Melancholic,
    MelancholicHope,
    Hope,
    Joy,
    Calm,
    Anger,
    Fear,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Neutral,
        Emotion::Melancholic,
        Emotion::MelancholicHope,
        Emotion::Hope,
        Emotion::Joy,
        Emotion::Calm,
        Emotion::Anger,
        Emotion::Fear,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Melancholic => "melancholic",
            Emotion::MelancholicHope => "melancholic-hope",
            Emotion::Hope => "hope",
            Emotion::Joy => "joy",
            Emotion::Calm => "calm",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
        }
    }

    /// Exact (case-sensitive) identifier lookup.
    pub fn from_id(id: &str) -> Option<Emotion> {
        Emotion::ALL.iter().copied().find(|e| e.id() == id)
    }

    pub fn style(self) -> &'static StyleDefinition {
        match self {
            Emotion::Neutral => &NEUTRAL,
            Emotion::Melancholic => &MELANCHOLIC,
            Emotion::MelancholicHope => &MELANCHOLIC_HOPE,
            Emotion::Hope => &HOPE,
            Emotion::Joy => &JOY,
            Emotion::Calm => &CALM,
            Emotion::Anger => &ANGER,
            Emotion::Fear => &FEAR,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Palette + motion parameters bound to one emotion.
#[derive(Debug, PartialEq)]
pub struct StyleDefinition {
    pub palette: [&'static str; 3], // gradient stops 0, 0.5, 1
    pub speed: f64,                 // wave phase speed multiplier
    pub wave: f64,                  // base wave amplitude (px)
}

pub static NEUTRAL: StyleDefinition = StyleDefinition {
    palette: ["#2a2f45", "#5b6a9b", "#8799c5"],
    speed: 0.6,
    wave: 22.0,
};

pub static MELANCHOLIC: StyleDefinition = StyleDefinition {
    palette: ["#1c2c3a", "#3f5675", "#6c7ea7"],
    speed: 0.4,
    wave: 28.0,
};

pub static MELANCHOLIC_HOPE: StyleDefinition = StyleDefinition {
    palette: ["#1d2d45", "#455f9e", "#a4b8ff"],
    speed: 0.55,
    wave: 26.0,
};

pub static HOPE: StyleDefinition = StyleDefinition {
    palette: ["#2d3b5f", "#6f87d4", "#c5d4ff"],
    speed: 0.8,
    wave: 20.0,
};

pub static JOY: StyleDefinition = StyleDefinition {
    palette: ["#f76c6c", "#fdd56a", "#ff9ff3"],
    speed: 1.2,
    wave: 18.0,
};

pub static CALM: StyleDefinition = StyleDefinition {
    palette: ["#1c3b46", "#2f6f7a", "#74bfc9"],
    speed: 0.5,
    wave: 30.0,
};

pub static ANGER: StyleDefinition = StyleDefinition {
    palette: ["#4a0d0d", "#c72f2f", "#ff7d3a"],
    speed: 1.4,
    wave: 14.0,
};

pub static FEAR: StyleDefinition = StyleDefinition {
    palette: ["#2b223f", "#4d3b78", "#8a6fd1"],
    speed: 0.9,
    wave: 24.0,
};

/// Resolve an identifier to its emotion and style, falling back to neutral.
pub fn style_for_id(id: &str) -> (Emotion, &'static StyleDefinition) {
    let emotion = Emotion::from_id(id).unwrap_or_default();
    (emotion, emotion.style())
}
