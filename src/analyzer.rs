//! Keyword heuristic that scores text for emotional tone.
//!
//! Intentionally approximate: each lexicon word found anywhere in the
//! lower-cased text adds one point to its category, however often it occurs.

use serde::Serialize;

use crate::style::Emotion;

pub const ENERGY_STEADY: &str = "steady";
pub const ENERGY_LOW_RISING: &str = "low-rising";

/// Result of an analysis, local or remote. `emotion` is always a styled
/// identifier and `intensity` always lies in [0,1].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmotionDescriptor {
    pub emotion: Emotion,
    pub intensity: f64,
    pub energy: String,
}

impl EmotionDescriptor {
    pub fn new(emotion: Emotion, intensity: f64, energy: impl Into<String>) -> Self {
        Self {
            emotion,
            intensity: clamp_intensity(intensity),
            energy: energy.into(),
        }
    }

    pub fn neutral() -> Self {
        Self::new(Emotion::Neutral, 0.0, ENERGY_STEADY)
    }
}

/// Clamp to [0,1]; non-finite values count as zero.
pub fn clamp_intensity(value: f64) -> f64 {
    if !value.is_finite() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Scored categories in tie-break order: on equal scores the earlier wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    Calm,
    Joy,
    Anger,
    Melancholic,
    Hope,
    Fear,
}

const CATEGORIES: [(Category, &[&str]); 6] = [
    (Category::Calm, &["calm", "still", "soft", "gentle", "breathe", "float"]),
    (Category::Joy, &["joy", "happy", "warm", "glow", "smile", "delight"]),
    (Category::Anger, &["angry", "rage", "fury", "sharp", "storm", "burn"]),
    (Category::Melancholic, &["heavy", "sad", "lonely", "tired", "dark"]),
    (Category::Hope, &["hope", "hopeful", "rise", "light", "promise"]),
    (Category::Fear, &["fear", "anxious", "nervous", "tense", "shadow"]),
];

impl Category {
    fn emotion(self) -> Emotion {
        match self {
            Category::Calm => Emotion::Calm,
            Category::Joy => Emotion::Joy,
            Category::Anger => Emotion::Anger,
            Category::Melancholic => Emotion::Melancholic,
            Category::Hope => Emotion::Hope,
            Category::Fear => Emotion::Fear,
        }
    }
}

fn score(lower: &str, words: &[&str]) -> u32 {
    words.iter().filter(|w| lower.contains(*w)).count() as u32
}

/// Score `text` locally. Never fails.
pub fn analyze(text: &str) -> EmotionDescriptor {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return EmotionDescriptor::neutral();
    }

    let scores = CATEGORIES.map(|(cat, words)| (cat, score(&lower, words)));

    let mut top: Option<Category> = None;
    let mut top_score = 0;
    for &(cat, s) in &scores {
        if s > top_score {
            top_score = s;
            top = Some(cat);
        }
    }

    let scored = |c: Category| scores.iter().any(|&(cat, s)| cat == c && s > 0);
    let emotion = if scored(Category::Melancholic) && scored(Category::Hope) {
        Emotion::MelancholicHope
    } else {
        top.map(Category::emotion).unwrap_or_default()
    };

    // String length as the browser counts it (UTF-16 code units).
    let length = text.encode_utf16().count() as f64;
    let intensity = (0.2 + top_score as f64 / 5.0 + length / 200.0).min(1.0);
    let energy = if top == Some(Category::Hope) {
        ENERGY_LOW_RISING
    } else {
        ENERGY_STEADY
    };

    EmotionDescriptor::new(emotion, intensity, energy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_neutral_zero() {
        for t in ["", "   ", "\n\t "] {
            assert_eq!(analyze(t), EmotionDescriptor::neutral());
        }
    }

    #[test]
    fn repeated_word_counts_once() {
        let once = analyze("storm");
        let many = analyze("storm storm storm");
        assert_eq!(once.emotion, Emotion::Anger);
        assert_eq!(many.emotion, Emotion::Anger);
        // only length differs: 0.2 + 1/5 + len/200
        assert!((once.intensity - (0.4 + 5.0 / 200.0)).abs() < 1e-9);
        assert!((many.intensity - (0.4 + 17.0 / 200.0)).abs() < 1e-9);
    }

    #[test]
    fn substring_matches_count() {
        // "delightful" hits joy ("delight") and hope ("light"); joy wins the tie
        let d = analyze("delightful");
        assert_eq!(d.emotion, Emotion::Joy);
        assert_eq!(d.energy, ENERGY_STEADY);
    }

    #[test]
    fn ties_keep_earlier_category() {
        // calm 1, anger 1 -> calm listed first
        assert_eq!(analyze("calm storm").emotion, Emotion::Calm);
        // fear 1, joy 1 -> joy listed first
        assert_eq!(analyze("fear joy").emotion, Emotion::Joy);
    }

    #[test]
    fn no_lexicon_hits_is_neutral_with_length_intensity() {
        let d = analyze("the quick brown fox");
        assert_eq!(d.emotion, Emotion::Neutral);
        assert_eq!(d.energy, ENERGY_STEADY);
        assert!((d.intensity - (0.2 + 19.0 / 200.0)).abs() < 1e-9);
    }

    #[test]
    fn uppercase_input_is_lowered() {
        assert_eq!(analyze("FURY AND RAGE").emotion, Emotion::Anger);
    }

    #[test]
    fn long_text_saturates_intensity() {
        let text = "x".repeat(500);
        assert_eq!(analyze(&text).intensity, 1.0);
    }

    #[test]
    fn low_rising_tracks_raw_top_category_not_override() {
        // hope 2 > melancholic 1: compound emotion, but raw top was hope
        let d = analyze("sad but hopeful");
        assert_eq!(d.emotion, Emotion::MelancholicHope);
        assert_eq!(d.energy, ENERGY_LOW_RISING);
        // melancholic 2 > hope 1: compound emotion, raw top melancholic
        let d = analyze("heavy and tired, a little light");
        assert_eq!(d.emotion, Emotion::MelancholicHope);
        assert_eq!(d.energy, ENERGY_STEADY);
    }

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp_intensity(f64::NAN), 0.0);
        assert_eq!(clamp_intensity(f64::INFINITY), 0.0);
        assert_eq!(clamp_intensity(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_intensity(-3.0), 0.0);
        assert_eq!(clamp_intensity(7.0), 1.0);
        assert_eq!(clamp_intensity(0.25), 0.25);
    }
}
