//! Mood results and assessment scoring.
//!
//! A mood result is a categorical label derived from a short self-assessment.
//! Books and games carry mood tags; recommendation lists are filtered so a
//! user sees content tagged for their current mood (untagged content is
//! considered generic and always shown).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Per-question answers range over 0..=3 (never .. always)
pub const MAX_ANSWER: u8 = 3;

/// Categorical mood label derived from an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodResult {
    Great,
    Good,
    Okay,
    Struggling,
    NeedsSupport,
}

impl MoodResult {
    /// Query-parameter / tag slug for this mood
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Struggling => "struggling",
            Self::NeedsSupport => "needs-support",
        }
    }

    /// Human-readable label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Okay => "Okay",
            Self::Struggling => "Struggling",
            Self::NeedsSupport => "Needs Support",
        }
    }
}

impl fmt::Display for MoodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for MoodResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "great" => Ok(Self::Great),
            "good" => Ok(Self::Good),
            "okay" => Ok(Self::Okay),
            "struggling" => Ok(Self::Struggling),
            "needs-support" => Ok(Self::NeedsSupport),
            other => Err(CoreError::invalid_value("mood", other)),
        }
    }
}

/// Score an assessment into a mood label.
///
/// Answers are 0..=3 per question (higher = better). The label is chosen by
/// the mean answer so assessments of different lengths are comparable.
/// An empty assessment reads as Okay.
pub fn score_assessment(answers: &[u8]) -> MoodResult {
    if answers.is_empty() {
        return MoodResult::Okay;
    }

    let total: u32 = answers.iter().map(|&a| a.min(MAX_ANSWER) as u32).sum();
    // Mean in percent of the maximum attainable score
    let percent = total * 100 / (answers.len() as u32 * MAX_ANSWER as u32);

    match percent {
        85..=100 => MoodResult::Great,
        65..=84 => MoodResult::Good,
        45..=64 => MoodResult::Okay,
        25..=44 => MoodResult::Struggling,
        _ => MoodResult::NeedsSupport,
    }
}

/// Whether an item with the given mood tags should be shown for a mood.
///
/// Untagged items are generic and match every mood. The SQL-side filters in
/// the repositories mirror this rule.
pub fn matches_mood(tags: &[String], mood: MoodResult) -> bool {
    tags.is_empty() || tags.iter().any(|t| t == mood.slug())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trip() {
        for mood in [
            MoodResult::Great,
            MoodResult::Good,
            MoodResult::Okay,
            MoodResult::Struggling,
            MoodResult::NeedsSupport,
        ] {
            assert_eq!(mood.slug().parse::<MoodResult>().unwrap(), mood);
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert!("fantastic".parse::<MoodResult>().is_err());
    }

    #[test]
    fn scoring_thresholds() {
        assert_eq!(score_assessment(&[3, 3, 3, 3]), MoodResult::Great);
        assert_eq!(score_assessment(&[2, 2, 2, 3]), MoodResult::Good);
        assert_eq!(score_assessment(&[2, 1, 2, 1]), MoodResult::Okay);
        assert_eq!(score_assessment(&[1, 1, 1, 1]), MoodResult::Struggling);
        assert_eq!(score_assessment(&[0, 0, 0, 1]), MoodResult::NeedsSupport);
    }

    #[test]
    fn empty_assessment_is_okay() {
        assert_eq!(score_assessment(&[]), MoodResult::Okay);
    }

    #[test]
    fn out_of_range_answers_clamp() {
        // 9 clamps to 3, so this still reads as Great
        assert_eq!(score_assessment(&[9, 3, 3]), MoodResult::Great);
    }

    #[test]
    fn untagged_content_is_generic() {
        assert!(matches_mood(&[], MoodResult::NeedsSupport));
    }

    #[test]
    fn tagged_content_filters() {
        let tags = vec!["good".to_string(), "great".to_string()];
        assert!(matches_mood(&tags, MoodResult::Good));
        assert!(!matches_mood(&tags, MoodResult::NeedsSupport));
    }
}
