//! Confidence level and percentile classification

use serde::{Deserialize, Serialize};

/// Qualitative band for an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    Excellent,
    VeryGood,
    Good,
    Moderate,
    NeedsWork,
    Poor,
}

/// Band lower bounds, highest first; the first match wins
const BANDS: [(u32, ConfidenceBand); 5] = [
    (85, ConfidenceBand::Excellent),
    (70, ConfidenceBand::VeryGood),
    (55, ConfidenceBand::Good),
    (40, ConfidenceBand::Moderate),
    (25, ConfidenceBand::NeedsWork),
];

impl ConfidenceBand {
    pub fn from_score(score: u32) -> Self {
        BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(ConfidenceBand::Poor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::NeedsWork => "Needs Work",
            Self::Poor => "Poor",
        }
    }

    /// Display color token
    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#10B981",
            Self::VeryGood => "#22C55E",
            Self::Good => "#84CC16",
            Self::Moderate => "#F59E0B",
            Self::NeedsWork => "#F97316",
            Self::Poor => "#EF4444",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Excellent => "🌟",
            Self::VeryGood => "😊",
            Self::Good => "👍",
            Self::Moderate => "🙂",
            Self::NeedsWork => "💪",
            Self::Poor => "🌱",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "You come across as calm, engaged and self-assured.",
            Self::VeryGood => "Strong, confident presence with only minor habits to polish.",
            Self::Good => "Solid foundation; a few habits are holding your presence back.",
            Self::Moderate => "Some confidence shows through, but nerves are visible.",
            Self::NeedsWork => "Anxiety is noticeable; focused practice will help quickly.",
            Self::Poor => "Every session is progress. Start with one habit at a time.",
        }
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel {
            level: self.label().to_string(),
            color: self.color().to_string(),
            emoji: self.emoji().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// Serializable level descriptor attached to the report summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceLevel {
    pub level: String,
    pub color: String,
    pub emoji: String,
    pub description: String,
}

/// Comparative percentile bucket for an overall score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileRank {
    pub percentile: u32,
    pub label: String,
}

/// `(score floor, percentile, label)`, highest first
const PERCENTILES: [(u32, u32, &str); 6] = [
    (90, 95, "Top 5%"),
    (80, 80, "Top 20%"),
    (70, 65, "Above Average"),
    (60, 50, "Average"),
    (45, 35, "Below Average"),
    (30, 20, "Developing"),
];

/// Bucket a score into the percentile scale used for comparative display
pub fn percentile_rank(score: u32) -> PercentileRank {
    let (percentile, label) = PERCENTILES
        .iter()
        .find(|(floor, _, _)| score >= *floor)
        .map(|(_, percentile, label)| (*percentile, *label))
        .unwrap_or((10, "Beginning"));

    PercentileRank {
        percentile,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ConfidenceBand::from_score(100), ConfidenceBand::Excellent);
        assert_eq!(ConfidenceBand::from_score(85), ConfidenceBand::Excellent);
        assert_eq!(ConfidenceBand::from_score(84), ConfidenceBand::VeryGood);
        assert_eq!(ConfidenceBand::from_score(70), ConfidenceBand::VeryGood);
        assert_eq!(ConfidenceBand::from_score(55), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::from_score(54), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_score(40), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_score(25), ConfidenceBand::NeedsWork);
        assert_eq!(ConfidenceBand::from_score(24), ConfidenceBand::Poor);
        assert_eq!(ConfidenceBand::from_score(0), ConfidenceBand::Poor);
    }

    #[test]
    fn test_level_descriptor() {
        let level = ConfidenceBand::from_score(88).level();
        assert_eq!(level.level, "Excellent");
        assert!(level.color.starts_with('#'));
        assert!(!level.emoji.is_empty());
        assert!(!level.description.is_empty());
    }

    #[test]
    fn test_percentile_buckets() {
        assert_eq!(percentile_rank(95).percentile, 95);
        assert_eq!(percentile_rank(90).percentile, 95);
        assert_eq!(percentile_rank(85).percentile, 80);
        assert_eq!(percentile_rank(72).percentile, 65);
        assert_eq!(percentile_rank(60).percentile, 50);
        assert_eq!(percentile_rank(50).percentile, 35);
        assert_eq!(percentile_rank(30).percentile, 20);
        assert_eq!(percentile_rank(29).percentile, 10);
        assert_eq!(percentile_rank(0).label, "Beginning");
    }

    #[test]
    fn test_every_percentile_is_on_the_scale() {
        let scale = [95, 80, 65, 50, 35, 20, 10];
        for score in 0..=100 {
            assert!(scale.contains(&percentile_rank(score).percentile));
        }
    }
}
