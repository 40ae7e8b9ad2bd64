use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Grey,
    Bronze,
    Silver,
    Gold,
}

/// Tier thresholds, highest first. The first threshold the score reaches wins.
pub const BADGE_TIERS: [(i64, Badge); 3] = [
    (10_000, Badge::Gold),
    (5_000, Badge::Silver),
    (2_000, Badge::Bronze),
];

impl Badge {
    pub fn for_score(score: i64) -> Self {
        BADGE_TIERS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, badge)| *badge)
            .unwrap_or(Badge::Grey)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::Grey => "Grey",
        }
    }
}
