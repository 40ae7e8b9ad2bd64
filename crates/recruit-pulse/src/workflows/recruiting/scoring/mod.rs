mod badge;
mod leaderboard;
pub mod metrics;

pub use badge::{Badge, BADGE_TIERS};
pub use leaderboard::{
    compute_leaderboard, Leaderboard, LeaderboardEntry, LeaderboardOptions, ScoreBreakdown,
};
pub use metrics::{ScoreWeights, STANDARD_WEIGHTS};
