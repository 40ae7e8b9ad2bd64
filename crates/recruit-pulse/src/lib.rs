//! Recruiter incentive leaderboard and capacity forecasting.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
