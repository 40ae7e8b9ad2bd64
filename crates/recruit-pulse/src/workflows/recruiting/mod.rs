//! Recruiter incentive scoring and capacity planning.
//!
//! Every computation works on an in-memory [`Snapshot`] handed in by the caller;
//! nothing here caches reference data or writes back to the store.

pub mod capacity;
pub mod domain;
pub mod report;
pub mod scoring;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use capacity::{
    current_load, forecast_capacity, CapacityForecast, ClosingProject, RecruiterForecast,
    RecruiterLoad,
};
pub use domain::{
    MeetingAttendance, PeriodError, Project, ProjectId, ProjectStatus, Recruiter, RecruiterId,
    Referral, ReferralStatus, ReportingPeriod, RetentionRecord, TrainingCompletion,
    DEFAULT_CAPACITY,
};
pub use report::{project_overview, ProjectOverview};
pub use scoring::{
    compute_leaderboard, Badge, Leaderboard, LeaderboardEntry, LeaderboardOptions, ScoreBreakdown,
};
pub use service::{Dashboard, DashboardError, DashboardService};
pub use snapshot::{Snapshot, SnapshotError, SnapshotSource};
