use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScoringConfig;

use super::capacity::{forecast_capacity, CapacityForecast};
use super::domain::ReportingPeriod;
use super::report::project_overview;
use super::report::views::ProjectOverviewSummary;
use super::scoring::{compute_leaderboard, Leaderboard, LeaderboardOptions};
use super::snapshot::{Snapshot, SnapshotError, SnapshotSource};

/// Everything the dashboard page shows, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub leaderboard: Leaderboard,
    pub capacity: CapacityForecast,
    pub overview: ProjectOverviewSummary,
}

/// Request-scoped entry point for the scoring and capacity reports.
///
/// Each call reads exactly one snapshot from the source, so all figures in a
/// response agree with each other. Source failures abort the request.
pub struct DashboardService<S> {
    source: Arc<S>,
    config: ScoringConfig,
}

impl<S> DashboardService<S>
where
    S: SnapshotSource + 'static,
{
    pub fn new(source: Arc<S>, config: ScoringConfig) -> Self {
        Self { source, config }
    }

    pub fn leaderboard(&self, period: ReportingPeriod) -> Result<Leaderboard, DashboardError> {
        let snapshot = self.load_snapshot()?;
        let leaderboard = compute_leaderboard(&snapshot, period, self.leaderboard_options());
        info!(
            start = %period.start,
            end = %period.end,
            entries = leaderboard.entries.len(),
            "leaderboard computed"
        );
        Ok(leaderboard)
    }

    /// Current load plus the forecast; `horizon_days` falls back to the configured horizon.
    pub fn capacity(
        &self,
        today: NaiveDate,
        horizon_days: Option<u32>,
    ) -> Result<CapacityForecast, DashboardError> {
        let snapshot = self.load_snapshot()?;
        let forecast = self.forecast(&snapshot, today, horizon_days);
        info!(
            %today,
            horizon_days = forecast.horizon_days,
            closing = forecast.closing_soon.len(),
            over_capacity = forecast.over_capacity().count(),
            "capacity forecast computed"
        );
        Ok(forecast)
    }

    pub fn overview(
        &self,
        period: ReportingPeriod,
    ) -> Result<ProjectOverviewSummary, DashboardError> {
        let snapshot = self.load_snapshot()?;
        Ok(project_overview(&snapshot, period).summary())
    }

    pub fn dashboard(
        &self,
        period: ReportingPeriod,
        today: NaiveDate,
        horizon_days: Option<u32>,
    ) -> Result<Dashboard, DashboardError> {
        let snapshot = self.load_snapshot()?;
        let leaderboard = compute_leaderboard(&snapshot, period, self.leaderboard_options());
        let capacity = self.forecast(&snapshot, today, horizon_days);
        let overview = project_overview(&snapshot, period).summary();

        info!(
            start = %period.start,
            end = %period.end,
            entries = leaderboard.entries.len(),
            projects = overview.total_projects,
            "dashboard computed"
        );

        Ok(Dashboard {
            leaderboard,
            capacity,
            overview,
        })
    }

    fn forecast(
        &self,
        snapshot: &Snapshot,
        today: NaiveDate,
        horizon_days: Option<u32>,
    ) -> CapacityForecast {
        let horizon_days = horizon_days.unwrap_or(self.config.forecast_horizon_days);
        forecast_capacity(snapshot, today, horizon_days, self.config.default_capacity)
    }

    fn leaderboard_options(&self) -> LeaderboardOptions {
        LeaderboardOptions {
            scope_activity_to_period: self.config.scope_activity_to_period,
        }
    }

    fn load_snapshot(&self) -> Result<Snapshot, DashboardError> {
        let snapshot = self.source.snapshot().map_err(|err| {
            warn!(error = %err, "snapshot source failed");
            err
        })?;
        debug!(
            projects = snapshot.projects.len(),
            recruiters = snapshot.recruiters.len(),
            retention = snapshot.retention.len(),
            meetings = snapshot.meetings.len(),
            referrals = snapshot.referrals.len(),
            trainings = snapshot.trainings.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
