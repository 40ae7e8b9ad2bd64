use std::sync::Arc;

use super::common::*;
use crate::config::ScoringConfig;
use crate::workflows::recruiting::{
    Badge, DashboardError, DashboardService, RecruiterId, SnapshotError,
};

#[test]
fn dashboard_reads_a_single_snapshot() {
    let source = Arc::new(CountingSource::new(handbook_snapshot()));
    let service = DashboardService::new(source.clone(), ScoringConfig::default());

    let dashboard = service
        .dashboard(year_2024(), date(2024, 6, 1), None)
        .expect("dashboard builds");

    assert_eq!(source.fetches(), 1);
    assert_eq!(dashboard.leaderboard.entries.len(), 1);
    assert_eq!(dashboard.leaderboard.entries[0].badge, Badge::Bronze);
    assert_eq!(dashboard.capacity.horizon_days, 14);
    assert_eq!(dashboard.capacity.recruiters.len(), 2);
    assert_eq!(dashboard.overview.total_projects, 2);
}

#[test]
fn each_request_fetches_a_fresh_snapshot() {
    let source = Arc::new(CountingSource::new(handbook_snapshot()));
    let service = DashboardService::new(source.clone(), ScoringConfig::default());

    service.leaderboard(year_2024()).expect("leaderboard");
    service.capacity(date(2024, 6, 1), Some(30)).expect("capacity");
    service.overview(year_2024()).expect("overview");

    assert_eq!(source.fetches(), 3);
}

#[test]
fn configured_defaults_flow_into_reports() {
    let mut snapshot = handbook_snapshot();
    snapshot.meetings.push(meeting(2, date(2020, 1, 1), true));
    let config = ScoringConfig {
        default_capacity: 2,
        forecast_horizon_days: 7,
        scope_activity_to_period: true,
    };
    let service = DashboardService::new(Arc::new(snapshot), config);

    let leaderboard = service.leaderboard(year_2024()).expect("leaderboard");
    assert!(leaderboard.entry_for(RecruiterId(2)).is_none());

    let capacity = service.capacity(date(2024, 6, 1), None).expect("capacity");
    assert_eq!(capacity.horizon_days, 7);
    assert!(capacity.recruiters.iter().all(|row| row.capacity == 2));
}

#[test]
fn unavailable_source_aborts_the_request() {
    let service = DashboardService::new(Arc::new(UnavailableSource), ScoringConfig::default());

    match service.dashboard(year_2024(), date(2024, 6, 1), None) {
        Err(DashboardError::Snapshot(SnapshotError::Unavailable(reason))) => {
            assert_eq!(reason, "connection refused");
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
    assert!(service.leaderboard(year_2024()).is_err());
}
