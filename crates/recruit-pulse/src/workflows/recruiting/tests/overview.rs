use super::common::*;
use crate::workflows::recruiting::{project_overview, ProjectStatus, Snapshot};

fn overview_snapshot() -> Snapshot {
    let mut unassigned = project(4, 2, ProjectStatus::Blocked);
    unassigned.sector = "  ".to_string();
    unassigned.project_manager = String::new();

    let mut last_year = completed(5, 1, 10, Some(5));
    last_year.start_date = Some(date(2023, 6, 1));

    let mut retail = completed(2, 1, 60, Some(4));
    retail.sector = "Retail".to_string();

    Snapshot {
        recruiters: vec![recruiter(1, "Anna Conti"), recruiter(2, "Bruno Ferri")],
        projects: vec![
            completed(1, 1, 40, Some(5)),
            retail,
            project(3, 2, ProjectStatus::InProgress),
            unassigned,
            last_year,
        ],
        ..Snapshot::default()
    }
}

#[test]
fn overview_counts_projects_started_in_period() {
    let summary = project_overview(&overview_snapshot(), year_2024()).summary();

    assert_eq!(summary.total_projects, 4);
    let counts: Vec<(ProjectStatus, usize)> = summary
        .status_counts
        .iter()
        .map(|entry| (entry.status, entry.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (ProjectStatus::InProgress, 1),
            (ProjectStatus::Blocked, 1),
            (ProjectStatus::Completed, 2),
        ]
    );
    assert_eq!(summary.average_completed_duration_days, Some(50.0));
    assert_eq!(summary.average_review_rating, Some(4.5));
}

#[test]
fn overview_groups_by_sector_and_manager() {
    let summary = project_overview(&overview_snapshot(), year_2024()).summary();

    let sectors: Vec<(&str, usize, usize, usize)> = summary
        .sector_load
        .iter()
        .map(|entry| (entry.name.as_str(), entry.total, entry.completed, entry.active))
        .collect();
    assert_eq!(
        sectors,
        vec![
            ("Manufacturing", 2, 1, 1),
            ("Retail", 1, 1, 0),
            ("Unassigned", 1, 0, 1),
        ]
    );

    let managers: Vec<&str> = summary
        .manager_load
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(managers, vec!["Bianchi", "Unassigned"]);
}

#[test]
fn empty_period_has_no_averages() {
    let summary = project_overview(&Snapshot::default(), year_2024()).summary();

    assert_eq!(summary.total_projects, 0);
    assert!(summary.status_counts.is_empty());
    assert!(summary.average_completed_duration_days.is_none());
    assert!(summary.average_review_rating.is_none());
    assert!(summary.sector_load.is_empty());
}
