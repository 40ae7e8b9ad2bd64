use super::super::domain::{ProjectStatus, ReportingPeriod};
use super::super::snapshot::Snapshot;
use super::views::{GroupLoadEntry, ProjectOverviewSummary, StatusCountEntry};
use std::collections::{BTreeMap, HashMap};

const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Default, Clone)]
pub struct GroupLoad {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl GroupLoad {
    fn record(&mut self, status: ProjectStatus) {
        self.total += 1;
        if status == ProjectStatus::Completed {
            self.completed += 1;
        } else if status.is_active() {
            self.active += 1;
        }
    }
}

#[derive(Debug)]
pub struct ProjectOverview {
    pub period: ReportingPeriod,
    pub status_counts: HashMap<ProjectStatus, usize>,
    pub completed_durations: Vec<u32>,
    pub review_ratings: Vec<u8>,
    pub sector_load: BTreeMap<String, GroupLoad>,
    pub manager_load: BTreeMap<String, GroupLoad>,
}

impl ProjectOverview {
    pub fn total_projects(&self) -> usize {
        self.status_counts.values().sum()
    }

    pub fn summary(&self) -> ProjectOverviewSummary {
        let status_counts = ProjectStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                self.status_counts
                    .get(&status)
                    .filter(|count| **count > 0)
                    .map(|count| StatusCountEntry {
                        status,
                        status_label: status.label(),
                        count: *count,
                    })
            })
            .collect();

        ProjectOverviewSummary {
            period: self.period,
            total_projects: self.total_projects(),
            status_counts,
            average_completed_duration_days: average(
                self.completed_durations.iter().map(|days| f64::from(*days)),
            ),
            average_review_rating: average(
                self.review_ratings.iter().map(|rating| f64::from(*rating)),
            ),
            sector_load: group_entries(&self.sector_load),
            manager_load: group_entries(&self.manager_load),
        }
    }
}

/// Dashboard KPIs over the projects started inside `period`.
pub fn project_overview(snapshot: &Snapshot, period: ReportingPeriod) -> ProjectOverview {
    let mut overview = ProjectOverview {
        period,
        status_counts: HashMap::new(),
        completed_durations: Vec::new(),
        review_ratings: Vec::new(),
        sector_load: BTreeMap::new(),
        manager_load: BTreeMap::new(),
    };

    for project in snapshot
        .projects
        .iter()
        .filter(|project| period.contains_opt(project.start_date))
    {
        *overview.status_counts.entry(project.status).or_insert(0) += 1;

        if project.status == ProjectStatus::Completed {
            if let Some(days) = project.total_duration_days {
                overview.completed_durations.push(days);
            }
        }
        if let Some(rating) = project.review_rating {
            overview.review_ratings.push(rating);
        }

        overview
            .sector_load
            .entry(group_name(&project.sector))
            .or_default()
            .record(project.status);
        overview
            .manager_load
            .entry(group_name(&project.project_manager))
            .or_default()
            .record(project.status);
    }

    overview
}

fn group_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNASSIGNED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn group_entries(groups: &BTreeMap<String, GroupLoad>) -> Vec<GroupLoadEntry> {
    groups
        .iter()
        .map(|(name, load)| GroupLoadEntry {
            name: name.clone(),
            total: load.total,
            completed: load.completed,
            active: load.active,
        })
        .collect()
}

fn average<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
