use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::super::domain::{ProjectId, ProjectStatus, RecruiterId};
use super::super::snapshot::Snapshot;
use super::load::current_load;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingProject {
    pub project_id: ProjectId,
    pub client_name: String,
    pub recruiter_id: RecruiterId,
    pub computed_end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterForecast {
    pub recruiter_id: RecruiterId,
    pub recruiter_name: String,
    pub active_count: u32,
    pub capacity: u32,
    pub available_capacity: u32,
    pub over_capacity: bool,
    pub closing_count: u32,
    pub projected_active: u32,
    pub projected_available_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityForecast {
    pub today: NaiveDate,
    pub horizon_days: u32,
    pub horizon_end: NaiveDate,
    pub recruiters: Vec<RecruiterForecast>,
    pub closing_soon: Vec<ClosingProject>,
}

impl CapacityForecast {
    pub fn over_capacity(&self) -> impl Iterator<Item = &RecruiterForecast> {
        self.recruiters.iter().filter(|row| row.over_capacity)
    }
}

/// Project capacity `horizon_days` ahead of `today`.
///
/// Only in-progress projects with a start date and a positive expected
/// duration can close; anything already past its planned end counts as closing.
pub fn forecast_capacity(
    snapshot: &Snapshot,
    today: NaiveDate,
    horizon_days: u32,
    default_capacity: u32,
) -> CapacityForecast {
    let horizon_end = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);
    let known: HashSet<RecruiterId> = snapshot
        .recruiters
        .iter()
        .map(|recruiter| recruiter.id)
        .collect();

    let mut closing_soon: Vec<ClosingProject> = snapshot
        .projects
        .iter()
        .filter(|project| project.status == ProjectStatus::InProgress)
        .filter(|project| known.contains(&project.recruiter_id))
        .filter_map(|project| {
            let computed_end_date = project.computed_end_date()?;
            (computed_end_date <= horizon_end).then(|| ClosingProject {
                project_id: project.id,
                client_name: project.client_name.clone(),
                recruiter_id: project.recruiter_id,
                computed_end_date,
            })
        })
        .collect();
    closing_soon.sort_by(|left, right| {
        left.computed_end_date
            .cmp(&right.computed_end_date)
            .then_with(|| left.project_id.cmp(&right.project_id))
    });

    let mut closing_counts: HashMap<RecruiterId, u32> = HashMap::new();
    for project in &closing_soon {
        *closing_counts.entry(project.recruiter_id).or_insert(0) += 1;
    }

    let recruiters = current_load(snapshot, default_capacity)
        .into_iter()
        .map(|load| {
            let closing_count = closing_counts.get(&load.recruiter_id).copied().unwrap_or(0);
            let projected_active = load.active_count.saturating_sub(closing_count);
            RecruiterForecast {
                recruiter_id: load.recruiter_id,
                recruiter_name: load.recruiter_name,
                active_count: load.active_count,
                capacity: load.capacity,
                available_capacity: load.available_capacity,
                over_capacity: load.over_capacity,
                closing_count,
                projected_active,
                projected_available_capacity: load.capacity.saturating_sub(projected_active),
            }
        })
        .collect();

    CapacityForecast {
        today,
        horizon_days,
        horizon_end,
        recruiters,
        closing_soon,
    }
}
