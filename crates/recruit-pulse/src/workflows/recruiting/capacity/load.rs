use std::collections::HashMap;

use serde::Serialize;

use super::super::domain::RecruiterId;
use super::super::snapshot::Snapshot;

/// Active workload of a recruiter against the configured capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterLoad {
    pub recruiter_id: RecruiterId,
    pub recruiter_name: String,
    pub active_count: u32,
    pub capacity: u32,
    pub available_capacity: u32,
    pub over_capacity: bool,
}

/// Current load for every recruiter in the snapshot, ordered by name.
///
/// In-progress and blocked projects both occupy capacity.
pub fn current_load(snapshot: &Snapshot, default_capacity: u32) -> Vec<RecruiterLoad> {
    let active = active_counts(snapshot);

    let mut rows: Vec<RecruiterLoad> = snapshot
        .recruiters
        .iter()
        .map(|recruiter| {
            let active_count = active.get(&recruiter.id).copied().unwrap_or(0);
            let capacity = snapshot.capacity_for(recruiter.id, default_capacity);
            let available_capacity = capacity.saturating_sub(active_count);
            RecruiterLoad {
                recruiter_id: recruiter.id,
                recruiter_name: recruiter.name.clone(),
                active_count,
                capacity,
                available_capacity,
                over_capacity: available_capacity == 0,
            }
        })
        .collect();

    rows.sort_by(|left, right| {
        left.recruiter_name
            .cmp(&right.recruiter_name)
            .then_with(|| left.recruiter_id.cmp(&right.recruiter_id))
    });
    rows
}

fn active_counts(snapshot: &Snapshot) -> HashMap<RecruiterId, u32> {
    let mut counts = HashMap::new();
    for project in snapshot
        .projects
        .iter()
        .filter(|project| project.status.is_active())
    {
        *counts.entry(project.recruiter_id).or_insert(0) += 1;
    }
    counts
}
