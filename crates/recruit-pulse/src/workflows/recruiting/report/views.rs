use super::super::domain::{ProjectStatus, ReportingPeriod};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupLoadEntry {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverviewSummary {
    pub period: ReportingPeriod,
    pub total_projects: usize,
    pub status_counts: Vec<StatusCountEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_completed_duration_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_review_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sector_load: Vec<GroupLoadEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manager_load: Vec<GroupLoadEntry>,
}
