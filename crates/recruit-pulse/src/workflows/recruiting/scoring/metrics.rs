//! Per-record bonus calculators.
//!
//! Every calculator is a pure function of a single record. Missing inputs
//! contribute nothing rather than failing, so a partially filled project sheet
//! still scores whatever it can.

use super::super::domain::{
    MeetingAttendance, Project, ProjectStatus, Referral, ReferralStatus, RetentionRecord,
    TrainingCompletion,
};

/// Point values of the incentive program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub per_completed_project: i64,
    pub five_star_review: i64,
    pub four_star_review: i64,
    pub fast_completion: i64,
    pub fast_completion_max_days: u32,
    pub long_retention: i64,
    pub long_retention_min_months: f64,
    pub early_departure_penalty: i64,
    pub early_departure_max_months: f64,
    pub attended_meeting: i64,
    pub acquired_referral: i64,
    pub completed_training: i64,
}

impl ScoreWeights {
    pub const fn standard() -> Self {
        Self {
            per_completed_project: 10,
            five_star_review: 500,
            four_star_review: 400,
            fast_completion: 50,
            fast_completion_max_days: 60,
            long_retention: 300,
            long_retention_min_months: 6.0,
            early_departure_penalty: -200,
            early_departure_max_months: 3.0,
            attended_meeting: 100,
            acquired_referral: 1000,
            completed_training: 300,
        }
    }
}

pub const STANDARD_WEIGHTS: ScoreWeights = ScoreWeights::standard();

pub fn review_bonus(rating: Option<u8>) -> i64 {
    match rating {
        Some(5) => STANDARD_WEIGHTS.five_star_review,
        Some(4) => STANDARD_WEIGHTS.four_star_review,
        _ => 0,
    }
}

pub fn speed_bonus(status: ProjectStatus, total_duration_days: Option<u32>) -> i64 {
    match (status, total_duration_days) {
        (ProjectStatus::Completed, Some(days))
            if days < STANDARD_WEIGHTS.fast_completion_max_days =>
        {
            STANDARD_WEIGHTS.fast_completion
        }
        _ => 0,
    }
}

/// Open placements are neutral; short tenures are penalized.
pub fn retention_bonus(record: &RetentionRecord) -> i64 {
    match record.tenure_months() {
        Some(months) if months >= STANDARD_WEIGHTS.long_retention_min_months => {
            STANDARD_WEIGHTS.long_retention
        }
        Some(months) if months < STANDARD_WEIGHTS.early_departure_max_months => {
            STANDARD_WEIGHTS.early_departure_penalty
        }
        _ => 0,
    }
}

pub fn meeting_bonus(meeting: &MeetingAttendance) -> i64 {
    if meeting.attended {
        STANDARD_WEIGHTS.attended_meeting
    } else {
        0
    }
}

pub fn referral_bonus(referral: &Referral) -> i64 {
    match referral.status {
        ReferralStatus::Acquired => STANDARD_WEIGHTS.acquired_referral,
        ReferralStatus::NotAcquired => 0,
    }
}

pub fn training_bonus(training: &TrainingCompletion) -> i64 {
    if training.course_name.trim().is_empty() {
        0
    } else {
        STANDARD_WEIGHTS.completed_training
    }
}

pub fn completed_count<'a, I>(projects: I) -> usize
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter(|project| project.status == ProjectStatus::Completed)
        .count()
}
