use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{Project, ProjectId, Recruiter, RecruiterId, ReportingPeriod};
use super::super::snapshot::Snapshot;
use super::badge::Badge;
use super::metrics::{
    completed_count, meeting_bonus, referral_bonus, retention_bonus, review_bonus, speed_bonus,
    training_bonus, STANDARD_WEIGHTS,
};

/// Knobs that change which records feed the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardOptions {
    /// When set, meetings, referrals and trainings only count inside the period.
    /// Otherwise they aggregate over the recruiter's whole history.
    pub scope_activity_to_period: bool,
}

/// Per-category sums behind a recruiter's score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub completed_count: usize,
    pub completed_points: i64,
    pub review_bonus: i64,
    pub speed_bonus: i64,
    pub retention_bonus: i64,
    pub meeting_bonus: i64,
    pub referral_bonus: i64,
    pub training_bonus: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.completed_points
            + self.review_bonus
            + self.speed_bonus
            + self.retention_bonus
            + self.meeting_bonus
            + self.referral_bonus
            + self.training_bonus
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub recruiter_id: RecruiterId,
    pub recruiter_name: String,
    pub breakdown: ScoreBreakdown,
    pub score: i64,
    pub badge: Badge,
    pub badge_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub period: ReportingPeriod,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Nothing scored in the period; callers render a "no data" state.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_for(&self, recruiter_id: RecruiterId) -> Option<&LeaderboardEntry> {
        self.entries
            .iter()
            .find(|entry| entry.recruiter_id == recruiter_id)
    }
}

/// Rank recruiters by incentive score for `period`.
///
/// Project-derived bonuses (completions, reviews, speed, retention) only count
/// projects started inside the period. Records pointing at recruiters or
/// projects missing from the snapshot are dropped without error.
pub fn compute_leaderboard(
    snapshot: &Snapshot,
    period: ReportingPeriod,
    options: LeaderboardOptions,
) -> Leaderboard {
    let known: HashMap<RecruiterId, &Recruiter> = snapshot
        .recruiters
        .iter()
        .map(|recruiter| (recruiter.id, recruiter))
        .collect();

    let mut tallies: BTreeMap<RecruiterId, ScoreBreakdown> = BTreeMap::new();
    let mut project_owner: HashMap<ProjectId, RecruiterId> = HashMap::new();

    let mut owned: BTreeMap<RecruiterId, Vec<&Project>> = BTreeMap::new();
    for project in snapshot
        .projects
        .iter()
        .filter(|project| period.contains_opt(project.start_date))
        .filter(|project| known.contains_key(&project.recruiter_id))
    {
        project_owner.insert(project.id, project.recruiter_id);
        owned.entry(project.recruiter_id).or_default().push(project);
    }

    for (recruiter_id, projects) in &owned {
        let tally = tallies.entry(*recruiter_id).or_default();
        tally.completed_count = completed_count(projects.iter().copied());
        for project in projects {
            tally.review_bonus += review_bonus(project.review_rating);
            tally.speed_bonus += speed_bonus(project.status, project.total_duration_days);
        }
    }

    for record in snapshot
        .retention
        .iter()
        .filter(|record| known.contains_key(&record.recruiter_id))
    {
        if let Some(owner) = project_owner.get(&record.project_id) {
            tallies.entry(*owner).or_default().retention_bonus += retention_bonus(record);
        }
    }

    let in_scope =
        |date: Option<NaiveDate>| !options.scope_activity_to_period || period.contains_opt(date);

    for meeting in snapshot
        .meetings
        .iter()
        .filter(|meeting| known.contains_key(&meeting.recruiter_id))
        .filter(|meeting| in_scope(meeting.meeting_date))
    {
        tallies.entry(meeting.recruiter_id).or_default().meeting_bonus += meeting_bonus(meeting);
    }

    for referral in snapshot
        .referrals
        .iter()
        .filter(|referral| known.contains_key(&referral.recruiter_id))
        .filter(|referral| in_scope(referral.date))
    {
        tallies.entry(referral.recruiter_id).or_default().referral_bonus +=
            referral_bonus(referral);
    }

    for training in snapshot
        .trainings
        .iter()
        .filter(|training| known.contains_key(&training.recruiter_id))
        .filter(|training| in_scope(training.completion_date))
    {
        tallies.entry(training.recruiter_id).or_default().training_bonus +=
            training_bonus(training);
    }

    let mut entries: Vec<LeaderboardEntry> = tallies
        .into_iter()
        .filter_map(|(recruiter_id, mut breakdown)| {
            let recruiter = known.get(&recruiter_id)?;
            breakdown.completed_points =
                breakdown.completed_count as i64 * STANDARD_WEIGHTS.per_completed_project;
            let score = breakdown.total();
            let badge = Badge::for_score(score);
            Some(LeaderboardEntry {
                rank: 0,
                recruiter_id,
                recruiter_name: recruiter.name.clone(),
                breakdown,
                score,
                badge,
                badge_label: badge.label(),
            })
        })
        .collect();

    entries.sort_by(ranking_order);
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    Leaderboard { period, entries }
}

/// Highest score first; equal scores fall back to name, then id.
fn ranking_order(left: &LeaderboardEntry, right: &LeaderboardEntry) -> Ordering {
    right
        .score
        .cmp(&left.score)
        .then_with(|| left.recruiter_name.cmp(&right.recruiter_name))
        .then_with(|| left.recruiter_id.cmp(&right.recruiter_id))
}
