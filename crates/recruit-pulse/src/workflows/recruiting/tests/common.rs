use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use crate::workflows::recruiting::{
    MeetingAttendance, Project, ProjectId, ProjectStatus, Recruiter, RecruiterId, Referral,
    ReferralStatus, ReportingPeriod, RetentionRecord, Snapshot, SnapshotError, SnapshotSource,
    TrainingCompletion,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn year_2024() -> ReportingPeriod {
    ReportingPeriod::calendar_year(2024).expect("valid year")
}

pub(super) fn recruiter(id: u32, name: &str) -> Recruiter {
    Recruiter {
        id: RecruiterId(id),
        name: name.to_string(),
    }
}

pub(super) fn project(id: u32, recruiter_id: u32, status: ProjectStatus) -> Project {
    Project {
        id: ProjectId(id),
        client_name: format!("Client {id}"),
        sector: "Manufacturing".to_string(),
        project_manager: "Bianchi".to_string(),
        recruiter_id: RecruiterId(recruiter_id),
        status,
        start_date: Some(date(2024, 2, 1)),
        end_date: None,
        total_duration_days: None,
        expected_duration_days: None,
        review_rating: None,
        review_date: None,
    }
}

pub(super) fn completed(
    id: u32,
    recruiter_id: u32,
    total_duration_days: u32,
    review_rating: Option<u8>,
) -> Project {
    let mut project = project(id, recruiter_id, ProjectStatus::Completed);
    project.total_duration_days = Some(total_duration_days);
    project.review_rating = review_rating;
    project
}

pub(super) fn in_progress(
    id: u32,
    recruiter_id: u32,
    start_date: NaiveDate,
    expected_duration_days: Option<u32>,
) -> Project {
    let mut project = project(id, recruiter_id, ProjectStatus::InProgress);
    project.start_date = Some(start_date);
    project.expected_duration_days = expected_duration_days;
    project
}

pub(super) fn placement(
    project_id: u32,
    recruiter_id: u32,
    placed: Option<NaiveDate>,
    departed: Option<NaiveDate>,
) -> RetentionRecord {
    RetentionRecord {
        project_id: ProjectId(project_id),
        recruiter_id: RecruiterId(recruiter_id),
        candidate_name: format!("Candidate {project_id}"),
        placement_date: placed,
        departure_date: departed,
    }
}

pub(super) fn meeting(recruiter_id: u32, on: NaiveDate, attended: bool) -> MeetingAttendance {
    MeetingAttendance {
        recruiter_id: RecruiterId(recruiter_id),
        meeting_date: Some(on),
        attended,
    }
}

pub(super) fn referral(recruiter_id: u32, on: NaiveDate, status: &str) -> Referral {
    Referral {
        recruiter_id: RecruiterId(recruiter_id),
        client_name: "Lupi Logistica".to_string(),
        date: Some(on),
        status: ReferralStatus::parse(status),
    }
}

pub(super) fn training(recruiter_id: u32, on: NaiveDate, course: &str) -> TrainingCompletion {
    TrainingCompletion {
        recruiter_id: RecruiterId(recruiter_id),
        course_name: course.to_string(),
        completion_date: Some(on),
    }
}

/// Recruiter A from the incentive handbook example: 2270 points, Bronze.
pub(super) fn handbook_snapshot() -> Snapshot {
    Snapshot {
        recruiters: vec![recruiter(1, "Anna Conti"), recruiter(2, "Bruno Ferri")],
        projects: vec![completed(100, 1, 45, Some(5)), completed(101, 1, 90, Some(3))],
        retention: vec![placement(
            100,
            1,
            Some(date(2024, 1, 1)),
            Some(date(2024, 7, 30)),
        )],
        meetings: vec![meeting(1, date(2024, 3, 4), true)],
        referrals: vec![referral(1, date(2024, 5, 6), "Acquired")],
        trainings: vec![training(1, date(2024, 6, 7), "Structured interviewing")],
        ..Snapshot::default()
    }
}

/// Source that counts fetches so tests can assert one read per request.
pub(super) struct CountingSource {
    pub(super) snapshot: Snapshot,
    pub(super) fetches: AtomicUsize,
}

impl CountingSource {
    pub(super) fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for CountingSource {
    fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}

pub(super) struct UnavailableSource;

impl SnapshotSource for UnavailableSource {
    fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        Err(SnapshotError::Unavailable("connection refused".to_string()))
    }
}
