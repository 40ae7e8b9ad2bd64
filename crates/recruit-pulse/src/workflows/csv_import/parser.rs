use super::normalizer::{
    normalize_text, parse_count, parse_flag, parse_optional_date, parse_rating,
};
use crate::workflows::recruiting::{
    MeetingAttendance, Project, ProjectId, ProjectStatus, Recruiter, RecruiterId, Referral,
    ReferralStatus, RetentionRecord, SnapshotError, TrainingCompletion,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;

fn read_rows<R, T>(reader: R, collection: &'static str) -> Result<Vec<T>, SnapshotError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .map(|row| row.map_err(|source| SnapshotError::Csv { collection, source }))
        .collect()
}

pub(crate) fn parse_projects<R: Read>(reader: R) -> Result<Vec<Project>, SnapshotError> {
    read_rows::<_, ProjectRow>(reader, "projects")?
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_project(index + 1))
        .collect()
}

pub(crate) fn parse_recruiters<R: Read>(reader: R) -> Result<Vec<Recruiter>, SnapshotError> {
    Ok(read_rows::<_, RecruiterRow>(reader, "recruiters")?
        .into_iter()
        .map(|row| Recruiter {
            id: RecruiterId(row.id),
            name: normalize_text(&row.name),
        })
        .collect())
}

pub(crate) fn parse_capacities<R: Read>(
    reader: R,
) -> Result<HashMap<RecruiterId, u32>, SnapshotError> {
    Ok(read_rows::<_, CapacityRow>(reader, "capacities")?
        .into_iter()
        .filter_map(|row| {
            let capacity = parse_count(row.capacity.as_deref())?;
            Some((RecruiterId(row.recruiter_id), capacity))
        })
        .collect())
}

pub(crate) fn parse_meetings<R: Read>(reader: R) -> Result<Vec<MeetingAttendance>, SnapshotError> {
    Ok(read_rows::<_, MeetingRow>(reader, "meetings")?
        .into_iter()
        .map(|row| MeetingAttendance {
            recruiter_id: RecruiterId(row.recruiter_id),
            meeting_date: parse_optional_date(row.meeting_date.as_deref()),
            attended: parse_flag(&row.attended),
        })
        .collect())
}

pub(crate) fn parse_referrals<R: Read>(reader: R) -> Result<Vec<Referral>, SnapshotError> {
    Ok(read_rows::<_, ReferralRow>(reader, "referrals")?
        .into_iter()
        .map(|row| Referral {
            recruiter_id: RecruiterId(row.recruiter_id),
            client_name: normalize_text(&row.client_name),
            date: parse_optional_date(row.date.as_deref()),
            status: ReferralStatus::parse(&row.status),
        })
        .collect())
}

pub(crate) fn parse_trainings<R: Read>(
    reader: R,
) -> Result<Vec<TrainingCompletion>, SnapshotError> {
    Ok(read_rows::<_, TrainingRow>(reader, "trainings")?
        .into_iter()
        .map(|row| TrainingCompletion {
            recruiter_id: RecruiterId(row.recruiter_id),
            course_name: normalize_text(&row.course_name),
            completion_date: parse_optional_date(row.completion_date.as_deref()),
        })
        .collect())
}

pub(crate) fn parse_placements<R: Read>(
    reader: R,
) -> Result<Vec<RetentionRecord>, SnapshotError> {
    Ok(read_rows::<_, PlacementRow>(reader, "placements")?
        .into_iter()
        .map(|row| RetentionRecord {
            project_id: ProjectId(row.project_id),
            recruiter_id: RecruiterId(row.recruiter_id),
            candidate_name: normalize_text(&row.candidate_name),
            placement_date: parse_optional_date(row.placement_date.as_deref()),
            departure_date: parse_optional_date(row.departure_date.as_deref()),
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: u32,
    #[serde(default)]
    client_name: String,
    #[serde(default)]
    sector: String,
    #[serde(default)]
    project_manager: String,
    recruiter_id: u32,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    start_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_duration_days: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    expected_duration_days: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    review_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    review_date: Option<String>,
}

impl ProjectRow {
    fn into_project(self, row: usize) -> Result<Project, SnapshotError> {
        let status = ProjectStatus::parse(&self.status).ok_or_else(|| SnapshotError::Malformed {
            collection: "projects",
            row,
            detail: format!("unknown project status '{}'", self.status),
        })?;

        Ok(Project {
            id: ProjectId(self.id),
            client_name: normalize_text(&self.client_name),
            sector: normalize_text(&self.sector),
            project_manager: normalize_text(&self.project_manager),
            recruiter_id: RecruiterId(self.recruiter_id),
            status,
            start_date: parse_optional_date(self.start_date.as_deref()),
            end_date: parse_optional_date(self.end_date.as_deref()),
            total_duration_days: parse_count(self.total_duration_days.as_deref()),
            expected_duration_days: parse_count(self.expected_duration_days.as_deref()),
            review_rating: parse_rating(self.review_rating.as_deref()),
            review_date: parse_optional_date(self.review_date.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RecruiterRow {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CapacityRow {
    recruiter_id: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    capacity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeetingRow {
    recruiter_id: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    meeting_date: Option<String>,
    #[serde(default)]
    attended: String,
}

#[derive(Debug, Deserialize)]
struct ReferralRow {
    recruiter_id: u32,
    #[serde(default)]
    client_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct TrainingRow {
    recruiter_id: u32,
    #[serde(default)]
    course_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    completion_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlacementRow {
    project_id: u32,
    recruiter_id: u32,
    #[serde(default)]
    candidate_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    placement_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    departure_date: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
