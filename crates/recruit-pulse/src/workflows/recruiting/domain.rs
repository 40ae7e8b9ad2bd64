use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity assumed for recruiters without an explicit capacity row.
pub const DEFAULT_CAPACITY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecruiterId(pub u32);

impl fmt::Display for RecruiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub u32);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Blocked,
}

impl ProjectStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::InProgress, Self::Blocked, Self::Completed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
        }
    }

    /// Projects that still occupy a recruiter's capacity.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress | Self::Blocked)
    }

    /// Accepts the English labels and the Italian ones used by the intake sheets.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "completed" | "complete" | "completato" | "concluso" => Some(Self::Completed),
            "in progress" | "inprogress" | "in corso" | "attivo" => Some(Self::InProgress),
            "blocked" | "bloccato" | "sospeso" => Some(Self::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    Acquired,
    NotAcquired,
}

impl ReferralStatus {
    /// Case-insensitive; anything that is not an acquisition counts as not acquired.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("acquired") || trimmed.eq_ignore_ascii_case("acquisito") {
            Self::Acquired
        } else {
            Self::NotAcquired
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client_name: String,
    pub sector: String,
    pub project_manager: String,
    pub recruiter_id: RecruiterId,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Elapsed days; only meaningful once the project is completed.
    pub total_duration_days: Option<u32>,
    pub expected_duration_days: Option<u32>,
    /// Client review, 0 to 5 stars.
    pub review_rating: Option<u8>,
    pub review_date: Option<NaiveDate>,
}

impl Project {
    /// Planned closing date derived from the start date and the expected duration.
    pub fn computed_end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        let expected = self.expected_duration_days.filter(|days| *days > 0)?;
        start.checked_add_days(chrono::Days::new(u64::from(expected)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruiter {
    pub id: RecruiterId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingAttendance {
    pub recruiter_id: RecruiterId,
    pub meeting_date: Option<NaiveDate>,
    pub attended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    pub recruiter_id: RecruiterId,
    pub client_name: String,
    pub date: Option<NaiveDate>,
    pub status: ReferralStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCompletion {
    pub recruiter_id: RecruiterId,
    pub course_name: String,
    pub completion_date: Option<NaiveDate>,
}

/// A placed candidate; tenure drives the retention bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRecord {
    pub project_id: ProjectId,
    pub recruiter_id: RecruiterId,
    pub candidate_name: String,
    pub placement_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

impl RetentionRecord {
    /// Tenure in 30-day months, `None` while the candidate is still placed.
    pub fn tenure_months(&self) -> Option<f64> {
        let placed = self.placement_date?;
        let departed = self.departure_date?;
        Some((departed - placed).num_days() as f64 / 30.0)
    }
}

/// Inclusive date range a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn calendar_year(year: i32) -> Result<Self, PeriodError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(PeriodError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(PeriodError::InvalidYear(year))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Undated records fall outside every period.
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        date.map(|date| self.contains(date)).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("period start {start} is after period end {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}
