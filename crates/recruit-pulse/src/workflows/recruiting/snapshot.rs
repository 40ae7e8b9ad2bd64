use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    MeetingAttendance, Project, Recruiter, RecruiterId, Referral, RetentionRecord,
    TrainingCompletion,
};

/// Point-in-time copy of every collection a dashboard request reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub recruiters: Vec<Recruiter>,
    pub retention: Vec<RetentionRecord>,
    pub meetings: Vec<MeetingAttendance>,
    pub referrals: Vec<Referral>,
    pub trainings: Vec<TrainingCompletion>,
    /// Sparse; recruiters without an entry get the default capacity.
    pub capacities: HashMap<RecruiterId, u32>,
}

impl Snapshot {
    pub fn capacity_for(&self, id: RecruiterId, default_capacity: u32) -> u32 {
        self.capacities
            .get(&id)
            .copied()
            .unwrap_or(default_capacity)
    }
}

/// Read side of the repository access layer.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> Result<Snapshot, SnapshotError>;
}

impl SnapshotSource for Snapshot {
    fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        Ok(self.clone())
    }
}

/// Failure to obtain a consistent snapshot. Always fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {collection} data: {source}")]
    Csv {
        collection: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("malformed {collection} row {row}: {detail}")]
    Malformed {
        collection: &'static str,
        row: usize,
        detail: String,
    },
}
