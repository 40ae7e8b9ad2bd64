//! Snapshot source backed by a directory of CSV exports.

mod normalizer;
mod parser;

use crate::workflows::recruiting::{Snapshot, SnapshotError, SnapshotSource};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;

pub const PROJECTS_FILE: &str = "projects.csv";
pub const RECRUITERS_FILE: &str = "recruiters.csv";
pub const CAPACITIES_FILE: &str = "capacities.csv";
pub const MEETINGS_FILE: &str = "meetings.csv";
pub const REFERRALS_FILE: &str = "referrals.csv";
pub const TRAININGS_FILE: &str = "trainings.csv";
pub const PLACEMENTS_FILE: &str = "placements.csv";

/// Reads a full snapshot from `dir` on every request.
///
/// `projects.csv` and `recruiters.csv` must exist; the other collections are
/// empty when their file is absent.
#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    dir: PathBuf,
}

impl CsvSnapshotSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn required(&self, name: &str) -> Result<File, SnapshotError> {
        let path = self.dir.join(name);
        File::open(&path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn optional(&self, name: &str) -> Result<Option<File>, SnapshotError> {
        let path = self.dir.join(name);
        match File::open(&path) {
            Ok(file) => Ok(Some(file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "optional snapshot file missing");
                Ok(None)
            }
            Err(source) => Err(SnapshotError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

impl SnapshotSource for CsvSnapshotSource {
    fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = Snapshot {
            projects: parser::parse_projects(self.required(PROJECTS_FILE)?)?,
            recruiters: parser::parse_recruiters(self.required(RECRUITERS_FILE)?)?,
            ..Snapshot::default()
        };

        if let Some(file) = self.optional(CAPACITIES_FILE)? {
            snapshot.capacities = parser::parse_capacities(file)?;
        }
        if let Some(file) = self.optional(MEETINGS_FILE)? {
            snapshot.meetings = parser::parse_meetings(file)?;
        }
        if let Some(file) = self.optional(REFERRALS_FILE)? {
            snapshot.referrals = parser::parse_referrals(file)?;
        }
        if let Some(file) = self.optional(TRAININGS_FILE)? {
            snapshot.trainings = parser::parse_trainings(file)?;
        }
        if let Some(file) = self.optional(PLACEMENTS_FILE)? {
            snapshot.retention = parser::parse_placements(file)?;
        }

        Ok(snapshot)
    }
}

/// In-memory CSV bodies for embedding callers and fixtures that hold the
/// exports as strings instead of files.
#[derive(Debug, Clone, Default)]
pub struct CsvSnapshotBodies {
    pub projects: String,
    pub recruiters: String,
    pub capacities: Option<String>,
    pub meetings: Option<String>,
    pub referrals: Option<String>,
    pub trainings: Option<String>,
    pub placements: Option<String>,
}

impl CsvSnapshotBodies {
    pub fn into_snapshot(self) -> Result<Snapshot, SnapshotError> {
        fn optional<T, F>(body: Option<String>, parse: F) -> Result<T, SnapshotError>
        where
            T: Default,
            F: FnOnce(&[u8]) -> Result<T, SnapshotError>,
        {
            match body {
                Some(body) => parse(body.as_bytes()),
                None => Ok(T::default()),
            }
        }

        Ok(Snapshot {
            projects: parser::parse_projects(self.projects.as_bytes())?,
            recruiters: parser::parse_recruiters(self.recruiters.as_bytes())?,
            capacities: optional(self.capacities, |body| parser::parse_capacities(body))?,
            meetings: optional(self.meetings, |body| parser::parse_meetings(body))?,
            referrals: optional(self.referrals, |body| parser::parse_referrals(body))?,
            trainings: optional(self.trainings, |body| parser::parse_trainings(body))?,
            retention: optional(self.placements, |body| parser::parse_placements(body))?,
        })
    }
}
