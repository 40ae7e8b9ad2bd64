mod overview;
pub mod views;

pub use overview::{project_overview, GroupLoad, ProjectOverview};
