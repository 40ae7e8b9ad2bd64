use crate::infra::{resolve_period, today};
use chrono::NaiveDate;
use clap::Args;
use recruit_pulse::config::AppConfig;
use recruit_pulse::error::AppError;
use recruit_pulse::telemetry::{self, LogOutput};
use recruit_pulse::workflows::csv_import::CsvSnapshotSource;
use recruit_pulse::workflows::recruiting::report::views::ProjectOverviewSummary;
use recruit_pulse::workflows::recruiting::{CapacityForecast, DashboardService, Leaderboard};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PeriodArgs {
    /// Calendar year to report on (defaults to the current year)
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub(crate) year: Option<i32>,
    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Last day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Directory holding the CSV snapshot (overrides APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    #[command(flatten)]
    pub(crate) period: PeriodArgs,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CapacityArgs {
    /// Reference date for the forecast (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Days ahead to look for closing projects (overrides APP_FORECAST_HORIZON_DAYS)
    #[arg(long)]
    pub(crate) horizon_days: Option<u32>,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct OverviewArgs {
    #[command(flatten)]
    pub(crate) period: PeriodArgs,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let LeaderboardArgs { period, source } = args;
    let service = build_service(source.data_dir)?;
    let period = resolve_period(period.year, period.from, period.to, today())?;
    let leaderboard = service.leaderboard(period)?;

    if source.json {
        print_json(&leaderboard)
    } else {
        render_leaderboard(&leaderboard);
        Ok(())
    }
}

pub(crate) fn run_capacity(args: CapacityArgs) -> Result<(), AppError> {
    let CapacityArgs {
        today: as_of,
        horizon_days,
        source,
    } = args;
    let service = build_service(source.data_dir)?;
    let forecast = service.capacity(as_of.unwrap_or_else(today), horizon_days)?;

    if source.json {
        print_json(&forecast)
    } else {
        render_capacity(&forecast);
        Ok(())
    }
}

pub(crate) fn run_overview(args: OverviewArgs) -> Result<(), AppError> {
    let OverviewArgs { period, source } = args;
    let service = build_service(source.data_dir)?;
    let period = resolve_period(period.year, period.from, period.to, today())?;
    let overview = service.overview(period)?;

    if source.json {
        print_json(&overview)
    } else {
        render_overview(&overview);
        Ok(())
    }
}

fn build_service(
    data_dir: Option<PathBuf>,
) -> Result<DashboardService<CsvSnapshotSource>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = data_dir {
        config.data.snapshot_dir = dir;
    }

    // stdout carries the report, so logs go to stderr.
    telemetry::init_with_output(&config.telemetry, LogOutput::Stderr)?;

    let source = Arc::new(CsvSnapshotSource::new(config.data.snapshot_dir));
    Ok(DashboardService::new(source, config.scoring))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
    println!("{body}");
    Ok(())
}

fn render_leaderboard(leaderboard: &Leaderboard) {
    println!(
        "Recruiter leaderboard {} to {}",
        leaderboard.period.start, leaderboard.period.end
    );

    if leaderboard.is_empty() {
        println!("No recruiters or projects in this period.");
        return;
    }

    for entry in &leaderboard.entries {
        let breakdown = &entry.breakdown;
        println!(
            "{:>3}. {:<24} {:>7} pts  {}",
            entry.rank, entry.recruiter_name, entry.score, entry.badge_label
        );
        println!(
            "     {} completed ({}) | reviews {} | speed {} | retention {} | meetings {} | referrals {} | training {}",
            breakdown.completed_count,
            breakdown.completed_points,
            breakdown.review_bonus,
            breakdown.speed_bonus,
            breakdown.retention_bonus,
            breakdown.meeting_bonus,
            breakdown.referral_bonus,
            breakdown.training_bonus
        );
    }
}

fn render_capacity(forecast: &CapacityForecast) {
    println!(
        "Capacity as of {} (forecast through {}, {} days)",
        forecast.today, forecast.horizon_end, forecast.horizon_days
    );

    for row in &forecast.recruiters {
        let flag = if row.over_capacity { "  [FULL]" } else { "" };
        println!(
            "- {:<24} active {}/{} | available {} | closing {} | projected available {}{}",
            row.recruiter_name,
            row.active_count,
            row.capacity,
            row.available_capacity,
            row.closing_count,
            row.projected_available_capacity,
            flag
        );
    }

    if forecast.closing_soon.is_empty() {
        println!("No projects due to close within the horizon.");
        return;
    }

    println!("Closing soon:");
    for project in &forecast.closing_soon {
        println!(
            "  - {} #{} (recruiter {}) ends {}",
            project.client_name, project.project_id, project.recruiter_id, project.computed_end_date
        );
    }
}

fn render_overview(overview: &ProjectOverviewSummary) {
    println!(
        "Project overview {} to {}: {} projects",
        overview.period.start, overview.period.end, overview.total_projects
    );

    for entry in &overview.status_counts {
        println!("- {}: {}", entry.status_label, entry.count);
    }

    if let Some(days) = overview.average_completed_duration_days {
        println!("Average completed duration: {days:.1} days");
    }
    if let Some(rating) = overview.average_review_rating {
        println!("Average review rating: {rating:.2}");
    }

    if !overview.sector_load.is_empty() {
        println!("By sector:");
        for group in &overview.sector_load {
            println!(
                "  - {}: {} total | {} completed | {} active",
                group.name, group.total, group.completed, group.active
            );
        }
    }

    if !overview.manager_load.is_empty() {
        println!("By project manager:");
        for group in &overview.manager_load {
            println!(
                "  - {}: {} total | {} completed | {} active",
                group.name, group.total, group.completed, group.active
            );
        }
    }
}
