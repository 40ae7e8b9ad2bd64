use chrono::{Datelike, Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use recruit_pulse::workflows::recruiting::{PeriodError, ReportingPeriod};
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve the reporting period from optional bounds and year.
///
/// Explicit bounds win; a single bound is completed to its calendar year.
/// With nothing given the current calendar year is used.
pub(crate) fn resolve_period(
    year: Option<i32>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<ReportingPeriod, PeriodError> {
    match (from, to) {
        (Some(from), Some(to)) => ReportingPeriod::new(from, to),
        (Some(from), None) => {
            let year = ReportingPeriod::calendar_year(from.year())?;
            ReportingPeriod::new(from, year.end)
        }
        (None, Some(to)) => {
            let year = ReportingPeriod::calendar_year(to.year())?;
            ReportingPeriod::new(year.start, to)
        }
        (None, None) => ReportingPeriod::calendar_year(year.unwrap_or_else(|| today.year())),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
