use crate::infra::{deserialize_optional_date, resolve_period, today, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use recruit_pulse::error::AppError;
use recruit_pulse::workflows::recruiting::report::views::ProjectOverviewSummary;
use recruit_pulse::workflows::recruiting::{
    CapacityForecast, DashboardError, DashboardService, LeaderboardEntry, ReportingPeriod,
    SnapshotSource,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PeriodRequest {
    #[serde(default)]
    pub(crate) year: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CapacityRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) horizon_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(default)]
    pub(crate) year: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) horizon_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LeaderboardResponse {
    pub(crate) period: ReportingPeriod,
    pub(crate) no_data: bool,
    pub(crate) entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) leaderboard: LeaderboardResponse,
    pub(crate) capacity: CapacityForecast,
    pub(crate) overview: ProjectOverviewSummary,
}

pub(crate) fn with_dashboard_routes<S>(service: Arc<DashboardService<S>>) -> Router
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route("/api/v1/leaderboard", post(leaderboard_endpoint::<S>))
        .route("/api/v1/capacity", post(capacity_endpoint::<S>))
        .route("/api/v1/overview", post(overview_endpoint::<S>))
        .route("/api/v1/dashboard", post(dashboard_endpoint::<S>))
        .with_state(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

/// Runs a service call on the blocking pool; snapshot sources do synchronous I/O.
async fn run_blocking<S, T, F>(service: Arc<DashboardService<S>>, job: F) -> Result<T, AppError>
where
    S: SnapshotSource + 'static,
    T: Send + 'static,
    F: FnOnce(&DashboardService<S>) -> Result<T, DashboardError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || job(&service))
        .await
        .map_err(|err| AppError::Server(axum::Error::new(err)))?
        .map_err(AppError::from)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn leaderboard_endpoint<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(payload): Json<PeriodRequest>,
) -> Result<Json<LeaderboardResponse>, AppError>
where
    S: SnapshotSource + 'static,
{
    let period = resolve_period(payload.year, payload.from, payload.to, today())?;
    let leaderboard = run_blocking(service, move |service| service.leaderboard(period)).await?;

    Ok(Json(LeaderboardResponse {
        period: leaderboard.period,
        no_data: leaderboard.is_empty(),
        entries: leaderboard.entries,
    }))
}

pub(crate) async fn capacity_endpoint<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(payload): Json<CapacityRequest>,
) -> Result<Json<CapacityForecast>, AppError>
where
    S: SnapshotSource + 'static,
{
    let today = payload.today.unwrap_or_else(today);
    let horizon_days = payload.horizon_days;
    let forecast =
        run_blocking(service, move |service| service.capacity(today, horizon_days)).await?;
    Ok(Json(forecast))
}

pub(crate) async fn overview_endpoint<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(payload): Json<PeriodRequest>,
) -> Result<Json<ProjectOverviewSummary>, AppError>
where
    S: SnapshotSource + 'static,
{
    let period = resolve_period(payload.year, payload.from, payload.to, today())?;
    let overview = run_blocking(service, move |service| service.overview(period)).await?;
    Ok(Json(overview))
}

pub(crate) async fn dashboard_endpoint<S>(
    State(service): State<Arc<DashboardService<S>>>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError>
where
    S: SnapshotSource + 'static,
{
    let DashboardRequest {
        year,
        from,
        to,
        today: as_of,
        horizon_days,
    } = payload;

    let as_of = as_of.unwrap_or_else(today);
    let period = resolve_period(year, from, to, as_of)?;
    let dashboard = run_blocking(service, move |service| {
        service.dashboard(period, as_of, horizon_days)
    })
    .await?;

    Ok(Json(DashboardResponse {
        leaderboard: LeaderboardResponse {
            period: dashboard.leaderboard.period,
            no_data: dashboard.leaderboard.is_empty(),
            entries: dashboard.leaderboard.entries,
        },
        capacity: dashboard.capacity,
        overview: dashboard.overview,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use recruit_pulse::config::ScoringConfig;
    use recruit_pulse::workflows::recruiting::{
        Badge, MeetingAttendance, Project, ProjectId, ProjectStatus, Recruiter, RecruiterId,
        Snapshot, SnapshotError,
    };
    use tower::ServiceExt;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot {
            recruiters: vec![
                Recruiter {
                    id: RecruiterId(1),
                    name: "Anna Conti".to_string(),
                },
                Recruiter {
                    id: RecruiterId(2),
                    name: "Bruno Ferri".to_string(),
                },
            ],
            projects: vec![
                Project {
                    id: ProjectId(10),
                    client_name: "Rossi Srl".to_string(),
                    sector: "Manufacturing".to_string(),
                    project_manager: "Bianchi".to_string(),
                    recruiter_id: RecruiterId(1),
                    status: ProjectStatus::Completed,
                    start_date: Some(date(2024, 2, 1)),
                    end_date: Some(date(2024, 3, 1)),
                    total_duration_days: Some(29),
                    expected_duration_days: Some(30),
                    review_rating: Some(5),
                    review_date: Some(date(2024, 3, 5)),
                },
                Project {
                    id: ProjectId(11),
                    client_name: "Verdi SpA".to_string(),
                    sector: "Retail".to_string(),
                    project_manager: "Bianchi".to_string(),
                    recruiter_id: RecruiterId(2),
                    status: ProjectStatus::InProgress,
                    start_date: Some(date(2024, 5, 20)),
                    end_date: None,
                    total_duration_days: None,
                    expected_duration_days: Some(20),
                    review_rating: None,
                    review_date: None,
                },
            ],
            meetings: vec![MeetingAttendance {
                recruiter_id: RecruiterId(2),
                meeting_date: Some(date(2024, 4, 4)),
                attended: true,
            }],
            ..Snapshot::default()
        };
        snapshot.capacities.insert(RecruiterId(2), 1);
        snapshot
    }

    fn service() -> Arc<DashboardService<Snapshot>> {
        Arc::new(DashboardService::new(
            Arc::new(sample_snapshot()),
            ScoringConfig::default(),
        ))
    }

    fn scoped_service() -> Arc<DashboardService<Snapshot>> {
        let config = ScoringConfig {
            scope_activity_to_period: true,
            ..ScoringConfig::default()
        };
        Arc::new(DashboardService::new(Arc::new(sample_snapshot()), config))
    }

    struct OfflineSource;

    impl SnapshotSource for OfflineSource {
        fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
            Err(SnapshotError::Unavailable("database offline".to_string()))
        }
    }

    #[tokio::test]
    async fn leaderboard_endpoint_ranks_recruiters() {
        let request = PeriodRequest {
            year: Some(2024),
            ..PeriodRequest::default()
        };

        let Json(body) = leaderboard_endpoint(State(service()), Json(request))
            .await
            .expect("leaderboard builds");

        assert!(!body.no_data);
        assert_eq!(body.entries.len(), 2);
        assert_eq!(body.entries[0].recruiter_name, "Anna Conti");
        assert_eq!(body.entries[0].score, 10 + 500 + 50);
        assert_eq!(body.entries[0].badge, Badge::Grey);
        assert_eq!(body.entries[1].score, 100);
    }

    #[tokio::test]
    async fn leaderboard_endpoint_reports_no_data() {
        let request = PeriodRequest {
            year: Some(2019),
            ..PeriodRequest::default()
        };

        let Json(body) = leaderboard_endpoint(State(scoped_service()), Json(request))
            .await
            .expect("leaderboard builds");

        assert!(body.no_data);
        assert!(body.entries.is_empty());
    }

    #[tokio::test]
    async fn activity_history_counts_outside_the_period_by_default() {
        let request = PeriodRequest {
            year: Some(2019),
            ..PeriodRequest::default()
        };

        let Json(body) = leaderboard_endpoint(State(service()), Json(request))
            .await
            .expect("leaderboard builds");

        assert!(!body.no_data);
        assert_eq!(body.entries.len(), 1);
        assert_eq!(body.entries[0].recruiter_id, RecruiterId(2));
        assert_eq!(body.entries[0].breakdown.meeting_bonus, 100);
        assert_eq!(body.entries[0].breakdown.completed_count, 0);
        assert_eq!(body.entries[0].score, 100);
    }

    #[tokio::test]
    async fn capacity_endpoint_projects_closures() {
        let request = CapacityRequest {
            today: Some(date(2024, 6, 1)),
            horizon_days: Some(14),
        };

        let Json(body) = capacity_endpoint(State(service()), Json(request))
            .await
            .expect("capacity builds");

        let bruno = body
            .recruiters
            .iter()
            .find(|row| row.recruiter_id == RecruiterId(2))
            .expect("recruiter present");
        assert!(bruno.over_capacity);
        assert_eq!(bruno.closing_count, 1);
        assert_eq!(bruno.projected_available_capacity, 1);
    }

    #[tokio::test]
    async fn dashboard_endpoint_uses_today_for_default_period() {
        let request = DashboardRequest {
            today: Some(date(2024, 6, 1)),
            ..DashboardRequest::default()
        };

        let Json(body) = dashboard_endpoint(State(service()), Json(request))
            .await
            .expect("dashboard builds");

        assert_eq!(body.leaderboard.period.start, date(2024, 1, 1));
        assert_eq!(body.overview.total_projects, 2);
        assert_eq!(body.capacity.horizon_days, 14);
    }

    #[tokio::test]
    async fn inverted_period_is_a_bad_request() {
        let app = with_dashboard_routes(service());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/leaderboard")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"from":"2024-05-01","to":"2024-04-01"}"#))
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn offline_source_is_service_unavailable() {
        let service = Arc::new(DashboardService::new(
            Arc::new(OfflineSource),
            ScoringConfig::default(),
        ));
        let app = with_dashboard_routes(service);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/overview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("database offline"));
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let app = with_dashboard_routes(service());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
