use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    Clock, DaySchedule, Lesson, Schedule, ScheduleConfig, ScheduleQuery, SystemClock, When,
    lesson::DATE_FORMAT,
};

#[derive(Clone)]
pub struct AppState {
    schedule: Arc<Schedule>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Shares `schedule` and resolves "today" with a system clock at the
    /// config's UTC offset.
    pub fn new(schedule: Schedule) -> Self {
        let clock = SystemClock::for_config(schedule.config());
        Self::with_clock(Arc::new(schedule), clock)
    }

    pub fn with_clock(schedule: Arc<Schedule>, clock: impl Clock + 'static) -> Self {
        Self {
            schedule,
            clock: Arc::new(clock),
        }
    }

    fn query(&self) -> ScheduleQuery<'_, &dyn Clock> {
        ScheduleQuery::new(&self.schedule, self.clock.as_ref())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RangeParams {
    from: Option<String>,
    to: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config))
        .route("/lessons", get(list_lessons))
        .route("/schedule/:when", get(get_schedule))
        .route("/schedule/date/:date", get(get_schedule_by_date))
        .route("/weeks/:week", get(get_week))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, schedule: Schedule) -> std::io::Result<()> {
    let state = AppState::new(schedule);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "timetable HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<ScheduleConfig> {
    Json(state.schedule.config().clone())
}

async fn list_lessons(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let lessons = state.schedule.lessons();
    let from = parse_bound("from", params.from.as_deref())?;
    let to = parse_bound("to", params.to.as_deref())?;
    let selected = match (from, to) {
        (None, None) => lessons,
        (from, to) => state.schedule.lessons_between(
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        ),
    };
    Ok(Json(selected.to_vec()))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(when): Path<String>,
) -> Json<DaySchedule> {
    let when = When::parse(&when);
    let day = state.query().resolve(&when);
    debug!(%when, date = %day.date, lessons = day.lessons.len(), "resolved schedule");
    Json(day)
}

async fn get_schedule_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Json<Vec<Lesson>> {
    Json(state.query().get_schedule_by_date(&date))
}

async fn get_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let week: u32 = week.trim().parse().map_err(|err| {
        ApiError::invalid(format!("invalid week '{week}' (expected a positive number): {err}"))
    })?;
    Ok(Json(state.schedule.lessons_in_week(week).to_vec()))
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
            ApiError::invalid(format!("invalid {name} date '{value}' (expected YYYY-MM-DD): {err}"))
        })
    })
    .transpose()
}
