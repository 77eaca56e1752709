use crate::{
    auth::auth::Session,
    engine::{self, RejectReason, SubmitOutcome},
    error::AppError,
    model::merged::MergedRow,
    store::AttendanceStore,
};
use actix_web::{HttpResponse, http::header, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct SubmitAttendance {
    #[schema(example = "E1")]
    pub employee_id: String,
    /// Defaults to today
    #[schema(example = "2024-01-01", format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    #[schema(example = true)]
    pub present: bool,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitRejected {
    #[schema(example = "Attendance for E1 on 2024-01-01 already submitted.")]
    pub message: String,
    pub reason: RejectReason,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact, case-sensitive employee id
    pub empid: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Day to summarize (`YYYY-MM-DD`), defaults to today
    #[param(value_type = Option<String>)]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct MergedListResponse {
    pub data: Vec<MergedRow>,
    #[schema(example = 1)]
    pub total: usize,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Submit one attendance record
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = SubmitAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "message": "Attendance submitted for E1 on 2024-01-01"
        })),
        (status = 409, description = "Already submitted for that day", body = SubmitRejected),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "attendance_submit",
    skip(session, store, payload),
    fields(
        user = %session.username,
        session_id = %session.session_id,
        employee_id = %payload.employee_id
    )
)]
pub async fn submit_attendance(
    session: Session,
    store: web::Data<AttendanceStore>,
    payload: web::Json<SubmitAttendance>,
) -> Result<HttpResponse, AppError> {
    let SubmitAttendance {
        employee_id,
        date,
        present,
    } = payload.into_inner();
    let date = date.unwrap_or_else(today);

    let outcome = {
        let employee_id = employee_id.clone();
        web::block(move || store.submit(&employee_id, date, present)).await??
    };

    match outcome {
        SubmitOutcome::Accepted => {
            info!(%date, present, "Attendance submitted");
            Ok(HttpResponse::Ok().json(json!({
                "message": format!("Attendance submitted for {employee_id} on {date}")
            })))
        }
        SubmitOutcome::Rejected(reason) => {
            warn!(%date, %reason, "Attendance rejected");
            Ok(HttpResponse::Conflict().json(SubmitRejected {
                message: format!("Attendance for {employee_id} on {date} already submitted."),
                reason,
            }))
        }
    }
}

/// Attendance data with person details
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Full merged view", body = MergedListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    _session: Session,
    store: web::Data<AttendanceStore>,
) -> Result<HttpResponse, AppError> {
    let data = web::block(move || store.merged_view()).await??;

    Ok(HttpResponse::Ok().json(MergedListResponse {
        total: data.len(),
        data,
    }))
}

/// Search attendance by employee id
#[utoipa::path(
    get,
    path = "/api/attendance/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching rows, possibly none", body = MergedListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_search", skip(_session, store, query), fields(empid = %query.empid))]
pub async fn search_attendance(
    _session: Session,
    store: web::Data<AttendanceStore>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let merged = web::block(move || store.merged_view()).await??;
    let data = engine::search(&merged, &query.empid);

    Ok(HttpResponse::Ok().json(MergedListResponse {
        total: data.len(),
        data,
    }))
}

/// Present/absent summary for one day
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Daily summary", body = crate::model::summary::DailySummary),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    _session: Session,
    store: web::Data<AttendanceStore>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let date = query.date.unwrap_or_else(today);
    let table = web::block(move || store.load_attendance()).await??;

    Ok(HttpResponse::Ok().json(engine::summarize(&table, date)))
}

/// Export the attendance table as CSV
#[utoipa::path(
    post,
    path = "/api/attendance/export",
    responses(
        (status = 200, description = "Exported table", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn export_attendance(
    session: Session,
    store: web::Data<AttendanceStore>,
) -> Result<HttpResponse, AppError> {
    let file_name = store
        .export_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attendance.csv".to_string());

    let bytes = web::block(move || store.export()).await??;
    info!(
        user = %session.username,
        session_id = %session.session_id,
        bytes = bytes.len(),
        "Attendance downloaded"
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(bytes))
}
