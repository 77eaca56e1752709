use crate::api::attendance::{MergedListResponse, SubmitAttendance, SubmitRejected};
use crate::engine::RejectReason;
use crate::model::{
    attendance::AttendanceRecord,
    merged::MergedRow,
    register::RegisterEntry,
    summary::{AbsenteeDetail, DailySummary},
};
use crate::models::{LoginReqDto, LoginResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Attendance Tracker

Records one attendance mark per employee per day in a flat CSV file and
joins it with a read-only employee register.

### Features
- **Submit** a present/absent mark (duplicates for the same day are rejected)
- **Search** the merged attendance + register view by EMPID
- **Daily summary** of present and absent employees
- **Export** the attendance table as CSV

### Security
Log in at `/auth/login` with the configured credentials and send the
returned token as `Authorization: Bearer <token>`.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::attendance::submit_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::search_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::export_attendance
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            SubmitAttendance,
            SubmitRejected,
            RejectReason,
            MergedListResponse,
            MergedRow,
            AttendanceRecord,
            RegisterEntry,
            DailySummary,
            AbsenteeDetail
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session login"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_attendance_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/auth/login"));
        assert!(paths.contains_key("/api/attendance"));
        assert!(paths.contains_key("/api/attendance/search"));
        assert!(paths.contains_key("/api/attendance/summary"));
        assert!(paths.contains_key("/api/attendance/export"));
    }
}
