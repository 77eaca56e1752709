use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance row joined with its register entry, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "date": "2024-01-01",
        "employee_id": "E1",
        "present": true,
        "name": "John Doe",
        "department": "Physics",
        "position": "Lecturer"
    })
)]
pub struct MergedRow {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "E1")]
    pub employee_id: String,

    pub present: bool,

    #[schema(nullable = true)]
    pub name: Option<String>,

    #[schema(nullable = true)]
    pub department: Option<String>,

    #[schema(nullable = true)]
    pub position: Option<String>,
}
