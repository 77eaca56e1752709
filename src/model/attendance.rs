use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance mark. `(employee_id, date)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "date": "2024-01-01",
        "employee_id": "E1",
        "present": true
    })
)]
pub struct AttendanceRecord {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = true)]
    pub present: bool,
}

impl AttendanceRecord {
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, present: bool) -> Self {
        Self {
            date,
            employee_id: employee_id.into(),
            present,
        }
    }

    pub fn is_key(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.employee_id == employee_id && self.date == date
    }
}
