use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Absentee listing row: `EMPID`, `Present`, `Date` of the original table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AbsenteeDetail {
    #[schema(example = "E2")]
    pub employee_id: String,
    pub present: bool,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailySummary {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    /// Rows marked present on `date`. Duplicate rows are counted twice.
    #[schema(example = 1)]
    pub present_count: usize,

    /// Size of `absent_employees`. Unlike `distinct ids - present_count`,
    /// this stays consistent when duplicate present rows exist.
    #[schema(example = 1)]
    pub absent_count: usize,

    /// Every identifier ever recorded that has no present mark on `date`.
    #[schema(example = json!(["E2"]), value_type = Vec<String>)]
    pub absent_employees: BTreeSet<String>,

    /// All rows of the absent identifiers, across every date.
    pub absentee_details: Vec<AbsenteeDetail>,
}
