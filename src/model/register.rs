use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Descriptive attributes of an employee, read from the register file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterEntry {
    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = "John Doe", nullable = true)]
    pub name: Option<String>,

    #[schema(example = "Physics", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Lecturer", nullable = true)]
    pub position: Option<String>,
}
