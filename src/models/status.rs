use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: u64,
    #[serde(rename = "projectId")]
    pub project_id: u64,
    pub name: String,
    pub color: String,
    #[serde(rename = "displayOrder")]
    pub display_order: i64,
}
