use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueType {
    pub id: u64,
    #[serde(rename = "projectId")]
    pub project_id: u64,
    pub name: String,
    pub color: String,
    #[serde(rename = "displayOrder")]
    pub display_order: i64,
    #[serde(rename = "templateSummary")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_summary: Option<String>,
    #[serde(rename = "templateDescription")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_description: Option<String>,
}
