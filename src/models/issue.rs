use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IssueType, Priority, Status};
use crate::query::QueryParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    #[serde(rename = "projectId")]
    pub project_id: u64,
    #[serde(rename = "issueKey")]
    pub issue_key: String,
    #[serde(rename = "keyId")]
    pub key_id: u64,
    #[serde(rename = "issueType")]
    pub issue_type: IssueType,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// 課題追加時のリクエストパラメータ
///
/// 件名以外はクエリ文字列として送信される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddIssueParams {
    pub project_id: u64,
    pub issue_type_id: u64,
    pub priority_id: u64,
    pub parent_issue_id: Option<u64>,
    pub description: Option<String>,
    /// `yyyy-MM-dd`
    pub start_date: Option<String>,
    /// `yyyy-MM-dd`
    pub due_date: Option<String>,
}

impl AddIssueParams {
    pub fn new(project_id: u64, issue_type_id: u64, priority_id: u64) -> Self {
        Self {
            project_id,
            issue_type_id,
            priority_id,
            ..Default::default()
        }
    }

    pub fn parent_issue_id(mut self, parent_issue_id: u64) -> Self {
        self.parent_issue_id = Some(parent_issue_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new()
            .with("projectId", self.project_id)
            .with("issueTypeId", self.issue_type_id)
            .with("priorityId", self.priority_id);
        params.push_opt("parentIssueId", self.parent_issue_id);
        params.push_opt("description", self.description.clone());
        params.push_opt("startDate", self.start_date.clone());
        params.push_opt("dueDate", self.due_date.clone());
        params
    }
}
