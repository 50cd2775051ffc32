use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "projectId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(rename = "issueId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    // 状態変更のみのコメントは本文がnull
    #[serde(default)]
    pub content: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// コメント追加時のリクエストパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddCommentParams {
    /// 通知先ユーザーのID（`notifiedUserId[]`）
    pub notified_user_ids: Vec<u64>,
    /// 添付ファイルのID（`attachmentId[]`）
    pub attachment_ids: Vec<u64>,
}

impl AddCommentParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notified_user_ids(mut self, ids: Vec<u64>) -> Self {
        self.notified_user_ids = ids;
        self
    }

    pub fn attachment_ids(mut self, ids: Vec<u64>) -> Self {
        self.attachment_ids = ids;
        self
    }

    pub fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("notifiedUserId[]", self.notified_user_ids.as_slice())
            .with("attachmentId[]", self.attachment_ids.as_slice())
    }
}
