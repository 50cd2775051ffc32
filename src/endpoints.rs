//! Backlog API v2 のエンドポイント
//!
//! 各関数はURLを組み立て、1回だけリクエストを送信し、期待するステータスコードを
//! 検査してからJSONをパースする。

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::{info, instrument};
use urlencoding::encode;

use crate::client::{BacklogClient, Payload};
use crate::error::{Error, Result};
use crate::models::{
    AddCommentParams, AddIssueParams, Attachment, Comment, Issue, IssueType, Priority,
    ProjectCategory, ProjectInfo, SharedFile, SpaceInfo, Status,
};
use crate::query::QueryParams;

fn require_project(project_id_or_key: &str) -> Result<()> {
    if project_id_or_key.is_empty() {
        return Err(Error::InvalidInput("projectIdOrKey is required".to_string()));
    }
    Ok(())
}

fn require_issue(issue_id_or_key: &str) -> Result<()> {
    if issue_id_or_key.is_empty() {
        return Err(Error::InvalidInput("issueIdOrKey is required".to_string()));
    }
    Ok(())
}

/// IDまたはキーを1つのパスセグメントとしてエンコードする
fn segment(id_or_key: &str) -> std::borrow::Cow<'_, str> {
    encode(id_or_key)
}

impl BacklogClient {
    /// スペース情報を取得する
    #[instrument(skip(self))]
    pub async fn get_space(&self) -> Result<SpaceInfo> {
        self.get("/space", &QueryParams::new(), "get space").await
    }

    /// 優先度一覧を取得する
    #[instrument(skip(self))]
    pub async fn get_priorities(&self) -> Result<Vec<Priority>> {
        self.get("/priorities", &QueryParams::new(), "get priorities").await
    }

    /// 1件以上のプロジェクトに紐づく課題を取得する
    ///
    /// `project_ids` が空の場合は絞り込みなしで問い合わせる。
    #[instrument(skip(self))]
    pub async fn get_issues(&self, project_ids: &[u64]) -> Result<Vec<Issue>> {
        let params = QueryParams::new().with("projectId[]", project_ids);
        let issues: Vec<Issue> = self.get("/issues", &params, "get issues").await?;
        info!(count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    /// 単一の課題を取得する
    #[instrument(skip(self))]
    pub async fn get_issue(&self, issue_id_or_key: &str) -> Result<Issue> {
        require_issue(issue_id_or_key)?;
        let path = format!("/issues/{}", segment(issue_id_or_key));
        self.get(&path, &QueryParams::new(), "get issue").await
    }

    /// 単一のプロジェクト情報を取得する
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id_or_key: &str) -> Result<ProjectInfo> {
        require_project(project_id_or_key)?;
        let path = format!("/projects/{}", segment(project_id_or_key));
        self.get(&path, &QueryParams::new(), "get project").await
    }

    /// プロジェクトのカテゴリ一覧を取得する
    #[instrument(skip(self))]
    pub async fn get_project_categories(
        &self,
        project_id_or_key: &str,
    ) -> Result<Vec<ProjectCategory>> {
        require_project(project_id_or_key)?;
        self.get(
            &format!("/projects/{}/categories", segment(project_id_or_key)),
            &QueryParams::new(),
            "get project categories",
        )
        .await
    }

    /// プロジェクトの種別一覧を取得する
    #[instrument(skip(self))]
    pub async fn get_project_issue_types(&self, project_id_or_key: &str) -> Result<Vec<IssueType>> {
        require_project(project_id_or_key)?;
        self.get(
            &format!("/projects/{}/issueTypes", segment(project_id_or_key)),
            &QueryParams::new(),
            "get project issue types",
        )
        .await
    }

    /// プロジェクトの状態一覧を取得する
    #[instrument(skip(self))]
    pub async fn get_project_statuses(&self, project_id_or_key: &str) -> Result<Vec<Status>> {
        require_project(project_id_or_key)?;
        self.get(
            &format!("/projects/{}/statuses", segment(project_id_or_key)),
            &QueryParams::new(),
            "get project statuses",
        )
        .await
    }

    /// 課題を追加する
    ///
    /// 件名はフォームで、その他のパラメータはクエリ文字列で送信する。
    #[instrument(skip(self, params), fields(project_id = params.project_id))]
    pub async fn add_issue(&self, summary: &str, params: &AddIssueParams) -> Result<()> {
        self.post_raw(
            "/issues",
            &params.to_query_params(),
            Payload::form([("summary", summary)]),
            StatusCode::CREATED,
            "add issue",
        )
        .await?;
        info!("Added issue");
        Ok(())
    }

    /// コメントを追加する
    #[instrument(skip(self, content, params))]
    pub async fn add_comment(
        &self,
        issue_id_or_key: &str,
        content: &str,
        params: &AddCommentParams,
    ) -> Result<Comment> {
        require_issue(issue_id_or_key)?;
        self.post(
            &format!("/issues/{}/comments", segment(issue_id_or_key)),
            &params.to_query_params(),
            Payload::form([("content", content)]),
            StatusCode::CREATED,
            "add comment",
        )
        .await
    }

    /// 課題のコメント一覧を取得する
    #[instrument(skip(self))]
    pub async fn get_comments(&self, issue_id_or_key: &str) -> Result<Vec<Comment>> {
        require_issue(issue_id_or_key)?;
        self.get(
            &format!("/issues/{}/comments", segment(issue_id_or_key)),
            &QueryParams::new(),
            "get comments",
        )
        .await
    }

    /// 添付ファイルを送信する
    ///
    /// 返された `Attachment::id` は `AddCommentParams::attachment_ids` に渡せる。
    #[instrument(skip(self, file), fields(size = file.len()))]
    pub async fn post_attachment(&self, file: Vec<u8>, filename: &str) -> Result<Attachment> {
        let part = Part::bytes(file).file_name(filename.to_string());
        let form = Form::new()
            .part("file", part)
            .text("filename", filename.to_string());

        self.post(
            "/space/attachment",
            &QueryParams::new(),
            Payload::Multipart(form),
            StatusCode::OK,
            "post attachment",
        )
        .await
    }

    /// 共有ファイルを課題にリンクする
    #[instrument(skip(self))]
    pub async fn link_shared_files(
        &self,
        issue_id_or_key: &str,
        file_ids: &[u64],
    ) -> Result<Vec<SharedFile>> {
        require_issue(issue_id_or_key)?;
        let payload = Payload::form(file_ids.iter().map(|id| ("fileId[]", id.to_string())));
        self.post(
            &format!("/issues/{}/sharedFiles", segment(issue_id_or_key)),
            &QueryParams::new(),
            payload,
            StatusCode::OK,
            "link shared files",
        )
        .await
    }
}
