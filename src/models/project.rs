use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: u64,
    #[serde(rename = "projectKey")]
    pub project_key: String,
    pub name: String,
    #[serde(rename = "chartEnabled")]
    pub chart_enabled: bool,
    #[serde(rename = "useResolvedForChart", default)]
    pub use_resolved_for_chart: bool,
    #[serde(rename = "projectLeaderCanEditProjectLeader", default)]
    pub project_leader_can_edit_project_leader: bool,
    #[serde(rename = "useWiki", default)]
    pub use_wiki: bool,
    #[serde(rename = "useFileSharing", default)]
    pub use_file_sharing: bool,
    #[serde(rename = "useWikiTreeView", default)]
    pub use_wiki_tree_view: bool,
    #[serde(rename = "useOriginalImageSizeAtWiki", default)]
    pub use_original_image_size_at_wiki: bool,
    #[serde(rename = "useSubversion", default)]
    pub use_subversion: bool,
    #[serde(rename = "useGit", default)]
    pub use_git: bool,
    #[serde(rename = "textFormattingRule")]
    pub text_formatting_rule: String,
    pub archived: bool,
    #[serde(rename = "displayOrder")]
    pub display_order: i64,
    #[serde(rename = "useDevAttributes", default)]
    pub use_dev_attributes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserialization() {
        let json_data = json!({
            "id": 1,
            "projectKey": "TEST",
            "name": "test",
            "chartEnabled": false,
            "useResolvedForChart": false,
            "subtaskingEnabled": false,
            "projectLeaderCanEditProjectLeader": false,
            "useWiki": true,
            "useFileSharing": true,
            "useWikiTreeView": true,
            "useOriginalImageSizeAtWiki": false,
            "useSubversion": false,
            "useGit": true,
            "textFormattingRule": "markdown",
            "archived": false,
            "displayOrder": 2147483646,
            "useDevAttributes": true
        });

        let project: ProjectInfo = serde_json::from_value(json_data).unwrap();

        assert_eq!(project.id, 1);
        assert_eq!(project.project_key, "TEST");
        assert!(project.use_wiki);
        assert!(project.use_git);
        assert!(!project.archived);
        assert_eq!(project.display_order, 2147483646);
    }

    #[test]
    fn test_project_missing_optional_flags_default_to_false() {
        let json_data = json!({
            "id": 2,
            "projectKey": "OLD",
            "name": "legacy",
            "chartEnabled": true,
            "textFormattingRule": "backlog",
            "archived": true,
            "displayOrder": 0
        });

        let project: ProjectInfo = serde_json::from_value(json_data).unwrap();

        assert!(project.chart_enabled);
        assert!(!project.use_dev_attributes);
        assert!(!project.use_wiki_tree_view);
    }
}
