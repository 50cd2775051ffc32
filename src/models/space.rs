use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    #[serde(rename = "spaceKey")]
    pub space_key: String,
    pub name: String,
    #[serde(rename = "ownerId")]
    pub owner_id: u64,
    pub lang: String,
    pub timezone: String,
    /// 日次レポートの送信時刻（`HH:MM:SS`）
    #[serde(rename = "reportSendTime")]
    pub report_send_time: String,
    /// `backlog` または `markdown`
    #[serde(rename = "textFormattingRule")]
    pub text_formatting_rule: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_space_deserialization() {
        let json_data = json!({
            "spaceKey": "nulab",
            "name": "Nulab Inc.",
            "ownerId": 1,
            "lang": "ja",
            "timezone": "Asia/Tokyo",
            "reportSendTime": "08:00:00",
            "textFormattingRule": "markdown",
            "created": "2008-07-06T15:00:00Z",
            "updated": "2013-06-18T07:55:37Z"
        });

        let space: SpaceInfo = serde_json::from_value(json_data).unwrap();

        assert_eq!(space.space_key, "nulab");
        assert_eq!(space.owner_id, 1);
        assert_eq!(space.report_send_time, "08:00:00");
        assert_eq!(space.text_formatting_rule, "markdown");
        assert_eq!(space.created, Utc.with_ymd_and_hms(2008, 7, 6, 15, 0, 0).unwrap());
    }
}
