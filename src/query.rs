//! リクエストURLの組み立て
//!
//! Backlog API v2 はクエリ文字列の `apiKey` で認証する。`apiKey` は常に先頭に置き、
//! それ以外のパラメータは追加順に並べる。配列値は `projectId[]=1&projectId[]=2` の
//! ようにキーを繰り返して展開する。

use urlencoding::encode;

/// クエリパラメータの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<&[u64]> for QueryValue {
    fn from(values: &[u64]) -> Self {
        QueryValue::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<Vec<u64>> for QueryValue {
    fn from(values: Vec<u64>) -> Self {
        QueryValue::from(values.as_slice())
    }
}

/// 順序付きのクエリパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// パラメータを追加する（ビルダー形式）
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// パラメータを追加する
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// 値が存在する場合のみ追加する
    pub fn push_opt<V: Into<QueryValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `key=value` 形式にエンコードしたペアを返す
    pub fn encoded_pairs(&self) -> Vec<String> {
        let mut encoded = Vec::new();
        for (key, value) in &self.pairs {
            match value {
                QueryValue::Single(v) => encoded.push(format!("{}={}", encode(key), encode(v))),
                QueryValue::List(values) => {
                    for v in values {
                        encoded.push(format!("{}={}", encode(key), encode(v)));
                    }
                }
            }
        }
        encoded
    }
}

/// 認証済みリクエストURLを組み立てる
///
/// `{base_url}{path}?apiKey={api_key}&...` の形式になる。
pub fn build_request_url(
    base_url: &str,
    api_key: &str,
    path: &str,
    params: &QueryParams,
) -> String {
    let mut query = vec![format!("{}={}", encode("apiKey"), encode(api_key))];
    query.extend(params.encoded_pairs());
    format!("{}{}?{}", base_url, path, query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.backlog.com/api/v2";

    #[test]
    fn test_build_request_url_without_params() {
        // Given: パラメータなし
        let params = QueryParams::new();

        // When: URLを組み立てる
        let url = build_request_url(BASE, "abc123", "/space", &params);

        // Then: apiKeyのみが付与される
        assert_eq!(url, "https://example.backlog.com/api/v2/space?apiKey=abc123");
    }

    #[test]
    fn test_build_request_url_expands_arrays() {
        // Given: 配列値を持つパラメータ
        let params = QueryParams::new().with("projectId[]", vec![1u64, 2, 3]);

        // When: URLを組み立てる
        let url = build_request_url(BASE, "abc123", "/issues", &params);

        // Then: キーが要素ごとに繰り返される
        assert_eq!(
            url,
            "https://example.backlog.com/api/v2/issues?apiKey=abc123\
             &projectId%5B%5D=1&projectId%5B%5D=2&projectId%5B%5D=3"
        );
    }

    #[test]
    fn test_build_request_url_empty_array_emits_nothing() {
        let params = QueryParams::new().with("projectId[]", Vec::<u64>::new());

        let url = build_request_url(BASE, "abc123", "/issues", &params);

        assert_eq!(url, "https://example.backlog.com/api/v2/issues?apiKey=abc123");
    }

    #[test]
    fn test_build_request_url_encodes_keys_and_values() {
        // Given: 予約文字を含むキーと値
        let params = QueryParams::new()
            .with("description", "a&b=c d")
            .with("summary", "日本語");

        // When: URLを組み立てる
        let url = build_request_url(BASE, "key/with+chars", "/issues", &params);

        // Then: すべてパーセントエンコードされ、追加順が保たれる
        assert_eq!(
            url,
            "https://example.backlog.com/api/v2/issues?apiKey=key%2Fwith%2Bchars\
             &description=a%26b%3Dc%20d&summary=%E6%97%A5%E6%9C%AC%E8%AA%9E"
        );
    }

    #[test]
    fn test_push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("parentIssueId", None::<u64>);
        params.push_opt("dueDate", Some("2024-03-31"));

        assert_eq!(params.encoded_pairs(), vec!["dueDate=2024-03-31".to_string()]);
    }
}
