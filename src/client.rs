use crate::error::{Error, Result};
use crate::query::{QueryParams, build_request_url};
use reqwest::{Client, Method, StatusCode, header, multipart};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub const ENV_API_KEY: &str = "BACKLOG_API_KEY";
pub const ENV_ORG_DOMAIN: &str = "BACKLOG_ORG_DOMAIN";

#[derive(Clone)]
pub struct BacklogConfig {
    pub api_key: String,
    pub org_domain: String,
    base_url: String,
}

impl std::fmt::Debug for BacklogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacklogConfig")
            .field("api_key", &"<redacted>")
            .field("org_domain", &self.org_domain)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BacklogConfig {
    /// APIキーと組織のドメイン（xx.backlog.com / xx.backlog.jp）から設定を作成
    pub fn new(api_key: impl Into<String>, org_domain: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let org_domain = org_domain.into();

        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfiguration("APIキーが空です".to_string()));
        }
        if org_domain.trim().is_empty() {
            return Err(Error::InvalidConfiguration("組織のドメインが空です".to_string()));
        }

        let base_url = format!("https://{}/api/v2", org_domain);
        Self::validate_base_url(&base_url)?;

        Ok(Self {
            api_key,
            org_domain,
            base_url,
        })
    }

    /// スペース名から設定を作成（`{space_name}.backlog.com`）
    pub fn for_space(api_key: impl Into<String>, space_name: &str) -> Result<Self> {
        if space_name.trim().is_empty() {
            return Err(Error::InvalidConfiguration("スペース名が空です".to_string()));
        }
        Self::new(api_key, format!("{}.backlog.com", space_name))
    }

    pub fn from_env() -> Result<Self> {
        use std::env;

        let api_key = env::var(ENV_API_KEY).map_err(|_| {
            Error::ConfigurationMissing(format!("{} not found in environment", ENV_API_KEY))
        })?;

        let org_domain = env::var(ENV_ORG_DOMAIN).map_err(|_| {
            Error::ConfigurationMissing(format!("{} not found in environment", ENV_ORG_DOMAIN))
        })?;

        Self::new(api_key, org_domain)
    }

    /// ベースURLを上書きする（モックサーバーやオンプレミス環境向け）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self::validate_base_url(&base_url)?;
        self.base_url = base_url;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn validate_base_url(base_url: &str) -> Result<()> {
        Url::parse(base_url)
            .map(|_| ())
            .map_err(|_| Error::InvalidConfiguration("Invalid base URL".to_string()))
    }
}

/// POSTリクエストのボディ
#[derive(Debug, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart(multipart::Form),
}

impl Payload {
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Payload::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone)]
pub struct BacklogClient {
    pub(crate) client: Client,
    pub(crate) config: Arc<BacklogConfig>,
}

impl BacklogClient {
    pub fn new(config: BacklogConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                Error::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// 認証情報ストアから設定を読み込んでクライアントを作成
    ///
    /// APIキーと組織のドメインの両方が保存されていなければエラーになる。
    pub async fn from_store(store: &dyn crate::credential_store::CredentialStore) -> Result<Self> {
        let config = crate::credential_store::load_config(store).await?;
        Self::new(config)
    }

    pub fn config(&self) -> &BacklogConfig {
        &self.config
    }

    pub fn build_request_url(&self, path: &str, params: &QueryParams) -> String {
        build_request_url(&self.config.base_url, &self.config.api_key, path, params)
    }

    /// GET/POSTリクエストを送信する
    ///
    /// ステータスコードは検査しない。ペイロードはPOSTの場合のみ送信される。
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        payload: Payload,
    ) -> Result<reqwest::Response> {
        if method != Method::GET && method != Method::POST {
            return Err(Error::MethodNotAllowed(method.to_string()));
        }

        let url = self.build_request_url(path, params);
        debug!(%method, path, "Sending Backlog API request");

        let mut builder = self.client.request(method.clone(), &url);
        if method == Method::POST {
            builder = match payload {
                Payload::Empty => builder,
                Payload::Form(pairs) => builder.form(&pairs),
                Payload::Multipart(form) => builder.multipart(form),
            };
        }

        let response = builder.send().await?;
        debug!(%method, path, status = response.status().as_u16(), "Received Backlog API response");
        Ok(response)
    }

    /// 期待したステータスコードであればボディのテキストを返す
    pub(crate) async fn expect_status(
        response: reqwest::Response,
        expected: StatusCode,
        action: &'static str,
    ) -> Result<String> {
        let status = response.status();
        let message = response.text().await?;

        if status != expected {
            warn!(action, status = status.as_u16(), "Unexpected Backlog API status");
            return Err(Error::ApiError {
                action,
                status: status.as_u16(),
                message,
            });
        }

        Ok(message)
    }

    pub(crate) async fn get<T>(
        &self,
        path: &str,
        params: &QueryParams,
        action: &'static str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, path, params, Payload::Empty).await?;
        let body = Self::expect_status(response, StatusCode::OK, action).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post<T>(
        &self,
        path: &str,
        params: &QueryParams,
        payload: Payload,
        expected: StatusCode,
        action: &'static str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.post_raw(path, params, payload, expected, action).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post_raw(
        &self,
        path: &str,
        params: &QueryParams,
        payload: Payload,
        expected: StatusCode,
        action: &'static str,
    ) -> Result<String> {
        let response = self.request(Method::POST, path, params, payload).await?;
        Self::expect_status(response, expected, action).await
    }
}
