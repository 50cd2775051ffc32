use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::{BacklogConfig, Error};

/// APIキーを保存するプロパティ名
pub const PROPERTY_KEY_API_KEY: &str = "BACKLOG_API_KEY";
/// 組織のドメインを保存するプロパティ名
pub const PROPERTY_KEY_ORG_DOMAIN: &str = "BACKLOG_ORG_DOMAIN";

/// 認証情報を保持するキー・バリューストアの抽象化トレイト
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// プロパティを取得
    async fn get_property(&self, key: &str) -> Result<Option<String>, Error>;

    /// プロパティを保存
    async fn set_property(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// プロパティを削除
    async fn delete_property(&mut self, key: &str) -> Result<bool, Error>;

    /// 保存済みのキー一覧を取得
    async fn keys(&self) -> Result<Vec<String>, Error>;

    /// 全プロパティを削除
    async fn clear(&mut self) -> Result<(), Error>;
}

/// APIキーと組織のドメインを保存する
///
/// `org_domain` は `xx.backlog.com` / `xx.backlog.jp` 形式。
pub async fn set_credential(
    store: &mut dyn CredentialStore,
    api_key: &str,
    org_domain: &str,
) -> Result<(), Error> {
    store.set_property(PROPERTY_KEY_API_KEY, api_key).await?;
    store.set_property(PROPERTY_KEY_ORG_DOMAIN, org_domain).await?;
    debug!(org_domain, "Stored Backlog credential");
    Ok(())
}

/// APIキーと組織のドメインが両方とも保存されているか検査する
pub async fn check_credential(store: &dyn CredentialStore) -> Result<(), Error> {
    let keys = store.keys().await?;
    let has = |name: &str| keys.iter().any(|k| k == name);

    if !has(PROPERTY_KEY_API_KEY) || !has(PROPERTY_KEY_ORG_DOMAIN) {
        return Err(Error::ConfigurationMissing(
            "APIトークンまたは組織のドメインが設定されていません".to_string(),
        ));
    }

    Ok(())
}

/// 保存済みの認証情報から接続設定を作成
pub async fn load_config(store: &dyn CredentialStore) -> Result<BacklogConfig, Error> {
    check_credential(store).await?;

    let api_key = store.get_property(PROPERTY_KEY_API_KEY).await?.unwrap_or_default();
    let org_domain = store.get_property(PROPERTY_KEY_ORG_DOMAIN).await?.unwrap_or_default();

    BacklogConfig::new(api_key, org_domain)
}

/// プロセス内メモリの認証情報ストア
#[derive(Debug, Default, Clone)]
pub struct MemoryCredentialStore {
    properties: HashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.properties.get(key).cloned())
    }

    async fn set_property(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.properties.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_property(&mut self, key: &str) -> Result<bool, Error> {
        Ok(self.properties.remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let mut keys: Vec<String> = self.properties.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn clear(&mut self) -> Result<(), Error> {
        self.properties.clear();
        Ok(())
    }
}

/// JSONファイルベースの認証情報ストア
pub struct FileCredentialStore {
    /// 認証情報ファイルのパス
    path: PathBuf,
}

impl FileCredentialStore {
    /// 指定ディレクトリに `credentials.json` を置くストアを作成
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            path: config_dir.as_ref().join("credentials.json"),
        }
    }

    /// デフォルトの設定ディレクトリでストアを作成
    pub fn default_config_dir() -> Result<Self, Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                Error::ConfigurationMissing("設定ディレクトリが見つかりません".to_string())
            })?
            .join("backlog-api");

        Ok(Self::new(config_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_properties(&self) -> Result<BTreeMap<String, String>, Error> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let mut file = fs::File::open(&self.path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| Error::SerializationError(format!("JSON deserialization failed: {}", e)))
    }

    async fn write_properties(&self, properties: &BTreeMap<String, String>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json_data = serde_json::to_string_pretty(properties)
            .map_err(|e| Error::SerializationError(format!("JSON serialization failed: {}", e)))?;

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(json_data.as_bytes()).await?;
        file.sync_all().await?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get_property(&self, key: &str) -> Result<Option<String>, Error> {
        let properties = self.read_properties().await?;
        Ok(properties.get(key).cloned())
    }

    async fn set_property(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let mut properties = self.read_properties().await?;
        properties.insert(key.to_string(), value.to_string());
        self.write_properties(&properties).await
    }

    async fn delete_property(&mut self, key: &str) -> Result<bool, Error> {
        let mut properties = self.read_properties().await?;
        if properties.remove(key).is_none() {
            return Ok(false);
        }
        self.write_properties(&properties).await?;
        Ok(true)
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let properties = self.read_properties().await?;
        Ok(properties.into_keys().collect())
    }

    async fn clear(&mut self) -> Result<(), Error> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileCredentialStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_set_credential_and_load_config() {
        // Given: 空のメモリストア
        let mut store = MemoryCredentialStore::new();

        // When: 認証情報を保存して設定を読み込む
        set_credential(&mut store, "api-key", "example.backlog.jp").await.unwrap();
        let config = load_config(&store).await.unwrap();

        // Then: 保存した値で設定が作られる
        assert_eq!(config.api_key, "api-key");
        assert_eq!(config.org_domain, "example.backlog.jp");
        assert_eq!(config.base_url(), "https://example.backlog.jp/api/v2");
    }

    #[tokio::test]
    async fn test_check_credential_requires_both_keys() {
        // Given: APIキーのみ保存されたストア
        let mut store = MemoryCredentialStore::new();
        store.set_property(PROPERTY_KEY_API_KEY, "api-key").await.unwrap();

        // When: 認証情報を検査
        let result = check_credential(&store).await;

        // Then: ConfigurationMissingが返される
        match result.unwrap_err() {
            Error::ConfigurationMissing(msg) => {
                assert_eq!(msg, "APIトークンまたは組織のドメインが設定されていません")
            }
            _ => panic!("Expected ConfigurationMissing error"),
        }

        // 組織のドメインを追加すると成功する
        store.set_property(PROPERTY_KEY_ORG_DOMAIN, "example.backlog.com").await.unwrap();
        assert!(check_credential(&store).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_config_from_empty_store() {
        let store = MemoryCredentialStore::new();

        let result = load_config(&store).await;

        assert!(matches!(result, Err(Error::ConfigurationMissing(_))));
    }

    #[tokio::test]
    async fn test_memory_store_delete_and_clear() {
        let mut store = MemoryCredentialStore::new();
        set_credential(&mut store, "k", "example.backlog.com").await.unwrap();

        assert!(store.delete_property(PROPERTY_KEY_API_KEY).await.unwrap());
        assert!(!store.delete_property(PROPERTY_KEY_API_KEY).await.unwrap());
        assert_eq!(store.keys().await.unwrap(), vec![PROPERTY_KEY_ORG_DOMAIN.to_string()]);

        store.clear().await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        // Given: ファイルストアに認証情報を保存
        let (mut store, temp_dir) = create_test_store();
        set_credential(&mut store, "file-key", "file.backlog.com").await.unwrap();
        assert!(temp_dir.path().join("credentials.json").exists());

        // When: 別インスタンスで読み込む
        let reopened = FileCredentialStore::new(temp_dir.path());
        let config = load_config(&reopened).await.unwrap();

        // Then: 同じ値が読み込まれる
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.org_domain, "file.backlog.com");
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let (store, _temp_dir) = create_test_store();

        assert!(store.keys().await.unwrap().is_empty());
        assert_eq!(store.get_property(PROPERTY_KEY_API_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_corrupted_file() {
        // Given: 壊れたJSONファイル
        let (store, _temp_dir) = create_test_store();
        std::fs::write(store.path(), "{ not json").unwrap();

        // When: 読み込む
        let result = store.keys().await;

        // Then: SerializationErrorが返される
        assert!(matches!(result, Err(Error::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_file_store_delete_and_clear() {
        let (mut store, _temp_dir) = create_test_store();
        set_credential(&mut store, "k", "example.backlog.com").await.unwrap();

        assert!(store.delete_property(PROPERTY_KEY_ORG_DOMAIN).await.unwrap());
        assert!(check_credential(&store).await.is_err());

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        // 二度目のクリアも成功する
        store.clear().await.unwrap();
    }
}
