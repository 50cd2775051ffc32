use dotenv::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;

use backlog_api::{BacklogClient, CredentialStore, FileCredentialStore, set_credential};

/// 認証情報をファイルストアに保存し、そこからクライアントを作成する
///
/// 初回は `BACKLOG_API_KEY` / `BACKLOG_ORG_DOMAIN` から保存する。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut store = FileCredentialStore::default_config_dir()?;
    println!("Credential file: {}", store.path().display());

    if let (Ok(api_key), Ok(org_domain)) =
        (env::var("BACKLOG_API_KEY"), env::var("BACKLOG_ORG_DOMAIN"))
    {
        set_credential(&mut store, &api_key, &org_domain).await?;
        println!("Saved credential for {}", org_domain);
    }

    println!("Stored keys: {:?}", store.keys().await?);

    let client = match BacklogClient::from_store(&store).await {
        Ok(client) => client,
        Err(e) => {
            println!("Cannot create client: {}", e);
            return Ok(());
        }
    };

    let space = client.get_space().await?;
    println!("Connected to {} ({})", space.name, client.config().base_url());

    Ok(())
}
