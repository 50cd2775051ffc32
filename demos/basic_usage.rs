use dotenv::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;

use backlog_api::{BacklogClient, BacklogConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("backlog_api=debug,warn")),
        )
        .init();

    // Get configuration from environment variables
    let api_key = env::var("BACKLOG_API_KEY").unwrap_or_else(|_| "your-api-key".to_string());
    let org_domain =
        env::var("BACKLOG_ORG_DOMAIN").unwrap_or_else(|_| "your-space.backlog.com".to_string());
    println!("Organization domain: {}", org_domain);

    let config = BacklogConfig::new(api_key, org_domain)?;
    let client = BacklogClient::new(config)?;

    let space = client.get_space().await?;
    println!("Space: {} ({})", space.name, space.space_key);
    println!("  lang={} timezone={}", space.lang, space.timezone);

    let priorities = client.get_priorities().await?;
    for priority in priorities {
        println!("  priority {}: {}", priority.id, priority.name);
    }

    Ok(())
}
