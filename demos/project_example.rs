use dotenv::dotenv;
use std::env;
use tracing_subscriber::EnvFilter;

use backlog_api::{BacklogClient, BacklogConfig};

/// プロジェクトのマスタ情報と課題一覧を表示する
///
/// 使い方: `cargo run --example project_example -- PROJECT_KEY`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let project_key = env::args().nth(1).unwrap_or_else(|| "TEST".to_string());

    let client = BacklogClient::new(BacklogConfig::from_env()?)?;

    let project = client.get_project(&project_key).await?;
    println!("=== {} ({}) ===", project.name, project.project_key);
    println!("archived={} wiki={} git={}", project.archived, project.use_wiki, project.use_git);

    println!("\n--- Issue types ---");
    for issue_type in client.get_project_issue_types(&project_key).await? {
        println!("{:>6} {} {}", issue_type.id, issue_type.color, issue_type.name);
    }

    println!("\n--- Statuses ---");
    for status in client.get_project_statuses(&project_key).await? {
        println!("{:>6} {}", status.id, status.name);
    }

    println!("\n--- Categories ---");
    for category in client.get_project_categories(&project_key).await? {
        println!("{:>6} {}", category.id, category.name);
    }

    println!("\n--- Issues ---");
    for issue in client.get_issues(&[project.id]).await? {
        println!("{:<12} [{}] {}", issue.issue_key, issue.status.name, issue.summary);
    }

    Ok(())
}
