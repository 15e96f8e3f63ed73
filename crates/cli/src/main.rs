//! `yurucamp` -- browse community lists and run event gacha from a terminal.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                     | Description                  |
//! |------------------------|----------|-----------------------------|------------------------------|
//! | `API_BASE_URL`         | no       | `http://localhost:8080/api` | Backend REST API root        |
//! | `API_TOKEN`            | no       | --                          | Bearer token for the session |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                        | HTTP request timeout         |

use std::io::Write as _;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yurucamp_cli::cli::{Cli, Command};
use yurucamp_cli::commands;
use yurucamp_cli::config::CliConfig;
use yurucamp_client::{DataProvider, HttpDataProvider, StaticSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yurucamp_cli=info,yurucamp_picker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;

    let session = match config.api_token.clone() {
        Some(token) => StaticSession::new(token),
        None => StaticSession::anonymous(),
    };
    let provider: Arc<dyn DataProvider> = Arc::new(HttpDataProvider::new(
        config.api_base_url.clone(),
        Arc::new(session),
        config.request_timeout,
    )?);
    tracing::debug!(api = %config.api_base_url, "Using backend");

    match cli.command {
        Command::List(args) => {
            let text = commands::list(provider, &args).await?;
            print!("{text}");
        }
        Command::Regions => {
            for region in provider.list_regions().await? {
                println!("{:<12} {}", region.id, region.name);
            }
        }
        Command::Categories => {
            for category in provider.list_categories().await? {
                println!("{:<12} {}", category.id, category.name);
            }
        }
        Command::Gacha { event_id } => {
            let winner = commands::gacha(provider.as_ref(), &event_id, |candidate| {
                eprint!("\r  {:<32}", candidate.display_name);
                let _ = std::io::stderr().flush();
            })
            .await?;
            eprintln!();

            match winner {
                Some(winner) => println!("Winner: {}", winner.display_name),
                None => println!("No winner (event has no participants or roll interrupted)"),
            }
        }
    }

    Ok(())
}
