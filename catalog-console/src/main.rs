//! # Catalog Console
//!
//! Terminal dashboard for the catalog service.
//!
//! ## Usage
//!
//! ```bash
//! catalog-console login <token>   # remember a bearer token
//! catalog-console show            # fetch and print the dashboard
//! catalog-console logout          # forget the token
//! ```

use catalog_console::{
    client::HttpProductApi,
    config::ConsoleConfig,
    console::{Console, Route},
    storage::{FileTokenStore, TokenStore},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog-console")]
#[command(about = "Catalog console - view your products")]
#[command(version)]
struct Cli {
    /// Product service base URL
    #[arg(long, global = true, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch products and print the dashboard")]
    Show,

    #[command(about = "Store a bearer token for later requests")]
    Login { token: String },

    #[command(about = "Forget the stored token")]
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ConsoleConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let tokens = FileTokenStore::new(&config.token_file);
    tracing::debug!(api_url = %config.api_url, token_file = %tokens.path().display(), "Console configured");

    match cli.command {
        Commands::Login { token } => {
            tokens.set(&token)?;
            println!("Token stored in {}", tokens.path().display());
        }
        Commands::Logout => {
            let mut console = Console::new(tokens, HttpProductApi::new(&config.api_url));
            console.logout()?;
            println!("Logged out");
        }
        Commands::Show => {
            let mut console = Console::new(tokens, HttpProductApi::new(&config.api_url));
            console.mount().await;

            match console.route() {
                Route::Dashboard => {
                    let today = chrono::Local::now().date_naive();
                    print!("{}", console.view(today).render_text());
                }
                Route::Login => {
                    if let Some(error) = console.error() {
                        eprintln!("{}", error);
                    }
                    eprintln!("Run `catalog-console login <token>` to sign in.");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
