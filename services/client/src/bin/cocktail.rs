//! services/client/src/bin/cocktail.rs

use clap::{Args, Parser, Subcommand};
use cocktail_client_lib::{
    adapters::{HttpAccountAdapter, HttpCatalogAdapter},
    config::Config,
    error::ClientError,
};
use cocktail_core::{CocktailLogic, SessionStore};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cocktail", version, about = "Search the cocktail catalog and manage favorites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Login {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the account of the given user
    Profile {
        #[command(flatten)]
        login: Login,
    },
    /// Search drinks by name and show their full details
    SearchName { query: String },
    /// List drinks in a category
    SearchCategory { query: String },
    /// List drinks served in a glass
    SearchGlass { query: String },
    /// Show one drink
    Detail { id: String },
    /// Show the user's favorite drinks
    Favorites {
        #[command(flatten)]
        login: Login,
    },
    /// Add a drink to the favorites, or remove it if already there
    ToggleFavorite {
        #[command(flatten)]
        login: Login,
        id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(std::io::stdout().lock(), "{}", rendered)?;
    Ok(())
}

async fn run(logic: &CocktailLogic, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            logic.register_user(&name, &email, &password).await?;
            info!("Account created for {}", email);
        }
        Command::Profile { login } => {
            logic.login_user(&login.email, &login.password).await?;
            print_json(&logic.retrieve_user().await?)?;
        }
        Command::SearchName { query } => print_json(&logic.search_by_name(&query).await?)?,
        Command::SearchCategory { query } => print_json(&logic.search_by_category(&query).await?)?,
        Command::SearchGlass { query } => print_json(&logic.search_by_glass(&query).await?)?,
        Command::Detail { id } => print_json(&logic.cocktail_detail(&id).await?)?,
        Command::Favorites { login } => {
            logic.login_user(&login.email, &login.password).await?;
            print_json(&logic.retrieve_favorites().await?)?;
        }
        Command::ToggleFavorite { login, id } => {
            logic.login_user(&login.email, &login.password).await?;
            logic.toggle_favorite_cocktail(&id).await?;
            info!("Toggled favorite {}", id);
        }
    }

    logic.logout_user();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded.");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;
    let accounts = Arc::new(HttpAccountAdapter::new(
        http.clone(),
        config.account_api_url.clone(),
    ));
    let catalog = Arc::new(HttpCatalogAdapter::new(
        http,
        config.catalog_api_url.clone(),
    ));

    // --- 3. Build the Logic Layer and Run the Command ---
    let logic = CocktailLogic::new(
        accounts,
        catalog,
        SessionStore::new(),
        config.logic_options(),
    );

    run(&logic, cli.command).await
}
