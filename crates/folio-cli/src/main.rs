//! Folio - a command-line front end for a portfolio gallery backend.
//!
//! Each subcommand is one user action: log in or out, browse works and
//! categories, add a work or delete one.

mod format;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_core::config::TokenStoreKind;
use folio_core::models::NewWork;
use folio_core::{ApiClient, Config, Gallery, Session};

use format::{format_work_row, truncate_string, work_header};

/// Password taken from the environment instead of prompting
const PASSWORD_ENV: &str = "FOLIO_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Browse and manage a portfolio gallery")]
struct Cli {
    /// Backend base URL (overrides the config file and FOLIO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Where the session token is kept (overrides the config file)
    #[arg(long, value_enum)]
    store: Option<StoreArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreArg {
    File,
    Keyring,
}

impl From<StoreArg> for TokenStoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::File => TokenStoreKind::File,
            StoreArg::Keyring => TokenStoreKind::Keyring,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and keep the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Show whether a session token is present
    Status,
    /// List works, optionally for a single category
    Works {
        #[arg(long)]
        category: Option<i64>,
    },
    /// List categories
    Categories,
    /// Upload a new work
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        image: PathBuf,
    },
    /// Delete a work by id
    Delete { id: i64 },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(store) = cli.store {
        config.token_store = store.into();
    }
    debug!(base_url = %config.base_url, store = ?config.token_store, "Config loaded");

    let client = ApiClient::from_config(&config)?;
    let session = Session::open(&config)?;

    match cli.command {
        Command::Login { email } => login(&client, &session, email).await,
        Command::Logout => {
            session.logout()?;
            println!("Déconnecté.");
            Ok(())
        }
        Command::Status => {
            let state = if session.is_authenticated() { "connecté" } else { "non connecté" };
            println!("API : {}", client.base_url());
            println!("Session : {}", state);
            Ok(())
        }
        Command::Works { category } => list_works(&client, category).await,
        Command::Categories => list_categories(&client).await,
        Command::Add { title, category, image } => {
            add_work(&client, &session, title, category, image).await
        }
        Command::Delete { id } => delete_work(&client, &session, id).await,
    }
}

async fn login(client: &ApiClient, session: &Session, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => rpassword::prompt_password("Mot de passe : ")?,
    };

    session.login(client, &email, &password).await?;
    info!("Session token stored");
    println!("Connexion réussie.");
    Ok(())
}

fn prompt_email() -> Result<String> {
    print!("E-mail : ");
    io::stdout().flush()?;

    let mut email = String::new();
    io::stdin().read_line(&mut email)?;
    Ok(email.trim().to_string())
}

async fn list_works(client: &ApiClient, category: Option<i64>) -> Result<()> {
    let mut gallery = Gallery::default();
    gallery.refresh(client).await?;

    let works = gallery.filter_by_category(category);
    println!("{}", work_header());
    for work in &works {
        println!("{}", format_work_row(work, gallery.category_name_for(work)));
    }
    println!("\n{} projet(s)", works.len());
    Ok(())
}

async fn list_categories(client: &ApiClient) -> Result<()> {
    let categories = client.fetch_categories().await?;
    for category in &categories {
        println!("{:>4}  {}", category.id, truncate_string(&category.name, 60));
    }
    Ok(())
}

async fn add_work(
    client: &ApiClient,
    session: &Session,
    title: String,
    category: i64,
    image: PathBuf,
) -> Result<()> {
    let new_work = NewWork::from_path(title, category, &image).await?;

    // Categories are needed to validate the selection
    let mut gallery = Gallery::default();
    gallery.refresh(client).await?;

    let work = gallery.add_work(client, session, &new_work).await?;
    println!("Projet ajouté :");
    println!("{}", work_header());
    println!("{}", format_work_row(&work, gallery.category_name_for(&work)));
    Ok(())
}

async fn delete_work(client: &ApiClient, session: &Session, id: i64) -> Result<()> {
    let mut gallery = Gallery::default();
    gallery.refresh(client).await?;

    gallery.delete_work(client, session, id).await?;
    println!("Projet {} supprimé, {} projet(s) restant(s).", id, gallery.works().len());
    Ok(())
}
