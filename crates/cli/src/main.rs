//! ElectroHome CLI - browse the catalog, fill the cart, edit products.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! electrohome list --category electro --query pava
//!
//! # Shop
//! electrohome cart add k3j9x0qa
//! electrohome cart checkout
//!
//! # Edit the catalog
//! electrohome admin login 2468
//! electrohome product create --name "Licuadora" --category electro --price 29999
//! electrohome catalog export --output catalogo.json
//! ```
//!
//! # Commands
//!
//! - `list` - Browse products by category and search text
//! - `cart` - Show, add, change, remove, checkout
//! - `admin` - Enter or leave admin mode
//! - `product` - Create, edit, delete products (admin mode)
//! - `catalog` - Import/export the catalog as JSON (admin mode)
//!
//! State is kept under `ELECTROHOME_DATA_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use electrohome_core::{CategoryFilter, ProductId};
use electrohome_storefront::storage::FileStorage;
use electrohome_storefront::{Storefront, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;
use commands::product::ProductFields;

#[derive(Parser)]
#[command(name = "electrohome")]
#[command(author, version, about = "ElectroHome storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    List {
        /// Category (bazar, electro, perfume) or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Search text matched against name, description and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only featured products
        #[arg(long)]
        featured: bool,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Enter or leave admin mode
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Create, edit and delete products (admin mode)
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Import or export the whole catalog (admin mode)
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Increase a line's quantity
    Inc {
        id: ProductId,
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Decrease a line's quantity (never below 1)
    Dec {
        id: ProductId,
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Remove a line
    Remove { id: ProductId },
    /// Print the order message and the link to send it
    Checkout,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Enable admin mode
    Login { pin: String },
    /// Disable admin mode
    Logout,
    /// Show whether admin mode is on
    Status,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit a product; omitted fields are kept
    Edit {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Replace the catalog with a JSON array of products
    Import { file: PathBuf },
    /// Write the catalog as JSON
    Export {
        #[arg(short, long, default_value = commands::catalog::DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "electrohome=info,electrohome_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
    let mut storefront = Storefront::open(&config, storage);

    if let Err(e) = run(cli.command, &mut storefront).await {
        if e.is_internal() {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Command failed");
        } else {
            tracing::error!(error = %e, "Command failed");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(command: Commands, storefront: &mut Storefront) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();

    match command {
        Commands::List {
            category,
            query,
            featured,
        } => commands::catalog::list(storefront, &category, &query, featured, &mut out)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront, &mut out)?,
            CartAction::Add { id } => commands::cart::add(storefront, &id, &mut out)?,
            CartAction::Inc { id, by } => {
                commands::cart::change(storefront, &id, i64::from(by), &mut out)?;
            }
            CartAction::Dec { id, by } => {
                commands::cart::change(storefront, &id, -i64::from(by), &mut out)?;
            }
            CartAction::Remove { id } => commands::cart::remove(storefront, &id, &mut out)?,
            CartAction::Checkout => commands::cart::checkout(storefront, &mut out)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { pin } => commands::admin::login(storefront, &pin, &mut out)?,
            AdminAction::Logout => commands::admin::logout(storefront, &mut out)?,
            AdminAction::Status => commands::admin::status(storefront, &mut out)?,
        },
        Commands::Product { action } => match action {
            ProductAction::Create { fields } => {
                commands::product::create(storefront, fields, &mut out).await?;
            }
            ProductAction::Edit { id, fields } => {
                commands::product::edit(storefront, &id, fields, &mut out).await?;
            }
            ProductAction::Delete { id } => commands::product::delete(storefront, &id, &mut out)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Import { file } => {
                commands::catalog::import(storefront, &file, &mut out).await?;
            }
            CatalogAction::Export { output } => {
                commands::catalog::export(storefront, &output, &mut out).await?;
            }
        },
    }
    Ok(())
}
