//! BioBaum CLI - drive the sponsorship cart from the command line.
//!
//! Every invocation restores the cart from file storage, applies one command
//! and persists the result, so consecutive runs behave like page loads of the
//! site sharing one local storage.
//!
//! # Usage
//!
//! ```bash
//! # Add two apple trees at 25.00 each
//! bb-cli cart add --id tree-1 --price 25.00 --quantity 2 --name "Apple tree"
//!
//! # Add trees straight from a catalog API response
//! bb-cli cart add-tree --file trees.json
//!
//! # Edit and inspect
//! bb-cli cart set --id tree-1 --quantity 1
//! bb-cli cart show
//!
//! # Checkout
//! bb-cli checkout summary
//! bb-cli checkout confirm --order-id ord_123
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, edit, list and clear cart entries
//! - `checkout` - Sponsorship summary and order completion

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use biobaum_cart::{CartConfig, CartContext};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bb-cli")]
#[command(author, version, about = "BioBaum cart tools")]
struct Cli {
    /// Storage file (overrides `CART_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cart entries
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review and complete an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add units of an item at a snapshot price
    Add {
        /// Item id
        #[arg(short, long)]
        id: String,

        /// Unit price, e.g. 25.00
        #[arg(short, long)]
        price: Decimal,

        /// Units to add (default: 1)
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<i64>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,
    },
    /// Add trees from a catalog API JSON document (one tree or a list)
    AddTree {
        /// JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Units of each tree to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set an item's quantity (0 or less removes it)
    Set {
        #[arg(short, long)]
        id: String,

        #[arg(short, long, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove an item
    Remove {
        #[arg(short, long)]
        id: String,
    },
    /// List entries and totals
    Show,
    /// Remove every entry
    Clear,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show the sponsorship summary
    Summary,
    /// Record a confirmed order and clear the cart
    Confirm {
        /// Order id returned by the order API
        #[arg(short, long)]
        order_id: String,
    },
    /// Record a failed order (the cart is kept)
    Fail {
        #[arg(short, long)]
        reason: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
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

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "biobaum_cart=info,bb_cli=info".into());

    // JSON lines for log collectors, text otherwise. Logs go to stderr;
    // stdout carries command output.
    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = CartConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = config
        .map_err(Into::into)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // Flush Sentry before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }
    let ctx = CartContext::from_config(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                price,
                quantity,
                name,
                image,
            } => commands::cart::add(&ctx, &id, price, quantity, name, image)?,
            CartAction::AddTree { file, quantity } => {
                commands::cart::add_trees(&ctx, &file, quantity)?;
            }
            CartAction::Set { id, quantity } => commands::cart::set(&ctx, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&ctx, &id),
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary => commands::checkout::summary(&ctx),
            CheckoutAction::Confirm { order_id } => commands::checkout::confirm(&ctx, &order_id)?,
            CheckoutAction::Fail { reason } => commands::checkout::fail(&ctx, reason)?,
        },
    }
    Ok(())
}
