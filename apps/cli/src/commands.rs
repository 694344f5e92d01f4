//! # Commands
//!
//! Argument definitions and their execution.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dindin categories update <id> --type receita                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CategoryStore::update ──► Database (write lock + transaction)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.error set? ── yes ──► clear_error(), CliError::Action(message)  │
//! │       │                                                                 │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  render (text table or --json)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use dindin_core::{
    CategoryColor, CategoryType, CreateCategoryInput, IconName, UpdateCategoryInput,
    UpdatePaymentMethodInput,
};
use dindin_db::{Database, DbError};
use dindin_state::{CategoryStore, PaymentMethodStore};
use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::render;

// =============================================================================
// Arguments
// =============================================================================

/// Dindin: categories and payment methods for your personal finances.
#[derive(Parser, Debug)]
#[command(name = "dindin", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config directory).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding config and DINDIN_DB_PATH.
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// List and toggle payment methods.
    PaymentMethods {
        #[command(subcommand)]
        command: PaymentMethodCommand,
    },
    /// Insert default payment methods and sample categories into empty tables.
    Seed,
    /// Show database location and row counts.
    Status,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List categories by name.
    List,
    /// Create a category.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "ShoppingCart")]
        icon: IconName,
        #[arg(long, default_value = "blue")]
        color: CategoryColor,
        /// gasto (expense) or receita (income).
        #[arg(long = "type", default_value = "gasto")]
        category_type: CategoryType,
    },
    /// Change some fields of a category.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<IconName>,
        #[arg(long)]
        color: Option<CategoryColor>,
        #[arg(long = "type")]
        category_type: Option<CategoryType>,
    },
    /// Delete a category. Unknown ids are ignored.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PaymentMethodCommand {
    /// List payment methods by name.
    List,
    /// Enable a payment method.
    Enable { id: String },
    /// Disable a payment method.
    Disable { id: String },
}

// =============================================================================
// Execution
// =============================================================================

/// What a command runs against.
pub struct Context {
    pub db: Database,
    pub categories: CategoryStore,
    pub payment_methods: PaymentMethodStore,
    pub json: bool,
}

impl Context {
    pub fn new(db: Database, json: bool) -> Self {
        Context {
            categories: CategoryStore::new(db.clone()),
            payment_methods: PaymentMethodStore::new(db.clone()),
            db,
            json,
        }
    }
}

/// Runs one command and returns what to print on stdout.
pub async fn execute(command: &Command, ctx: &Context) -> CliResult<String> {
    debug!(?command, "Executing command");
    match command {
        Command::Categories { command } => categories(command, ctx).await,
        Command::PaymentMethods { command } => payment_methods(command, ctx).await,
        Command::Seed => seed(ctx).await,
        Command::Status => status(ctx).await,
    }
}

async fn categories(command: &CategoryCommand, ctx: &Context) -> CliResult<String> {
    let store = &ctx.categories;
    match command {
        CategoryCommand::List => {
            let result = store.load().await;
            checked(store, result)?;
            let items = store.snapshot().items;
            if ctx.json {
                return to_json(&items);
            }
            Ok(render::categories_table(&items, Utc::now()))
        }
        CategoryCommand::Create {
            name,
            icon,
            color,
            category_type,
        } => {
            let input = CreateCategoryInput::new(name.as_str(), *icon, *color, *category_type);
            let result = store.create(&input).await;
            let created = checked(store, result)?;
            if ctx.json {
                return to_json(&created);
            }
            Ok(format!("Created {}\n", render::category_line(&created)))
        }
        CategoryCommand::Update {
            id,
            name,
            icon,
            color,
            category_type,
        } => {
            let input = UpdateCategoryInput {
                id: id.clone(),
                name: name.clone(),
                icon: *icon,
                color: *color,
                category_type: *category_type,
            };
            if input.is_empty() {
                return Err(CliError::InvalidArgument(
                    "Nothing to update: pass --name, --icon, --color or --type".into(),
                ));
            }
            let result = store.update(&input).await;
            let updated = checked(store, result)?;
            if ctx.json {
                return to_json(&updated);
            }
            Ok(format!("Updated {}\n", render::category_line(&updated)))
        }
        CategoryCommand::Delete { id } => {
            let result = store.delete(id).await;
            checked(store, result)?;
            if ctx.json {
                return to_json(&serde_json::json!({ "deleted": id }));
            }
            Ok(format!("Deleted {}\n", id))
        }
    }
}

async fn payment_methods(command: &PaymentMethodCommand, ctx: &Context) -> CliResult<String> {
    let store = &ctx.payment_methods;
    let (id, enabled) = match command {
        PaymentMethodCommand::List => {
            let result = store.load().await;
            checked(store, result)?;
            let items = store.snapshot().items;
            if ctx.json {
                return to_json(&items);
            }
            return Ok(render::payment_methods_table(&items));
        }
        PaymentMethodCommand::Enable { id } => (id, true),
        PaymentMethodCommand::Disable { id } => (id, false),
    };

    let result = store
        .update(&UpdatePaymentMethodInput::new(id.as_str(), enabled))
        .await;
    let method = checked(store, result)?;
    if ctx.json {
        return to_json(&method);
    }
    Ok(format!(
        "{} {}\n",
        if method.enabled { "Enabled" } else { "Disabled" },
        method.name
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedReport {
    payment_methods: usize,
    categories: usize,
}

async fn seed(ctx: &Context) -> CliResult<String> {
    let result = ctx.payment_methods.seed().await;
    let payment_methods = checked(&ctx.payment_methods, result)?;
    let result = ctx.categories.seed().await;
    let categories = checked(&ctx.categories, result)?;

    let report = SeedReport {
        payment_methods,
        categories,
    };
    if ctx.json {
        return to_json(&report);
    }
    Ok(format!(
        "Inserted {} payment methods and {} sample categories\n",
        report.payment_methods, report.categories
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    database: String,
    initialized: bool,
    healthy: bool,
    migrations_applied: usize,
    migrations_total: usize,
    categories: usize,
    payment_methods: usize,
}

/// Gateway diagnostics plus row counts read through the stores.
async fn status(ctx: &Context) -> CliResult<String> {
    let db = &ctx.db;
    let (migrations_total, migrations_applied) = db.migration_status().await?;

    let result = ctx.categories.load().await;
    checked(&ctx.categories, result)?;
    let result = ctx.payment_methods.load().await;
    checked(&ctx.payment_methods, result)?;

    let report = StatusReport {
        database: db.config().database_path.display().to_string(),
        initialized: db.is_initialized().await,
        healthy: db.health_check().await,
        migrations_applied,
        migrations_total,
        categories: ctx.categories.with_state(|s| s.items.len()),
        payment_methods: ctx.payment_methods.with_state(|s| s.items.len()),
    };
    if ctx.json {
        return to_json(&report);
    }
    Ok(format!(
        "database:        {}\ninitialized:     {}\nhealthy:         {}\nmigrations:      {}/{}\ncategories:      {}\npayment methods: {}\n",
        report.database,
        report.initialized,
        report.healthy,
        report.migrations_applied,
        report.migrations_total,
        report.categories,
        report.payment_methods,
    ))
}

// =============================================================================
// Helpers
// =============================================================================

/// Store surface the CLI needs to report a failed action exactly once.
trait ErrorSlot {
    fn error(&self) -> Option<String>;
    fn clear_error(&self);
}

impl ErrorSlot for CategoryStore {
    fn error(&self) -> Option<String> {
        self.with_state(|s| s.error.clone())
    }

    fn clear_error(&self) {
        CategoryStore::clear_error(self)
    }
}

impl ErrorSlot for PaymentMethodStore {
    fn error(&self) -> Option<String> {
        self.with_state(|s| s.error.clone())
    }

    fn clear_error(&self) {
        PaymentMethodStore::clear_error(self)
    }
}

/// Takes the store's error message, if any, and clears it.
fn checked<S: ErrorSlot, T>(store: &S, result: Result<T, DbError>) -> CliResult<T> {
    if let Some(message) = store.error() {
        store.clear_error();
        return Err(CliError::Action(message));
    }
    result.map_err(CliError::Db)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
