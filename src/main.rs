//! Todo backend entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_backend::api::{create_router, AppState};
use todo_backend::config::{Config, LogFormat};
use todo_backend::db;
use todo_backend::metrics;
use todo_backend::todo::{MemoryTodoRepository, PgTodoRepository, TodoRepository};
use todo_backend::utils::shutdown_signal;
use todo_backend::StartupError;

/// Todo list backend.
#[derive(Parser, Debug)]
#[command(name = "todo-backend")]
#[command(about = "JSON API for todo items stored in PostgreSQL")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Listen port, overrides PORT.
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep todos in memory instead of PostgreSQL.
        #[arg(long)]
        in_memory: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Connect to the database and create the schema.
    CheckDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration also drives log setup, so load it before logging starts
    // and report the failure once a subscriber exists.
    let config = Config::load();
    let (rust_log, log_format) = match &config {
        Ok(c) => (c.rust_log.clone(), c.log_format),
        Err(_) => ("info".to_string(), LogFormat::default()),
    };
    init_tracing(args.verbose, &rust_log, log_format);

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        StartupError::from(e)
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::CheckDb) => cmd_check_db(&config).await,
        Some(Command::Serve { port, in_memory }) => cmd_serve(config, port, in_memory).await,
        None => cmd_serve(config, None, false).await,
    }
}

/// Install the global tracing subscriber.
fn init_tracing(verbose: bool, rust_log: &str, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("todo_backend=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TODO BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.redacted_database_url());
    println!("  Listen Address: {}", config.bind_addr());
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Connect to the database, ping it, and make sure the schema exists.
async fn cmd_check_db(config: &Config) -> anyhow::Result<()> {
    validate(config)?;

    println!("Database: {}", config.redacted_database_url());

    print!("Connecting... ");
    let pool = connect(config).await?;
    println!("OK");

    print!("Pinging... ");
    db::ping(&pool).await?;
    println!("OK");

    print!("Initializing schema... ");
    db::init_schema(&pool).await.map_err(StartupError::Schema)?;
    println!("OK");

    pool.close().await;
    Ok(())
}

/// Run the HTTP server.
///
/// The schema is created before the listener binds; any failure up to that
/// point ends the process with a non-zero status.
async fn cmd_serve(mut config: Config, port: Option<u16>, in_memory: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    validate(&config)?;

    let todos: Arc<dyn TodoRepository> = if in_memory {
        warn!("Using in-memory storage, todos are lost on exit");
        Arc::new(MemoryTodoRepository::new())
    } else {
        info!("Connecting to {}", config.redacted_database_url());
        let pool = connect(&config).await?;

        db::init_schema(&pool).await.map_err(|e| {
            error!("Failed to initialize database: {}", e);
            StartupError::Schema(e)
        })?;

        Arc::new(PgTodoRepository::new(pool))
    };

    let handle = metrics::init_metrics().map_err(|e| StartupError::Metrics(e.to_string()))?;
    let app_state = AppState::new(todos).with_metrics(handle);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        StartupError::from(e)
    })?;
    info!("Backend listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn validate(config: &Config) -> Result<(), StartupError> {
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        StartupError::InvalidConfig(e)
    })
}

async fn connect(config: &Config) -> Result<sqlx::PgPool, StartupError> {
    db::create_pool(config).await.map_err(|source| {
        error!("Failed to connect to database: {}", source);
        StartupError::Connect {
            url: config.redacted_database_url(),
            source,
        }
    })
}
