use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use harsia_client::auth::verifier::hash_password;
use harsia_client::auth::{AllowListVerifier, SimulatedCodeSender};
use harsia_db::models::admin_user::CreateAdminUser;
use harsia_db::store::{MemoryRecordStore, PgRecordStore, RecordStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harsia_api::auth::AuthService;
use harsia_api::config::ServerConfig;
use harsia_api::router::build_app_router;
use harsia_api::state::AppState;

#[derive(Parser)]
#[command(name = "harsia-api")]
#[command(about = "HARSIA investigation reports and safety recommendations service")]
#[command(version)]
struct Cli {
    /// Defaults to serving HTTP.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Print an Argon2 hash for an ADMIN_ALLOW_LIST entry
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::HashPassword { password } => print_password_hash(password),
    }
}

async fn serve() {
    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "harsia_api=debug,harsia_client=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let verifier = AllowListVerifier::parse(&config.admin_allow_list)
        .expect("ADMIN_ALLOW_LIST is malformed");
    tracing::info!(entries = verifier.len(), "Admin allow-list loaded");

    // --- Record store ---
    let (store, pool) = match &config.database_url {
        Some(url) => {
            let pool = harsia_db::create_pool(url)
                .await
                .expect("Failed to connect to database");
            harsia_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            harsia_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("PostgreSQL record store ready");
            let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(pool.clone()));
            (store, Some(pool))
        }
        None => {
            let store = MemoryRecordStore::new();
            for email in verifier.emails() {
                let name = email.split('@').next().unwrap_or(email).to_string();
                store
                    .seed_admin_user(CreateAdminUser {
                        email: email.to_string(),
                        name,
                        role: None,
                    })
                    .await
                    .expect("Failed to seed admin user");
            }
            tracing::warn!("DATABASE_URL not set; using the in-memory record store");
            let store: Arc<dyn RecordStore> = Arc::new(store);
            (store, None)
        }
    };

    // --- Sign-in ---
    let sender = SimulatedCodeSender::new(Duration::from_millis(config.otp_send_delay_ms));
    let auth = AuthService::new(
        store.clone(),
        Arc::new(verifier),
        Arc::new(sender),
        config.jwt.clone(),
    );

    // --- App state ---
    let state = AppState::new(store, auth, config.clone(), pool);
    state.load_caches().await;

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Hash a password for `ADMIN_ALLOW_LIST`, reading it from stdin when not
/// given as an argument.
fn print_password_hash(password: Option<String>) {
    let password = password.unwrap_or_else(|| {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .expect("Failed to read password from stdin");
        line.trim_end_matches(['\r', '\n']).to_string()
    });
    let hash = hash_password(&password).expect("Failed to hash password");
    println!("{hash}");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles SIGINT (Ctrl-C) and, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
