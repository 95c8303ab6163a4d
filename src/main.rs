use anyhow::Context;
use dotenv::dotenv;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use todo_rest::config::AppConfig;
use todo_rest::persistence::memory_todo_driven_ports::InMemoryTodoStore;
use todo_rest::{SharedData, build_app, db, logging};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if dotenv().is_err() {
        println!("Running without a .env file.");
    }
    let config = AppConfig::from_env()?;

    let otel_exporters = config
        .otel
        .as_ref()
        .map(logging::init_exporters)
        .transpose()?;
    logging::setup_logging_and_tracing(logging::init_env_filter(), otel_exporters.as_ref());

    let shared_data = match config.database_url {
        Some(ref db_url) => {
            let pool = db::connect_sqlx(db_url)
                .await
                .context("connecting to the database")?;
            db::run_migrations(&pool).await?;
            SharedData::with_database(pool)
        }
        None => {
            warn!("{} is not set, todos will only be kept in memory", todo_rest::app_env::DB_URL);
            SharedData::in_memory(InMemoryTodoStore::new())
        }
    };
    info!(
        backend = shared_data.todo_store.backend_name(),
        "Persistence backend selected"
    );

    let app = build_app(Arc::new(shared_data));
    let listen_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;

    info!("Starting server on {listen_addr}.");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP requests")?;

    info!("Server stopped.");
    if let Some(exporters) = otel_exporters {
        exporters.shutdown();
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for the shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
