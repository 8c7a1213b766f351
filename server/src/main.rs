use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use todo_server::{logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init_logging(&config.log_level)?;

    let store = config.open_store()?;
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, database = %config.database, "listening");

    todo_server::run_until(listener, store, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
