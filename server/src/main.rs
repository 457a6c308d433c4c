use anyhow::Context;
use tokio::net::TcpListener;
use todo_core::TodoService;
use todo_server::{config::ServerConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = ServerConfig::from_env()?;
    let store = config.open_store()?;
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, storage = ?config.storage, "listening");

    todo_server::run(listener, TodoService::new(store)).await?;
    Ok(())
}
