use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::config::{ServerConfig, init_tracing};
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::memory_store::InMemoryTodoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let config = ServerConfig::from_env()?;

    let service = TodoServiceImpl::new(InMemoryTodoStore::new());
    let todos_router = todos::router(todos::AppState { service });
    let router = routing::app(todos_router);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
