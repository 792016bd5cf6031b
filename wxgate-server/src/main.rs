use wxgate_server::config::Config;
use wxgate_server::state::AppState;
use wxgate_server::{logging, routes};

use anyhow::Result;
use std::net::SocketAddr;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load(CONFIG_PATH)?;
    let _logging_guard = logging::init_logging("logs", &config.log_level);

    tracing::info!("wxgate server starting...");

    let state = AppState::initialize(config)?;
    tracing::info!(
        "Loaded {} users, cache TTL {}s",
        state.users.len(),
        state.config.cache_ttl_secs
    );

    state.cache.clone().start_sweep_task();

    let addr: SocketAddr = state.config.server_address().parse()?;
    let app = routes::router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
