mod app;
mod auth;
mod config;
mod state;

use crate::auth::repo_types::User;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "stock_advisory=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init()?;

    // Align the users table with its declared shape. A failure is logged and
    // the server keeps running; requests fail at query time instead.
    match User::sync_schema(&state.db).await {
        Ok(()) => tracing::info!("database synchronized"),
        Err(e) => tracing::error!(error = %e, "database synchronization failed"),
    }

    let config = state.config.clone();
    let app = app::build_app(state);
    app::serve(app, &config).await
}
