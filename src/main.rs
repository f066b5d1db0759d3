mod access;
mod app;
mod athletes;
mod auth;
mod catalog;
mod config;
mod days;
mod error;
mod foods;
mod meals;
mod nutrition;
mod seed;
mod state;
mod validate;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "calotrack=debug,axum=info,tower_http=info".to_string());
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

    let app_state = AppState::init().await?;

    // Both stores may share one database and thus one migrations table.
    let mut tracker = sqlx::migrate!("./migrations/tracker");
    tracker.set_ignore_missing(true);
    if let Err(e) = tracker.run(&app_state.db).await {
        tracing::warn!(error = %e, "tracker migrations failed; continuing");
    }
    let mut catalog = sqlx::migrate!("./migrations/catalog");
    catalog.set_ignore_missing(true);
    if let Err(e) = catalog.run(&app_state.catalog).await {
        tracing::warn!(error = %e, "catalog migrations failed; continuing");
    }

    if app_state.config.seed_demo_data {
        seed::run(&app_state).await?;
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}
