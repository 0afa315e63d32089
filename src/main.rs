use anyhow::Context;
use tracing_subscriber::EnvFilter;

use food_hunter::{
    api::{create_router, AppState},
    config::Config,
    Dataset,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("food_hunter=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Without a dataset there is nothing to serve
    let dataset = Dataset::from_path(&config.dataset_path, &config.tag_delimiter)
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;

    let state = AppState::from_config(&config, dataset)?;
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;

    tracing::info!(
        address = %address,
        mood_policy = ?config.mood_policy,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
