use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonefront_api::source::ContentHandle;
use phonefront_api::{build_router, AppState};
use phonefront_common::{Config, TaxonomyLabels};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("phonefront=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let labels = match &config.taxonomy_labels_path {
        Some(path) => {
            info!(path = %path, "Loading taxonomy labels");
            TaxonomyLabels::from_json_file(path)?
        }
        None => TaxonomyLabels::builtin(),
    };

    // The CMS client is built on the first request that needs it.
    let content = ContentHandle::lazy(config.stack_config()?);

    let state = Arc::new(AppState {
        content,
        labels,
        allowed_origins: config.allowed_origins.clone(),
    });
    let app = build_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("PhoneFront API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
