use std::sync::Arc;

use anyhow::Context;

use stocksense_api::app::{AppServices, build_app};
use stocksense_infra::{InMemoryInventoryRepository, InferenceConfig, OpenAiInferenceClient, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocksense_observability::init();

    let server = ServerConfig::from_env();
    let inference = InferenceConfig::from_env().context("inference client configuration")?;
    let client = OpenAiInferenceClient::new(&inference).context("failed to build inference client")?;
    tracing::info!(model = client.model(), "inference client ready");

    let services = AppServices::new(Arc::new(InMemoryInventoryRepository::new()), Arc::new(client));
    let app = build_app(services, &server);

    let listener = tokio::net::TcpListener::bind(&server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
