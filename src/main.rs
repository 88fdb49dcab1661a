use mcp_fatsecret::{FatsecretConfig, FatsecretMcpServer};
use mcp_fatsecret::client::Localization;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match FatsecretConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Please verify:");
            tracing::error!("  - FATSECRET_CONSUMER_KEY is set");
            tracing::error!("  - FATSECRET_CONSUMER_SECRET is set");
            std::process::exit(1);
        }
    };

    // Probe the API once so bad credentials show up at startup
    tracing::info!("Validating FatSecret credentials against {}...", config.base_url);
    let probe = mcp_fatsecret::FatsecretClient::from_config(&config);
    let localization = Localization::new(
        config.default_region.clone(),
        config.default_language.clone(),
    );
    match probe.get_food_categories(&localization).await {
        Ok(categories) => {
            tracing::info!("API access test passed - found {} food categories", categories.len());
        }
        Err(e) => {
            tracing::warn!("API access test failed: {}", e);
            tracing::warn!("The server will continue, but tool calls may fail.");
            tracing::warn!("Check the consumer key/secret and that this IP is allowed by your FatSecret application.");
        }
    }

    // Create server configuration and start SSE server
    let sse_config = SseServerConfig {
        bind: config.bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("FatSecret MCP Server listening on {}", sse_config.bind);

    // serve_with_config handles binding, axum server setup, and graceful shutdown internally
    let sse_server = SseServer::serve_with_config(sse_config).await?;

    let ct = sse_server.with_service(move || FatsecretMcpServer::from_config(&config));

    tracing::info!("FatSecret MCP Server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
