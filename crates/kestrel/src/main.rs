//! Kestrel Log API server
//!
//! Serves the multi-tenant log listing API over HTTP.

use clap::Parser;
use kestrel_persistence::Unconfigured;
use kestrel_rest::{LogsDriver, ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let driver = config
        .logs_driver()
        .map_err(|e| anyhow::anyhow!("Invalid logs driver configuration: {}", e))?;

    info!(
        port = config.port,
        host = %config.host,
        logs_driver = %driver,
        region = ?config.region,
        "Starting Kestrel Log API"
    );

    match driver {
        LogsDriver::Elasticsearch => start_elasticsearch(config).await,
        LogsDriver::None => {
            warn!("No logs driver configured; listing requests will fail");
            let app = create_app_with_config::<Unconfigured>(None, config.clone());
            serve(app, &config).await
        }
    }
}

/// Starts the server with the Elasticsearch repository.
#[cfg(feature = "elasticsearch")]
async fn start_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use kestrel_persistence::backends::elasticsearch::ElasticsearchLogsRepository;

    let es_config = config.elasticsearch_config();
    let settings = config.search_settings();

    info!(
        nodes = ?es_config.nodes,
        index_pattern = %settings.index_pattern,
        "Initializing Elasticsearch repository"
    );

    let repository = ElasticsearchLogsRepository::connect(es_config, &settings)?;

    let app = create_app_with_config(Some(repository), config.clone());
    serve(app, &config).await
}

/// Fallback when the elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The elasticsearch driver requires the 'elasticsearch' feature. \
         Build with: cargo build -p kestrel --features elasticsearch"
    )
}
