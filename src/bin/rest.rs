//! REST entry point for the advisory backend.
//!
//! Builds the remote service client and tool catalog, bootstraps the advisor
//! (assistant configuration plus conversation thread), and serves `/chat`.

use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use swarnamitra_backend::advisor::{Advisor, AdvisorProfile};
use swarnamitra_backend::assistants::{DEFAULT_API_BASE, OpenAiAssistants};
use swarnamitra_backend::config::{AppConfig, Credentials};
use swarnamitra_backend::run::RunPolicy;
use swarnamitra_backend::server;
use swarnamitra_backend::tools::{MetalPriceApi, SpotPriceSource, ToolRegistry, standard_catalog};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "swarna-rest", about = "SwarnaMitra advisory REST API server")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// REST API bind address (overrides config if specified)
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing();
    info!("Starting SwarnaMitra advisory backend");

    let config_path = args.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?;
    let credentials = Credentials::from_env()?;

    debug!(
        model = %config.model,
        assistant = %config.assistant_name,
        "Configuration loaded"
    );

    let addr: SocketAddr = args.addr.unwrap_or_else(|| {
        config
            .rest_server
            .bind
            .parse()
            .expect("Invalid bind address in config")
    });

    let api_base = config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
    let service = Arc::new(OpenAiAssistants::with_base(api_base, credentials.api_key));

    if credentials.metals_api_key.is_none() {
        warn!("METALS_API_KEY not set; live gold price lookups will report a failure");
    }
    let price_feed: Arc<dyn SpotPriceSource> =
        Arc::new(MetalPriceApi::new(credentials.metals_api_key));

    let registry = Arc::new(ToolRegistry::new(standard_catalog(price_feed)));
    info!(tools = registry.len(), "Tool catalog loaded");

    let profile = AdvisorProfile {
        model: config.model.clone(),
        assistant_name: config.assistant_name.clone(),
        instructions: config.instructions().to_string(),
    };
    let advisor = Arc::new(Advisor::new(
        service,
        registry,
        profile,
        RunPolicy::from_limits(config.run),
    ));

    match advisor.bootstrap().await {
        Ok(conversation) => info!(
            thread_id = conversation.thread_id.as_str(),
            "Assistant and thread initialized"
        ),
        Err(bootstrap_error) => error!(
            error = %bootstrap_error,
            "Advisor bootstrap failed; /chat will report unavailability until restart"
        ),
    }

    info!(addr = %addr, "REST server starting");
    server::serve(advisor, addr, &config.rest_server.cors_origins).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
