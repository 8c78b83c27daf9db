use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use calldata_insight::config;
use calldata_insight::harness;
use calldata_insight::{EchoHost, FourByteDirectory, InsightPipeline};

#[derive(Debug, Parser)]
#[command(
    name = "calldata-insight",
    version,
    about = "Resolve and decode pending transaction call-data over line-delimited JSON"
)]
struct Args {
    /// Config file (defaults to $INSIGHT_CONFIG or ~/.config/calldata-insight/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Signature directory endpoint (e.g. https://www.4byte.directory/api/v1/signatures/)
    #[arg(long)]
    registry_url: Option<String>,

    /// Log level or filter directive (e.g. debug, calldata_insight=trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load(args.config.as_deref());
    if let Some(url) = args.registry_url {
        config.registry.url = url;
    }
    if let Some(level) = args.log_level {
        config.log.level = level;
    }
    config.log.json |= args.log_json;

    calldata_insight::logging::init(&config.log)?;

    let mut http = reqwest::Client::builder();
    if let Some(secs) = config.registry.timeout_secs {
        http = http.timeout(Duration::from_secs(secs));
    }
    let http = http.build().context("build HTTP client")?;

    let directory = FourByteDirectory::new(http, config.registry.url.clone());
    info!(registry = %directory.base_url(), "serving hook calls on stdin");

    let pipeline = InsightPipeline::new(Arc::new(directory));
    harness::serve(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        Arc::new(EchoHost),
        pipeline,
    )
    .await
}
