//! Entry point. Wires Config -> Walker -> Cleaner -> FIM records -> dataset JSON.
//!
//! Usage: `fim-prep [config.yaml]`

use dotenvy::dotenv;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use fim_prep::{pipeline, AppConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    // Config path: argv[1] or ./config.yaml
    let cfg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let cfg = AppConfig::load(&cfg_path)?;
    info!(
        "Input={}, Output={}, Dataset={}, Extensions={:?}",
        cfg.input_dir.display(),
        cfg.output_dir.display(),
        cfg.dataset_path().display(),
        cfg.extensions
    );

    let summary = pipeline::run(&cfg).await?;
    info!(
        "Finished: {} discovered, {} records",
        summary.discovered, summary.records
    );
    Ok(())
}
