use anyhow::{Context, Result};
use std::path::Path;

use wordstart::config::Config;
use wordstart::server::WordstartServer;

/// Load configuration from a file or the environment, then apply CLI overrides
pub fn load_config(path: Option<&str>, host: Option<&str>, port: Option<u16>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::from_env().context("Failed to load config from environment")?,
    };

    if let Some(host) = host {
        config.host = host
            .parse()
            .with_context(|| format!("Invalid bind address: {host}"))?;
    }

    if let Some(port) = port {
        config.port = port;
    }

    config.validate()?;
    Ok(config)
}

/// Run the HTTP API until Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let server = WordstartServer::new(config).context("Failed to create server")?;

    println!("{}", server.info().display());
    println!();
    println!("Endpoints:");
    println!("  GET  /                    - Landing page");
    println!("  POST /api/keywords        - Expand seed keywords");
    println!("  GET  /api/keyword/{{kw}}    - Metrics for one keyword");
    println!("  POST /api/export          - Export as json, csv or txt");
    println!("  GET  /health              - Health check");
    println!();

    server.start().await.context("Server terminated with error")?;
    Ok(())
}
