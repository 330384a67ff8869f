//! CLI command implementations

use anyhow::Result;

use crate::cli::{error, info, success, warn};
use crate::config::{self, load_config};
use crate::error::Error;

/// Initialize a new blogpad.toml configuration file
pub async fn init() -> Result<()> {
    let dir = std::env::current_dir()?;

    match config::write_default_config(&dir) {
        Ok(path) => {
            success(&format!("Created {}", path.display()));
            info("Edit the configuration file and run 'blogpad serve' to start the server");
            Ok(())
        }
        Err(Error::Config(message)) => {
            warn(&message);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Start the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    info(&format!("Starting server at http://{}:{}", host, port));

    if let Err(e) = crate::api::run_server(config, &host, port).await {
        error(&format!("Server stopped: {}", e));
        return Err(e.into());
    }
    Ok(())
}

/// Print the effective configuration as TOML
pub async fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
