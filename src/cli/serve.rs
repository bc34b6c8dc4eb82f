use crate::services::api::ApiClient;
use crate::{web, Config};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub async fn run(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = Config::load(config_path)?;
    let client = ApiClient::new(&config.backend)?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);
    tracing::info!(
        "Starting viewer at http://{} (backend {})",
        addr,
        client.base()
    );

    web::serve(config, Arc::new(client), &addr).await?;

    Ok(())
}
