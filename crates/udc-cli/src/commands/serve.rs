//! `udc serve` - start the HTTP API.

use anyhow::Result;
use udc_core::UdcConfig;
use udc_server::AppState;

pub async fn run(mut config: UdcConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!(
        data_dir = %config.data.directory.display(),
        llm_enabled = config.llm.enabled,
        "starting udc server"
    );
    let state = AppState::from_config(&config);
    udc_server::serve(state, &config.server.bind_addr()).await
}
