use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use baboo_support_api::{api, config::AppConfig};
use reqwest::StatusCode;

pub const LEGACY_ADMIN: &str = "ops@baboo.example";

pub struct TestServer {
    pub base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Config used by the integration tests
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    config.identity.legacy_admin_email = Some(LEGACY_ADMIN.to_string());
    config
}

/// Start a server on a free port inside the current test runtime
pub async fn start_server(config: AppConfig) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, api::app(config)).await;
    });

    let server = TestServer { base_url };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
