use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rand::seq::IndexedRandom;
use reqwest::{Client, Response, cookie::Jar};

use crate::scan_types::ScanError;

/// Settings for the HTTP client shared by the back-end adapters
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// Browser user agents to pick from; the back-ends turn away library agents
    pub user_agents: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agents: vec![
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
            ],
        }
    }
}

impl HttpConfig {
    /// Pick one of the configured user agents at random
    pub fn pick_user_agent(&self) -> Result<&str, ScanError> {
        self.user_agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .ok_or_else(|| ScanError::ConfigError("No user agents configured".to_string()))
    }
}

/// Build an HTTP client with a cookie jar, a timeout and a browser user agent
pub fn build_client(config: &HttpConfig) -> Result<Client, ScanError> {
    let user_agent = config.pick_user_agent()?;
    debug!("Building HTTP client with user agent: {}", user_agent);

    Client::builder()
        .cookie_provider(Arc::new(Jar::default()))
        .user_agent(user_agent)
        .timeout(config.timeout)
        .build()
        .map_err(|e| ScanError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Turn an unsuccessful response into a [`ScanError`], passing successful ones through
pub async fn error_for_status(response: Response) -> Result<Response, ScanError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    warn!("API request failed with status {}: {}", status, body);

    Err(ScanError::from_status(status, &body))
}
