use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Recommendation service connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the recommendation service (e.g., "http://127.0.0.1:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Feedback workflow settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackConfig {
    /// Delay between the confirmation notice and the redirect home
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl FeedbackConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

fn default_redirect_delay_ms() -> u64 {
    1500
}
