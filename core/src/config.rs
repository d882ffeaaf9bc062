use serde::{Deserialize, Serialize};

/// Base URL of the public dweet service.
pub const DEFAULT_BASE_URL: &str = "https://dweet.io";

/// Configuration for a `DweetClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
