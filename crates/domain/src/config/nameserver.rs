use serde::{Deserialize, Serialize};

/// The resolver queried when the caller does not name one explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NameserverConfig {
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for NameserverConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}
