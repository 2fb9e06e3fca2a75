//! Client configuration.

use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Simulated latency band applied to every backend operation.
///
/// Every simulated call completes within this bound; there is no way for
/// an operation to hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_min_ms() -> u64 {
    200
}

fn default_max_ms() -> u64 {
    400
}

impl Default for LatencyConfig {
    fn default() -> Self {
        LatencyConfig {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl LatencyConfig {
    /// Disable simulated latency entirely. Used by tests.
    pub fn none() -> Self {
        LatencyConfig { min_ms: 0, max_ms: 0 }
    }

    /// Pick a delay inside the band. A zero band yields no delay.
    pub fn sample(&self) -> Duration {
        let lo = self.min_ms.min(self.max_ms);
        let hi = self.min_ms.max(self.max_ms);
        if hi == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

/// Top-level client configuration, loadable from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Simulated latency band for backend calls.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Preload the stock document fixtures into the backend store.
    #[serde(default = "default_seed_documents")]
    pub seed_documents: bool,
}

fn default_seed_documents() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            latency: LatencyConfig::default(),
            seed_documents: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file: {}", path.as_ref().display()))?;
        let config: ClientConfig =
            serde_yaml::from_str(&contents).context("failed to parse config file")?;
        Ok(config)
    }
}
