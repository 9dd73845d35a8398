use crate::ClientError;
use roarm_protocol::{ArmModel, UnknownModel};
use roarm_transport::Transport;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config read error: {0}")]
    Io(String),
    #[error(transparent)]
    UnknownModel(#[from] UnknownModel),
}

/// Session configuration: which arm, over which link, with which tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoarmConfig {
    pub model: ArmModel,
    pub transport: TransportConfig,
    /// Per-read frame timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Round-trip attempts before giving up on a command.
    #[serde(default = "default_retry_budget")]
    pub retry_budget: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    Serial {
        port: String,
        #[serde(default = "default_baud")]
        baud: u32,
    },
    Http {
        host: String,
    },
}

fn default_timeout_ms() -> u64 {
    100
}

fn default_retry_budget() -> u32 {
    crate::DEFAULT_RETRY_BUDGET
}

fn default_baud() -> u32 {
    115_200
}

impl RoarmConfig {
    /// Build a config from a runtime model name; unknown names are fatal
    /// since no limit table can be resolved for them.
    pub fn new(model: &str, transport: TransportConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            model: model.parse::<ArmModel>()?,
            transport,
            timeout_ms: default_timeout_ms(),
            retry_budget: default_retry_budget(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn open_transport(&self) -> Result<Box<dyn Transport>, ClientError> {
        match &self.transport {
            TransportConfig::Serial { port, baud } => {
                #[cfg(feature = "serial")]
                {
                    let channel =
                        roarm_transport::SerialChannel::open(port, *baud, self.timeout())?;
                    Ok(Box::new(roarm_transport::LineTransport::with_read_timeout(
                        channel,
                        self.timeout(),
                    )))
                }
                #[cfg(not(feature = "serial"))]
                {
                    let _ = (port, baud);
                    Err(ClientError::Unsupported("serial"))
                }
            }
            TransportConfig::Http { host } => {
                #[cfg(feature = "http")]
                {
                    Ok(Box::new(roarm_transport::HttpTransport::connect(host)?))
                }
                #[cfg(not(feature = "http"))]
                {
                    let _ = host;
                    Err(ClientError::Unsupported("http"))
                }
            }
        }
    }
}
