//! Project configuration loading and validation.
//!
//! The config file (`sqlward.yml` by default) declares the connection
//! target and any named invariant batteries. The database password is
//! never stored in the file: the config names an environment variable
//! and the secret is read from the process environment at connect
//! time.

use crate::error::{CoreError, CoreResult};
use crate::invariant::{default_battery, Invariant, DEFAULT_BATTERY_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "postgres".to_string()
}

fn default_password_env() -> String {
    "SQLWARD_DB_PASSWORD".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

/// Connection parameters for the remote database.
///
/// `password_env` holds the *name* of the environment variable carrying
/// the password, so the secret never appears in the config file, in
/// `Debug` output, or in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    pub user: String,
    #[serde(default = "default_password_env")]
    pub password_env: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl ConnectionConfig {
    /// Resolve the password from the environment variable named in
    /// `password_env`.
    pub fn password(&self) -> CoreResult<String> {
        std::env::var(&self.password_env).map_err(|_| CoreError::MissingSecret {
            var: self.password_env.clone(),
        })
    }
}

/// Top-level project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub connection: ConnectionConfig,

    /// Named invariant batteries. The built-in `storage` battery is
    /// always available unless a declared battery shadows it.
    #[serde(default)]
    pub batteries: HashMap<String, Vec<Invariant>>,
}

impl ProjectConfig {
    /// Load and validate the config at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => CoreError::ConfigParse {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        let config: ProjectConfig =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural constraints that serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        if self.connection.host.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "connection.host must not be empty".to_string(),
            });
        }
        if self.connection.user.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "connection.user must not be empty".to_string(),
            });
        }
        if self.connection.connect_timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "connection.connect_timeout_secs must be at least 1".to_string(),
            });
        }
        for (name, battery) in &self.batteries {
            if battery.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("battery '{name}' declares no invariants"),
                });
            }
        }
        Ok(())
    }

    /// Look up the battery to run by name.
    ///
    /// Declared batteries take precedence; the built-in `storage`
    /// battery backs the default name when nothing shadows it.
    pub fn battery(&self, name: &str) -> CoreResult<Vec<Invariant>> {
        if let Some(battery) = self.batteries.get(name) {
            return Ok(battery.clone());
        }
        if name == DEFAULT_BATTERY_NAME {
            return Ok(default_battery());
        }
        let mut available: Vec<&str> = self.batteries.keys().map(|s| s.as_str()).collect();
        if !self.batteries.contains_key(DEFAULT_BATTERY_NAME) {
            available.push(DEFAULT_BATTERY_NAME);
        }
        available.sort_unstable();
        Err(CoreError::BatteryNotFound {
            name: name.to_string(),
            available: available.join(", "),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
