//! Server configuration.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Command-line flags
//! 2. Environment variables (PLANNER_*)
//! 3. Config file (~/.conference-planner/config.toml)
//! 4. Default values

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Back-end API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// User resolution and admin policy
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the conference back-end
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the authenticated user name (set by the fronting proxy)
    #[serde(default = "default_user_header")]
    pub user_header: String,

    /// Header carrying a comma-separated role list
    #[serde(default = "default_roles_header")]
    pub roles_header: String,

    /// Role that satisfies the Admin policy
    #[serde(default = "default_admin_role")]
    pub admin_role: Option<String>,

    /// Users that satisfy the Admin policy regardless of role
    #[serde(default)]
    pub admin_users: Vec<String>,
}

// Default value functions
fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_header() -> String {
    "X-Planner-User".to_string()
}

fn default_roles_header() -> String {
    "X-Planner-Roles".to_string()
}

fn default_admin_role() -> Option<String> {
    Some("admin".to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            roles_header: default_roles_header(),
            admin_role: default_admin_role(),
            admin_users: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default config file location. A missing file at
    /// the default location is not an error; a missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::load_from(&default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply PLANNER_* environment overrides
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("PLANNER_API_URL") {
            self.api.url = url;
        }
        if let Ok(listen) = std::env::var("PLANNER_LISTEN") {
            self.server.listen = listen
                .parse()
                .with_context(|| format!("Invalid PLANNER_LISTEN address: {}", listen))?;
        }
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PLANNER_CONFIG") {
            PathBuf::from(path)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".conference-planner")
                .join("config.toml")
        }
    }
}
