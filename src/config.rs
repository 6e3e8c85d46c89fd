//! Configuration management for the storage node
//!
//! Values are layered from built-in defaults, an optional `storage-node.toml`,
//! `STORAGE_NODE_*` environment variables and finally the plain `PORT` and
//! `STORAGE_PATH` variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

/// Reported capacity when none is configured (40 GiB).
pub const DEFAULT_CAPACITY_BYTES: u64 = 42_949_672_960;

const CONFIG_FILE: &str = "storage-node";
const ENV_PREFIX: &str = "STORAGE_NODE";

/// Complete node configuration. All values require a restart to take effect.
#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    /// Environment: PORT or STORAGE_NODE_PORT
    pub port: u16,

    /// Root directory; files live under `<storage_path>/uploads`
    /// Environment: STORAGE_PATH or STORAGE_NODE_STORAGE_PATH
    pub storage_path: String,

    /// Synthetic capacity reported by the health check. Never a disk query.
    pub capacity_bytes: u64,
}

impl NodeConfig {
    /// Load configuration from defaults, file and process environment
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("port", std::env::var("PORT").ok())?
            .set_override_option("storage_path", std::env::var("STORAGE_PATH").ok())?;

        Self::finish(builder)
    }

    /// Load configuration from defaults overlaid with a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(contents, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 3001_i64)?
            .set_default("storage_path", "/var/media-storage")?
            .set_default("capacity_bytes", DEFAULT_CAPACITY_BYTES as i64)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: NodeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.storage_path.trim().is_empty() {
            return Err(ConfigError::Message("storage_path cannot be empty".into()));
        }

        if self.capacity_bytes == 0 {
            return Err(ConfigError::Message(
                "capacity_bytes must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Storage root as PathBuf
    pub fn storage_root(&self) -> PathBuf {
        PathBuf::from(&self.storage_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = NodeConfig::from_toml("").unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.storage_path, "/var/media-storage");
        assert_eq!(config.capacity_bytes, DEFAULT_CAPACITY_BYTES);
        assert_eq!(config.listen_socket(), "0.0.0.0:3001");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = NodeConfig::from_toml(
            r#"
            port = 8080
            storage_path = "/srv/media"
            capacity_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_root(), PathBuf::from("/srv/media"));
        assert_eq!(config.capacity_bytes, 1024);
    }

    #[test]
    fn rejects_zero_port() {
        assert!(NodeConfig::from_toml("port = 0").is_err());
    }

    #[test]
    fn rejects_empty_storage_path() {
        assert!(NodeConfig::from_toml(r#"storage_path = "  ""#).is_err());
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(NodeConfig::from_toml("capacity_bytes = 0").is_err());
    }
}
