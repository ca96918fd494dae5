//! Server configuration: a TOML file overridden by command line flags.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use safewalk_core::DatasetConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
    /// Upper bound for one request, including snapshot build and search
    pub request_timeout_secs: u64,
    /// Maximum number of requests served at once
    pub concurrency_limit: usize,
    pub cors_origins: Vec<String>,
    /// `tracing_subscriber::EnvFilter` directive, `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            nodes_path: PathBuf::from("data/nodes.csv"),
            edges_path: PathBuf::from("data/edges.csv"),
            request_timeout_secs: 10,
            concurrency_limit: 256,
            cors_origins: vec!["http://localhost:3000".to_string()],
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).context("Invalid server configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&raw)
    }

    pub fn dataset(&self) -> DatasetConfig {
        DatasetConfig::new(&self.nodes_path, &self.edges_path)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be positive"
        );
        anyhow::ensure!(self.concurrency_limit > 0, "concurrency_limit must be positive");
        Ok(())
    }
}

/// Safety-weighted pedestrian routing server
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Intersections CSV
    #[arg(long)]
    pub nodes: Option<PathBuf>,

    /// Streets CSV
    #[arg(long)]
    pub edges: Option<PathBuf>,

    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Loads the config file if one was given, then applies flag overrides
    pub fn resolve(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(nodes) = self.nodes {
            config.nodes_path = nodes;
        }
        if let Some(edges) = self.edges {
            config.edges_path = edges;
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind = "0.0.0.0:9000"
            cors_origins = ["https://safewalk.example"]
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.cors_origins, ["https://safewalk.example"]);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.nodes_path, PathBuf::from("data/nodes.csv"));
    }

    #[test]
    fn rejects_zero_limits() {
        assert!(ServerConfig::from_toml_str("concurrency_limit = 0").is_err());
        assert!(ServerConfig::from_toml_str("request_timeout_secs = 0").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "safewalk-server",
            "--bind",
            "127.0.0.1:8080",
            "--edges",
            "/srv/streets.csv",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.edges_path, PathBuf::from("/srv/streets.csv"));
        assert_eq!(config.nodes_path, PathBuf::from("data/nodes.csv"));
    }
}
