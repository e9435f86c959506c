// Configuration module
// Typed settings with in-code defaults; a Config value is passed into
// server construction instead of living in process-wide globals.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Served content configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    pub root: String,
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
}

/// Browser launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub open_on_start: bool,
}

impl Config {
    /// Build the configuration from in-code defaults.
    ///
    /// Behavior is constant for the process lifetime: no config file is
    /// read and no environment variables are consulted.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("files.root", ".")?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default("files.directory_listing", true)?
            .set_default("http.server_name", "quickserve/0.1")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("browser.open_on_start", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Human-facing URL printed at startup and handed to the browser.
    pub fn display_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }
}

/// Application state shared by all connections
pub struct AppState {
    pub config: Config,
    /// Canonicalized directory every served path must stay under
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = Path::new(&config.files.root).canonicalize()?;
        Ok(Self { config, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_launcher_contract() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.server.port, 8082);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.files.root, ".");
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.files.directory_listing);
        assert!(cfg.browser.open_on_start);
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log);
        assert!(!cfg.logging.show_headers);
    }

    #[test]
    fn display_url_contains_configured_port() {
        let mut cfg = Config::load().unwrap();
        assert_eq!(cfg.display_url(), "http://localhost:8082");
        cfg.server.port = 9000;
        assert_eq!(cfg.display_url(), "http://localhost:9000");
    }

    #[test]
    fn socket_addr_binds_all_interfaces() {
        let cfg = Config::load().unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 8082);
    }

    #[test]
    fn app_state_canonicalizes_root() {
        let mut cfg = Config::load().unwrap();
        cfg.files.root = ".".to_string();
        let state = AppState::new(cfg).unwrap();
        assert!(state.root.is_absolute());
    }
}
