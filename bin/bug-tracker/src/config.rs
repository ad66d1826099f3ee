//! # Runtime Configuration
//!
//! One explicitly constructed object, loaded at startup from
//! `config/default.toml` with `BT_*` environment overrides, then handed to
//! the repository and auth plugins. No process-wide globals.

use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Listening port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Connection string for the bug store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Shared secret for signing and verifying bearer tokens.
    pub jwt_secret: SecretString,

    /// Browser origins allowed to make cross-origin API calls.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Directory holding the single-page client.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://bug_tracker.db".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

pub fn load() -> anyhow::Result<AppConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(
            config::Environment::with_prefix("BT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        )
        .build()?;

    Ok(cfg.try_deserialize()?)
}
