use std::path::PathBuf;

use anyhow::{Context, Result};
use velvet_api::file_host::TELEGRAM_API_URL;
use velvet_api::state::GatewayConfig;
use velvet_db::DEFAULT_DB_CANDIDATES;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Landing page assets. Served at `/` when the directory exists.
    pub static_dir: PathBuf,
    pub gateway: GatewayConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = var("VELVET_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = var("VELVET_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("VELVET_PORT must be a port number")?;
        let static_dir: PathBuf = var("VELVET_STATIC_DIR")
            .unwrap_or_else(|| "web".into())
            .into();

        let db_candidates: Vec<PathBuf> = match var("VELVET_DB_PATHS") {
            Some(paths) if !paths.trim().is_empty() => std::env::split_paths(&paths).collect(),
            _ => DEFAULT_DB_CANDIDATES.iter().map(PathBuf::from).collect(),
        };
        let bot_token = var("BOT_TOKEN").filter(|token| !token.trim().is_empty());
        let telegram_api_url =
            var("TELEGRAM_API_URL").unwrap_or_else(|| TELEGRAM_API_URL.into());

        Ok(Self {
            host,
            port,
            static_dir,
            gateway: GatewayConfig {
                db_candidates,
                bot_token,
                telegram_api_url,
            },
        })
    }
}
