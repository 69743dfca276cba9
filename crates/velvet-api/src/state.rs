use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use velvet_db::DEFAULT_DB_CANDIDATES;

use crate::cache::{Clock, PhotoCache, SystemClock};
use crate::file_host::{FileHost, FileHostError, TELEGRAM_API_URL, TelegramFileHost};
use crate::photos::PhotoGateway;

pub type AppState = Arc<AppStateInner>;

/// Everything the gateway reads from its environment, resolved once at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Bot database locations, tried in order.
    pub db_candidates: Vec<PathBuf>,
    /// Telegram bot token. Photo serving is off without it.
    pub bot_token: Option<String>,
    pub telegram_api_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            db_candidates: DEFAULT_DB_CANDIDATES.iter().map(PathBuf::from).collect(),
            bot_token: None,
            telegram_api_url: TELEGRAM_API_URL.to_string(),
        }
    }
}

pub struct AppStateInner {
    pub db_candidates: Vec<PathBuf>,
    pub photos: PhotoGateway,
}

impl AppStateInner {
    /// Production wiring: Telegram file host when a token is set, wall clock.
    pub fn new(config: GatewayConfig) -> Result<Self, FileHostError> {
        let file_host: Option<Arc<dyn FileHost>> = match config.bot_token.as_deref() {
            Some(token) if !token.is_empty() => {
                info!("Photo gateway enabled via {}", config.telegram_api_url);
                Some(Arc::new(TelegramFileHost::new(&config.telegram_api_url, token)?))
            }
            _ => {
                warn!("BOT_TOKEN not set, photo requests will return 404");
                None
            }
        };

        Ok(Self::with_parts(config.db_candidates, file_host, Arc::new(SystemClock)))
    }

    pub fn with_parts(
        db_candidates: Vec<PathBuf>,
        file_host: Option<Arc<dyn FileHost>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let photos = PhotoGateway::new(db_candidates.clone(), file_host, PhotoCache::new(clock));
        Self {
            db_candidates,
            photos,
        }
    }
}
