//! Client for the Telegram Bot API file endpoints.
//!
//! Photos are stored by the bot as Telegram file ids. Serving one takes two
//! round trips: `getFile` resolves the id to a server-side path, then the
//! path is downloaded from the file CDN. Neither step retries.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header};
use serde::Deserialize;
use thiserror::Error;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum FileHostError {
    /// The API answered, but not with a usable result.
    #[error("file host rejected request: {0}")]
    Rejected(String),

    /// The API could not be reached or the connection broke mid-body.
    #[error("file host unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// External storage holding profile photos.
#[async_trait]
pub trait FileHost: Send + Sync {
    /// Resolve a stored file reference to a downloadable path.
    async fn resolve(&self, file_id: &str) -> Result<String, FileHostError>;

    /// Fetch the binary behind a path returned by `resolve`.
    async fn download(&self, file_path: &str) -> Result<Download, FileHostError>;
}

/// `{"ok": bool, "result": {...}}` envelope of every Bot API reply.
#[derive(Debug, Deserialize)]
struct BotApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramFile {
    file_path: Option<String>,
}

pub struct TelegramFileHost {
    client: Client,
    api_url: String,
    token: String,
}

impl TelegramFileHost {
    pub fn new(api_url: &str, token: &str) -> Result<Self, FileHostError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl FileHost for TelegramFileHost {
    async fn resolve(&self, file_id: &str) -> Result<String, FileHostError> {
        let resp = self
            .client
            .get(format!("{}/bot{}/getFile", self.api_url, self.token))
            .query(&[("file_id", file_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FileHostError::Rejected(format!("getFile returned {}", status)));
        }

        let body: BotApiResponse<TelegramFile> = resp
            .json()
            .await
            .map_err(|e| FileHostError::Rejected(format!("malformed getFile reply: {}", e)))?;

        if !body.ok {
            return Err(FileHostError::Rejected(format!(
                "getFile not ok: {}",
                body.description.unwrap_or_default()
            )));
        }

        body.result
            .and_then(|file| file.file_path)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| FileHostError::Rejected("getFile reply has no file_path".into()))
    }

    async fn download(&self, file_path: &str) -> Result<Download, FileHostError> {
        let resp = self
            .client
            .get(format!("{}/file/bot{}/{}", self.api_url, self.token, file_path))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FileHostError::Rejected(format!("file download returned {}", status)));
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await?;

        Ok(Download { bytes, content_type })
    }
}
