use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};
use velvet_db::ProfileDb;

use crate::cache::{CachedPhoto, PhotoCache};
use crate::file_host::{FileHost, FileHostError};
use crate::state::AppState;

/// Used when the file host does not say what it sent.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

pub const PHOTO_CACHE_CONTROL: &str = "public, max-age=3600";

/// Every way a photo request can fail. Lookup and upstream failures are a
/// plain 404; anything unexpected is a 500. Neither carries a body.
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo serving disabled: no bot token configured")]
    NotConfigured,

    #[error("invalid user id {0:?}")]
    InvalidId(String),

    #[error("bot database unavailable")]
    DatabaseUnavailable,

    #[error("no photo stored for user {0}")]
    NoPhoto(i64),

    #[error("{0}")]
    Rejected(String),

    #[error("file host unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FileHostError> for PhotoError {
    fn from(err: FileHostError) -> Self {
        match err {
            FileHostError::Rejected(reason) => PhotoError::Rejected(reason),
            FileHostError::Transport(e) => PhotoError::Transport(e),
        }
    }
}

impl PhotoError {
    pub fn status(&self) -> StatusCode {
        match self {
            PhotoError::NotConfigured
            | PhotoError::InvalidId(_)
            | PhotoError::DatabaseUnavailable
            | PhotoError::NoPhoto(_)
            | PhotoError::Rejected(_) => StatusCode::NOT_FOUND,
            PhotoError::Transport(_) | PhotoError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Photo request failed: {:#}", self);
        } else {
            debug!("Photo not served: {}", self);
        }
        status.into_response()
    }
}

/// Resolves profile photos: bot database → cache → Telegram file API.
pub struct PhotoGateway {
    db_candidates: Vec<PathBuf>,
    file_host: Option<Arc<dyn FileHost>>,
    cache: PhotoCache,
}

impl PhotoGateway {
    pub fn new(
        db_candidates: Vec<PathBuf>,
        file_host: Option<Arc<dyn FileHost>>,
        cache: PhotoCache,
    ) -> Self {
        Self {
            db_candidates,
            file_host,
            cache,
        }
    }

    pub fn cache(&self) -> &PhotoCache {
        &self.cache
    }

    pub async fn fetch(&self, user_id: i64) -> Result<CachedPhoto, PhotoError> {
        // No token means no way to reach the files; skip the database entirely.
        let file_host = self.file_host.as_ref().ok_or(PhotoError::NotConfigured)?;

        let photo_id = self.lookup_reference(user_id).await?;

        if let Some(photo) = self.cache.get(user_id) {
            debug!("Photo cache hit for user {}", user_id);
            return Ok(photo);
        }
        debug!("Photo cache miss for user {}", user_id);

        let file_path = file_host.resolve(&photo_id).await?;
        let download = file_host.download(&file_path).await?;
        let content_type = download
            .content_type
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        Ok(self.cache.insert(user_id, download.bytes, content_type))
    }

    async fn lookup_reference(&self, user_id: i64) -> Result<String, PhotoError> {
        let candidates = self.db_candidates.clone();
        tokio::task::spawn_blocking(move || {
            let db = match ProfileDb::open_first(&candidates) {
                Ok(Some(db)) => db,
                Ok(None) => return Err(PhotoError::DatabaseUnavailable),
                Err(e) => {
                    warn!("Bot database could not be opened: {:#}", e);
                    return Err(PhotoError::DatabaseUnavailable);
                }
            };
            db.photo_reference(user_id)?
                .ok_or(PhotoError::NoPhoto(user_id))
        })
        .await
        .map_err(|e| PhotoError::Internal(anyhow::anyhow!("photo lookup task failed: {}", e)))?
    }
}

/// GET /api/girl-photo/{user_id} — profile photo bytes, cached for an hour.
pub async fn girl_photo(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, PhotoError> {
    let user_id: i64 = user_id
        .parse()
        .map_err(|_| PhotoError::InvalidId(user_id.clone()))?;

    let photo = state.photos.fetch(user_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, photo.content_type),
            (header::CACHE_CONTROL, PHOTO_CACHE_CONTROL.to_string()),
        ],
        photo.bytes,
    ))
}
