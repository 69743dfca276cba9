#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use rusqlite::Connection;
use tower::ServiceExt;

use velvet_api::cache::Clock;
use velvet_api::file_host::{Download, FileHost, FileHostError};
use velvet_api::state::{AppState, AppStateInner};

pub const PHOTO_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg";

// -- Bot database fixture --

pub struct Profile {
    pub id: i64,
    pub is_girl: bool,
    pub online: bool,
    pub views: i64,
    pub photo: Option<&'static str>,
    pub bio: String,
}

pub fn girl(id: i64, online: bool) -> Profile {
    Profile {
        id,
        is_girl: true,
        online,
        views: id * 10,
        photo: Some("AgACAgIAAxkBAAI"),
        bio: "люблю путешествия".into(),
    }
}

pub fn man(id: i64) -> Profile {
    Profile {
        id,
        is_girl: false,
        online: true,
        views: 0,
        photo: None,
        bio: String::new(),
    }
}

/// Temp directory holding a `bot.db` with the bot's `users` table.
pub struct BotDb {
    pub dir: tempfile::TempDir,
}

impl BotDb {
    pub fn new(profiles: &[Profile]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("bot.db")).unwrap();
        conn.execute_batch(
            "CREATE TABLE users (
                user_id     INTEGER PRIMARY KEY,
                name        TEXT,
                age         INTEGER,
                city        TEXT,
                bio         TEXT,
                is_girl     INTEGER DEFAULT 0,
                is_online   INTEGER DEFAULT 0,
                is_banned   INTEGER DEFAULT 0,
                photo_id    TEXT,
                media_type  TEXT,
                view_count  INTEGER DEFAULT 0,
                height      INTEGER,
                weight      INTEGER,
                breast      INTEGER
            );
            CREATE TABLE active_chats (user1 INTEGER, user2 INTEGER);
            INSERT INTO active_chats VALUES (1, 2);",
        )
        .unwrap();
        for p in profiles {
            conn.execute(
                "INSERT INTO users (user_id, name, age, city, bio, is_girl, is_online,
                                    photo_id, media_type, view_count, height, weight, breast)
                 VALUES (?1, ?2, 23, 'спб', ?3, ?4, ?5, ?6, 'photo', ?7, 170, 55, 3)",
                rusqlite::params![
                    p.id,
                    format!("user-{}", p.id),
                    p.bio,
                    p.is_girl as i64,
                    p.online as i64,
                    p.photo,
                    p.views
                ],
            )
            .unwrap();
        }
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("bot.db")
    }

    /// Missing first candidate, then the real file: exercises the fallback.
    pub fn candidates(&self) -> Vec<PathBuf> {
        vec![self.dir.path().join("missing.db"), self.path()]
    }
}

pub fn missing_db(dir: &Path) -> Vec<PathBuf> {
    vec![dir.join("bot.db"), dir.join("bot").join("dating_bot.db")]
}

// -- Injected clock --

pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

// -- Fake file host --

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Serve,
    RejectResolve,
    RejectDownload,
    /// Resolve goes to a closed local port and fails at the transport level.
    Unreachable,
}

pub struct FakeFileHost {
    pub mode: Mutex<HostMode>,
    pub content_type: Option<&'static str>,
    pub resolve_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl FakeFileHost {
    pub fn new(mode: HostMode) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(mode),
            content_type: Some("image/jpeg"),
            resolve_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        })
    }

    pub fn without_content_type() -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(HostMode::Serve),
            content_type: None,
            resolve_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        })
    }

    pub fn resolves(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileHost for FakeFileHost {
    async fn resolve(&self, file_id: &str) -> Result<String, FileHostError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let mode = *self.mode.lock().unwrap();
        match mode {
            HostMode::RejectResolve => {
                return Err(FileHostError::Rejected("getFile not ok: Bad Request".into()));
            }
            HostMode::Unreachable => {
                let err = reqwest::Client::builder()
                    .no_proxy()
                    .build()
                    .unwrap()
                    .get("http://127.0.0.1:1/getFile")
                    .send()
                    .await
                    .expect_err("nothing listens on port 1");
                return Err(FileHostError::Transport(err));
            }
            HostMode::Serve | HostMode::RejectDownload => {}
        }
        Ok(format!("photos/{}.jpg", file_id))
    }

    async fn download(&self, _file_path: &str) -> Result<Download, FileHostError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if *self.mode.lock().unwrap() == HostMode::RejectDownload {
            return Err(FileHostError::Rejected("file download returned 404".into()));
        }
        Ok(Download {
            bytes: Bytes::from_static(PHOTO_BYTES),
            content_type: self.content_type.map(str::to_string),
        })
    }
}

// -- App helpers --

pub fn state(
    db_candidates: Vec<PathBuf>,
    file_host: Option<Arc<FakeFileHost>>,
    clock: Arc<ManualClock>,
) -> AppState {
    let file_host = file_host.map(|host| host as Arc<dyn FileHost>);
    Arc::new(AppStateInner::with_parts(db_candidates, file_host, clock))
}

pub fn app(
    db_candidates: Vec<PathBuf>,
    file_host: Option<Arc<FakeFileHost>>,
    clock: Arc<ManualClock>,
) -> Router {
    velvet_api::router(state(db_candidates, file_host, clock))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> Bytes {
    axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}
