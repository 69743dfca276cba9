use axum::{Json, extract::State};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;
use velvet_db::ProfileDb;
use velvet_db::models::ProfileRow;
use velvet_types::api::ProfileSummary;

use crate::state::AppState;

/// Cards shown on the landing page.
pub const SHOWCASE_SIZE: usize = 3;

pub const BIO_MAX_CHARS: usize = 100;

pub const ANONYMOUS_NAME: &str = "Анонимка";

/// Online profiles first, then offline, each group shuffled so the single
/// most viewed profile is not always the first card.
pub fn pick_showcase<R: Rng + ?Sized>(
    mut online: Vec<ProfileRow>,
    mut offline: Vec<ProfileRow>,
    rng: &mut R,
) -> Vec<ProfileSummary> {
    online.shuffle(rng);
    offline.shuffle(rng);

    online
        .into_iter()
        .chain(offline)
        .take(SHOWCASE_SIZE)
        .map(summarize)
        .collect()
}

fn summarize(row: ProfileRow) -> ProfileSummary {
    ProfileSummary {
        id: row.user_id,
        name: row
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
        age: row.age,
        city: row.city,
        bio: truncate_chars(row.bio.as_deref().unwrap_or_default(), BIO_MAX_CHARS),
        is_online: row.is_online,
        height: row.height,
        weight: row.weight,
        breast: row.breast,
        has_photo: row.photo_id.is_some_and(|id| !id.is_empty()),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// GET /api/top-girls — up to three featured profiles; `[]` on any failure.
pub async fn top_girls(State(state): State<AppState>) -> Json<Vec<ProfileSummary>> {
    let candidates = state.db_candidates.clone();
    let groups = tokio::task::spawn_blocking(
        move || -> anyhow::Result<(Vec<ProfileRow>, Vec<ProfileRow>)> {
            let Some(db) = ProfileDb::open_first(&candidates)? else {
                return Ok((Vec::new(), Vec::new()));
            };
            let online = db.top_profiles(true, SHOWCASE_SIZE as u32)?;
            let offline = db.top_profiles(false, SHOWCASE_SIZE as u32)?;
            Ok((online, offline))
        },
    )
    .await;

    match groups {
        Ok(Ok((online, offline))) => Json(pick_showcase(online, offline, &mut rand::rng())),
        Ok(Err(e)) => {
            warn!("Top profiles query failed, returning none: {:#}", e);
            Json(Vec::new())
        }
        Err(e) => {
            warn!("Top profiles task failed, returning none: {}", e);
            Json(Vec::new())
        }
    }
}
