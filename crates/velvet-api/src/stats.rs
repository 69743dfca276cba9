use axum::{Json, extract::State};
use rand::Rng;
use tracing::{debug, warn};
use velvet_db::ProfileDb;
use velvet_db::models::StatsCounts;
use velvet_types::api::BotStatsResponse;

use crate::state::AppState;

/// Smallest "online now" figure ever shown.
const MIN_ONLINE_ESTIMATE: u64 = 3;

/// Landing page "online now" figure: a uniform pick in
/// `3 ..= (girls + 10) / 2`. A display heuristic, not a measurement.
pub fn online_estimate<R: Rng + ?Sized>(total_girls: u64, rng: &mut R) -> u64 {
    let upper = (total_girls.saturating_add(10) / 2).max(MIN_ONLINE_ESTIMATE);
    rng.random_range(MIN_ONLINE_ESTIMATE..=upper)
}

pub fn snapshot<R: Rng + ?Sized>(counts: StatsCounts, rng: &mut R) -> BotStatsResponse {
    BotStatsResponse {
        total_users: counts.total_users,
        total_girls: counts.total_girls,
        total_men: counts.total_men,
        active_chats: counts.active_chats,
        online_now: online_estimate(counts.total_girls, rng),
    }
}

/// GET /api/bot-stats — always 200; any failure reports zeros.
pub async fn bot_stats(State(state): State<AppState>) -> Json<BotStatsResponse> {
    let candidates = state.db_candidates.clone();
    let counts = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<StatsCounts>> {
        match ProfileDb::open_first(&candidates)? {
            Some(db) => db.stats_counts().map(Some),
            None => Ok(None),
        }
    })
    .await;

    let stats = match counts {
        Ok(Ok(Some(counts))) => snapshot(counts, &mut rand::rng()),
        Ok(Ok(None)) => {
            debug!("No bot database found, reporting zero stats");
            BotStatsResponse::default()
        }
        Ok(Err(e)) => {
            warn!("Stats query failed, reporting zeros: {:#}", e);
            BotStatsResponse::default()
        }
        Err(e) => {
            warn!("Stats task failed, reporting zeros: {}", e);
            BotStatsResponse::default()
        }
    };

    Json(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn estimate_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for girls in [0u64, 1, 5, 40, 1_000] {
            let upper = ((girls + 10) / 2).max(3);
            for _ in 0..200 {
                let n = online_estimate(girls, &mut rng);
                assert!((3..=upper).contains(&n), "{n} outside 3..={upper}");
            }
        }
    }

    #[test]
    fn snapshot_copies_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let counts = StatsCounts {
            total_users: 12,
            total_girls: 4,
            total_men: 8,
            active_chats: 2,
        };
        let stats = snapshot(counts, &mut rng);
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.total_girls, 4);
        assert_eq!(stats.total_men, 8);
        assert_eq!(stats.active_chats, 2);
        assert!((3..=7).contains(&stats.online_now));
    }
}
