use crate::ProfileDb;
use crate::models::{ProfileRow, StatsCounts};
use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

/// Filter shared by every showcase query: girl profiles with a stored still
/// photo that are not banned. A NULL media type is the bot's default, a photo.
const ELIGIBLE_GIRL: &str = "is_girl = 1
    AND photo_id IS NOT NULL AND photo_id != ''
    AND COALESCE(is_banned, 0) = 0
    AND COALESCE(media_type, 'photo') = 'photo'";

impl ProfileDb {
    // -- Stats --

    /// Counters for the stats endpoint. The `active_chats` table is optional
    /// in older bot databases; when the query fails that figure alone is 0.
    pub fn stats_counts(&self) -> Result<StatsCounts> {
        self.with_conn(|conn| {
            let total_users = count(conn, "SELECT COUNT(*) FROM users")?;
            let total_girls = count(conn, "SELECT COUNT(*) FROM users WHERE is_girl = 1")?;
            let total_men = count(
                conn,
                "SELECT COUNT(*) FROM users WHERE COALESCE(is_girl, 0) = 0",
            )?;
            let active_chats =
                count(conn, "SELECT COUNT(*) FROM active_chats").unwrap_or_else(|e| {
                    debug!("active_chats unavailable, reporting 0: {}", e);
                    0
                });

            Ok(StatsCounts {
                total_users,
                total_girls,
                total_men,
                active_chats,
            })
        })
    }

    // -- Profiles --

    /// Eligible girl profiles with the given online flag, most viewed first.
    pub fn top_profiles(&self, online: bool, limit: u32) -> Result<Vec<ProfileRow>> {
        self.with_conn(|conn| query_top_profiles(conn, online, limit))
    }

    /// Stored Telegram file reference for a girl profile. `None` when the
    /// profile does not exist, is not a girl profile, or has no photo.
    pub fn photo_reference(&self, user_id: i64) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let photo_id: Option<Option<String>> = conn
                .query_row(
                    "SELECT photo_id FROM users WHERE user_id = ?1 AND is_girl = 1",
                    [user_id],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(photo_id.flatten().filter(|id| !id.is_empty()))
        })
    }
}

fn count(conn: &Connection, sql: &str) -> Result<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n.max(0) as u64)
}

fn query_top_profiles(conn: &Connection, online: bool, limit: u32) -> Result<Vec<ProfileRow>> {
    let sql = format!(
        "SELECT user_id, name, age, city, bio, COALESCE(is_online, 0),
                height, weight, breast, photo_id
         FROM users
         WHERE {ELIGIBLE_GIRL}
           AND COALESCE(is_online, 0) = ?1
         ORDER BY COALESCE(view_count, 0) DESC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(rusqlite::params![online as i64, limit], |row| {
            Ok(ProfileRow {
                user_id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                city: row.get(3)?,
                bio: row.get(4)?,
                is_online: row.get::<_, i64>(5)? != 0,
                height: row.get(6)?,
                weight: row.get(7)?,
                breast: row.get(8)?,
                photo_id: row.get(9)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
