//! Row types read from the bot's database. The bot owns the schema; these
//! only carry the columns the gateway needs.

/// Aggregate counters for the stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsCounts {
    pub total_users: u64,
    pub total_girls: u64,
    pub total_men: u64,
    pub active_chats: u64,
}

/// A girl profile eligible for the landing page showcase.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub user_id: i64,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub is_online: bool,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub breast: Option<i64>,
    pub photo_id: Option<String>,
}
