use serde::{Deserialize, Serialize};

// -- Greeting --

pub const DEFAULT_GREETING: &str = "Привет, Мир";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self {
            message: DEFAULT_GREETING.to_string(),
        }
    }
}

// -- Stats --

/// Aggregate counters shown on the landing page.
///
/// Computed per request, never stored. The zero value is what every
/// failure path degrades to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatsResponse {
    pub total_users: u64,
    pub total_girls: u64,
    pub total_men: u64,
    pub active_chats: u64,
    /// Display estimate, not a measurement.
    pub online_now: u64,
}

// -- Profiles --

/// Public card for a featured profile. The Telegram file reference is
/// deliberately absent; clients only learn whether a photo exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub city: Option<String>,
    pub bio: String,
    pub is_online: bool,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub breast: Option<i64>,
    pub has_photo: bool,
}
