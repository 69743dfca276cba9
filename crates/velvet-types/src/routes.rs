//! Route table shared by the router and its clients.
//!
//! Paths use axum's `{param}` placeholder syntax. `build_url` fills the
//! placeholders so callers never format paths by hand.

pub const GREETING: &str = "/api/greeting";
pub const BOT_STATS: &str = "/api/bot-stats";
pub const TOP_GIRLS: &str = "/api/top-girls";
pub const GIRL_PHOTO: &str = "/api/girl-photo/{user_id}";
pub const HEALTH: &str = "/health";

/// Substitute `{key}` placeholders in `path` with the given values.
/// Placeholders without a matching param are left untouched.
pub fn build_url(path: &str, params: &[(&str, &dyn std::fmt::Display)]) -> String {
    let mut url = path.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        if url.contains(&placeholder) {
            url = url.replace(&placeholder, &value.to_string());
        }
    }
    url
}
