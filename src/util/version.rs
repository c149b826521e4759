pub const APP_NAME: &str = "Rank Boost Pricing";
pub const APP_REPO_URL: &str = "https://github.com/skynatbs/rank_boost_pricing";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent to the record store.
pub fn user_agent() -> String {
    format!("rank-boost-pricing/{APP_VERSION} (+{APP_REPO_URL})")
}
