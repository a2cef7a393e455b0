use std::sync::Arc;

use panorama_api::ItemStore;

pub const HN_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const NEWS_BASE_URL: &str = "https://gnews.io/api/v4/top-headlines";
pub const WEATHER_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const SPORTS_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json";
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub client: reqwest::Client,
    pub store: ItemLookup,
    pub feeds: FeedConfig,
}

/// The item-lookup capability the comment routes run against. Production
/// hands in the Firebase-backed store, tests an in-memory one.
#[derive(Clone)]
pub struct ItemLookup(pub Arc<dyn ItemStore + Send + Sync>);

/// Per-feed upstream endpoints and API keys. Keys are optional at startup;
/// a route whose key is missing answers with a configuration error instead
/// of the server refusing to boot.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub hn_base: String,
    pub news_base: String,
    pub weather_base: String,
    pub sports_base: String,
    pub youtube_base: String,
    pub news_key: Option<String>,
    pub weather_key: Option<String>,
    pub sports_key: Option<String>,
    pub youtube_key: Option<String>,
}

impl FeedConfig {
    pub fn from_env() -> FeedConfig {
        FeedConfig {
            hn_base: String::from(HN_BASE_URL),
            news_base: String::from(NEWS_BASE_URL),
            weather_base: String::from(WEATHER_BASE_URL),
            sports_base: String::from(SPORTS_BASE_URL),
            youtube_base: String::from(YOUTUBE_BASE_URL),
            news_key: std::env::var("NEWS_API_KEY").ok(),
            weather_key: std::env::var("WEATHERAPI_KEY").ok(),
            sports_key: std::env::var("SPORTS_DB_API_KEY").ok(),
            youtube_key: std::env::var("YOUTUBE_API_KEY").ok(),
        }
    }
}
