mod error;
mod item;
mod news;
mod sports;
mod thread;
mod weather;
mod youtube;

pub use error::Error;
pub use item::{CommentNode, Item};
pub use news::{Article, ArticleSource};
pub use sports::{PlayerEvents, SportsEvent, SportsSummary, Team};
pub use thread::{
    build_comment_forest, classify, ItemStore, LiveItem, PruneReason, Resolved,
    MAX_CONCURRENT_LOOKUPS, MAX_THREAD_DEPTH,
};
pub use weather::{CurrentConditions, ForecastDay, WeatherReport};
pub use youtube::Video;
