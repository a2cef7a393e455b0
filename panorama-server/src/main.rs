use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

mod error;
mod feeds;
mod handlers;
mod hn;
mod state;
mod tests;

pub use error::Error;
pub use state::{AppState, FeedConfig, ItemLookup};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Address to listen on
    #[structopt(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let client = reqwest::Client::new();
    let feeds = FeedConfig::from_env();
    let store = ItemLookup(Arc::new(hn::HttpItemStore::new(
        client.clone(),
        feeds.hn_base.clone(),
    )));

    let app = app(AppState {
        client,
        store,
        feeds,
    });

    tracing::info!("listening on {}", opt.bind);
    axum::Server::bind(&opt.bind)
        .serve(app.into_make_service())
        .await
        .context("serving axum webserver")
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/hackernews", get(handlers::hackernews_top))
        .route("/api/hackernews/comments", get(handlers::hackernews_comments))
        .route("/api/news", get(handlers::news))
        .route("/api/weather", get(handlers::weather))
        .route("/api/sports", get(handlers::sports))
        .route("/api/sports/search", get(handlers::sports_search))
        .route("/api/youtube", get(handlers::youtube))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
