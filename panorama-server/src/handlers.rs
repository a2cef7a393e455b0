use axum::{
    extract::{Query, State},
    Json,
};
use panorama_api::{
    build_comment_forest, Article, CommentNode, Item, SportsSummary, Team, Video, WeatherReport,
};

use crate::{feeds, hn, Error, FeedConfig, ItemLookup};

fn split_list(param: Option<&str>) -> Vec<String> {
    param
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub async fn hackernews_top(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    State(store): State<ItemLookup>,
) -> Result<Json<Vec<Item>>, Error> {
    Ok(Json(
        hn::top_stories(&client, &cfg.hn_base, &*store.0).await?,
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct CommentsParams {
    id: Option<u64>,
}

pub async fn hackernews_comments(
    State(store): State<ItemLookup>,
    Query(params): Query<CommentsParams>,
) -> Result<Json<Vec<CommentNode>>, Error> {
    let id = params.id.ok_or_else(|| Error::missing_parameter("id"))?;
    Ok(Json(build_comment_forest(&*store.0, id).await?))
}

#[derive(Debug, serde::Deserialize)]
pub struct NewsParams {
    country: Option<String>,
    topic: Option<String>,
}

pub async fn news(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    Query(params): Query<NewsParams>,
) -> Result<Json<Vec<Article>>, Error> {
    Ok(Json(
        feeds::top_headlines(
            &client,
            &cfg,
            params.country.as_deref(),
            params.topic.as_deref(),
        )
        .await?,
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct WeatherParams {
    city: Option<String>,
}

pub async fn weather(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherReport>, Error> {
    let city = params.city.ok_or_else(|| Error::missing_parameter("city"))?;
    Ok(Json(feeds::weather_report(&client, &cfg, &city).await?))
}

#[derive(Debug, serde::Deserialize)]
pub struct SportsParams {
    teams: Option<String>,
    players: Option<String>,
}

pub async fn sports(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    Query(params): Query<SportsParams>,
) -> Result<Json<SportsSummary>, Error> {
    let teams = split_list(params.teams.as_deref());
    let players = split_list(params.players.as_deref());
    Ok(Json(
        feeds::sports_summary(&client, &cfg, &teams, &players).await?,
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub async fn sports_search(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Team>>, Error> {
    Ok(Json(
        feeds::search_teams(&client, &cfg, params.q.as_deref()).await?,
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct YoutubeParams {
    channels: Option<String>,
}

pub async fn youtube(
    State(client): State<reqwest::Client>,
    State(cfg): State<FeedConfig>,
    Query(params): Query<YoutubeParams>,
) -> Result<Json<Vec<Video>>, Error> {
    let channels = split_list(params.channels.as_deref());
    Ok(Json(feeds::recent_uploads(&client, &cfg, &channels).await?))
}
