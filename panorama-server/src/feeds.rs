//! The thin feed proxies: each function fetches one upstream API, reshapes
//! the JSON for its widget, and reports upstream trouble as such. Keys stay
//! server-side; responses never echo them (reqwest errors are stripped of
//! their URL before being surfaced).

use chrono::{NaiveDate, SecondsFormat, Utc};
use futures::future;
use panorama_api::{
    Article, CurrentConditions, ForecastDay, PlayerEvents, SportsEvent, SportsSummary, Team,
    Video, WeatherReport,
};

use crate::{state::FeedConfig, Error};

fn upstream(err: reqwest::Error) -> Error {
    Error::upstream_failed(err.without_url().to_string())
}

/// GNews top headlines, in English, ten at most. Exactly one of `country`
/// and `topic` selects the edition; country wins when both are given.
pub async fn top_headlines(
    client: &reqwest::Client,
    cfg: &FeedConfig,
    country: Option<&str>,
    topic: Option<&str>,
) -> Result<Vec<Article>, Error> {
    let key = cfg
        .news_key
        .as_deref()
        .ok_or_else(|| Error::api_key_not_configured("news"))?;

    let mut query = vec![
        ("apikey", String::from(key)),
        ("lang", String::from("en")),
        ("max", String::from("10")),
    ];
    match (country, topic) {
        (Some(country), _) => query.push(("country", String::from(country))),
        (None, Some(topic)) => query.push(("topic", String::from(topic))),
        (None, None) => return Err(Error::missing_parameter("country or topic")),
    }

    #[derive(serde::Deserialize)]
    struct NewsResponse {
        #[serde(default)]
        articles: Vec<Article>,
    }

    let resp = client
        .get(&cfg.news_base)
        .query(&query)
        .send()
        .await
        .map_err(upstream)?
        .error_for_status()
        .map_err(upstream)?;
    let data: NewsResponse = resp.json().await.map_err(upstream)?;
    Ok(data.articles)
}

#[derive(serde::Deserialize)]
struct WApiResponse {
    current: WApiCurrent,
    forecast: WApiForecast,
}

#[derive(serde::Deserialize)]
struct WApiCurrent {
    temp_c: f64,
    wind_kph: f64,
    humidity: f64,
    condition: WApiCondition,
}

#[derive(serde::Deserialize)]
struct WApiCondition {
    text: String,
    icon: String,
}

#[derive(serde::Deserialize)]
struct WApiForecast {
    forecastday: Vec<WApiDay>,
}

#[derive(serde::Deserialize)]
struct WApiDay {
    date: String,
    day: WApiDayStats,
}

#[derive(serde::Deserialize)]
struct WApiDayStats {
    maxtemp_c: f64,
    mintemp_c: f64,
    #[serde(default)]
    daily_chance_of_rain: f64,
    condition: WApiCondition,
}

// WeatherAPI serves protocol-relative icon urls ("//cdn...").
fn icon_url(icon: &str) -> String {
    format!("https:{icon}")
}

fn weekday_name(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A").to_string())
        .unwrap_or_else(|_| String::from(date))
}

/// Today's conditions plus a three-day outlook for one city, reshaped from
/// WeatherAPI's four-day forecast answer.
pub async fn weather_report(
    client: &reqwest::Client,
    cfg: &FeedConfig,
    city: &str,
) -> Result<WeatherReport, Error> {
    let key = cfg
        .weather_key
        .as_deref()
        .ok_or_else(|| Error::api_key_not_configured("weather"))?;

    let raw: WApiResponse = client
        .get(format!("{}/forecast.json", cfg.weather_base))
        .query(&[
            ("key", key),
            ("q", city),
            ("days", "4"),
            ("aqi", "no"),
            ("alerts", "no"),
            ("lang", "en"),
        ])
        .send()
        .await
        .map_err(upstream)?
        .error_for_status()
        .map_err(upstream)?
        .json()
        .await
        .map_err(upstream)?;

    let today = raw
        .forecast
        .forecastday
        .first()
        .ok_or_else(|| Error::upstream_failed("weather forecast came back empty"))?;

    Ok(WeatherReport {
        current: CurrentConditions {
            temp: raw.current.temp_c.round() as i32,
            description: raw.current.condition.text.clone(),
            icon_url: icon_url(&raw.current.condition.icon),
            high: today.day.maxtemp_c.round() as i32,
            low: today.day.mintemp_c.round() as i32,
            wind: raw.current.wind_kph.round() as i32,
            humidity: raw.current.humidity.round() as i32,
            chance_of_rain: today.day.daily_chance_of_rain.round() as i32,
        },
        forecast: raw
            .forecast
            .forecastday
            .iter()
            .skip(1)
            .take(3)
            .map(|day| ForecastDay {
                day: weekday_name(&day.date),
                high: day.day.maxtemp_c.round() as i32,
                low: day.day.mintemp_c.round() as i32,
                icon_url: icon_url(&day.day.condition.icon),
            })
            .collect(),
    })
}

#[derive(serde::Deserialize)]
struct EventsResponse {
    // eventslast.php answers under `results`, other event endpoints under
    // `events`, and both can be JSON null.
    #[serde(default)]
    results: Option<Vec<SportsEvent>>,
    #[serde(default)]
    events: Option<Vec<SportsEvent>>,
}

async fn last_events(client: &reqwest::Client, url: String, team_id: &str) -> Vec<SportsEvent> {
    let resp = match client.get(url).query(&[("id", team_id)]).send().await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!(err = ?err.without_url(), team_id, "skipping team events lookup");
            return Vec::new();
        }
    };
    if !resp.status().is_success() {
        tracing::warn!(status = ?resp.status(), team_id, "skipping team events lookup");
        return Vec::new();
    }
    match resp.json::<EventsResponse>().await {
        Ok(data) => data.results.or(data.events).unwrap_or_default(),
        Err(err) => {
            tracing::warn!(err = ?err.without_url(), team_id, "unparseable team events answer");
            Vec::new()
        }
    }
}

/// Recent results for the followed teams (by TheSportsDB team id) and
/// players (by name, resolved to their current team first). A lookup that
/// fails only empties its own slot.
pub async fn sports_summary(
    client: &reqwest::Client,
    cfg: &FeedConfig,
    teams: &[String],
    players: &[String],
) -> Result<SportsSummary, Error> {
    let key = cfg
        .sports_key
        .as_deref()
        .ok_or_else(|| Error::api_key_not_configured("sports"))?;
    let events_url = format!("{}/{}/eventslast.php", cfg.sports_base, key);

    #[derive(serde::Deserialize)]
    struct PlayersResponse {
        #[serde(default)]
        player: Option<Vec<PlayerHit>>,
    }
    #[derive(serde::Deserialize)]
    struct PlayerHit {
        #[serde(default, rename = "idTeam")]
        id_team: Option<String>,
        #[serde(default, rename = "strTeam")]
        str_team: Option<String>,
    }

    let team_lookups = future::join_all(
        teams
            .iter()
            .map(|team| last_events(client, events_url.clone(), team)),
    );

    let player_lookups = future::join_all(players.iter().map(|player| {
        let events_url = events_url.clone();
        async move {
            let empty = PlayerEvents {
                player_name: player.clone(),
                team_name: None,
                events: Vec::new(),
            };
            let resp = match client
                .get(format!("{}/{}/searchplayers.php", cfg.sports_base, key))
                .query(&[("p", player.as_str())])
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(err) => {
                    tracing::warn!(err = ?err.without_url(), %player, "skipping player lookup");
                    return empty;
                }
            };
            let hit = resp
                .json::<PlayersResponse>()
                .await
                .ok()
                .and_then(|data| data.player)
                .and_then(|hits| hits.into_iter().next());
            match hit {
                Some(PlayerHit {
                    id_team: Some(id_team),
                    str_team,
                }) => PlayerEvents {
                    player_name: player.clone(),
                    team_name: str_team,
                    events: last_events(client, events_url, &id_team).await,
                },
                _ => empty,
            }
        }
    }));

    let (team_results, player_results) = future::join(team_lookups, player_lookups).await;

    Ok(SportsSummary {
        teams: team_results.into_iter().flatten().collect(),
        players: player_results,
    })
}

/// Team search for the "follow a team" flow; no match is an empty list.
pub async fn search_teams(
    client: &reqwest::Client,
    cfg: &FeedConfig,
    query: Option<&str>,
) -> Result<Vec<Team>, Error> {
    let key = cfg
        .sports_key
        .as_deref()
        .ok_or_else(|| Error::api_key_not_configured("sports"))?;
    let query = query.ok_or_else(|| Error::missing_parameter("q"))?;

    #[derive(serde::Deserialize)]
    struct TeamsResponse {
        #[serde(default)]
        teams: Option<Vec<Team>>,
    }

    let data: TeamsResponse = client
        .get(format!("{}/{}/searchteams.php", cfg.sports_base, key))
        .query(&[("t", query)])
        .send()
        .await
        .map_err(upstream)?
        .error_for_status()
        .map_err(upstream)?
        .json()
        .await
        .map_err(upstream)?;
    Ok(data.teams.unwrap_or_default())
}

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(serde::Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(serde::Deserialize)]
struct SearchItemId {
    // Absent for channel/playlist hits, which the widget does not show.
    #[serde(default, rename = "videoId")]
    video_id: Option<String>,
}

#[derive(serde::Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: chrono::DateTime<Utc>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Default, serde::Deserialize)]
struct Thumbnails {
    #[serde(default)]
    medium: Option<Thumbnail>,
    #[serde(default)]
    high: Option<Thumbnail>,
}

#[derive(serde::Deserialize)]
struct Thumbnail {
    url: String,
}

/// Uploads from the last week across the given channels, merged and sorted
/// newest-first. A channel whose lookup fails is skipped, not fatal.
pub async fn recent_uploads(
    client: &reqwest::Client,
    cfg: &FeedConfig,
    channels: &[String],
) -> Result<Vec<Video>, Error> {
    let key = cfg
        .youtube_key
        .as_deref()
        .ok_or_else(|| Error::api_key_not_configured("youtube"))?;
    if channels.is_empty() {
        return Err(Error::missing_parameter("channels"));
    }
    let published_after = (Utc::now() - chrono::Duration::days(7))
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let lookups = future::join_all(channels.iter().map(|channel| {
        let published_after = published_after.clone();
        async move {
            let resp = client
                .get(format!("{}/search", cfg.youtube_base))
                .query(&[
                    ("key", key),
                    ("channelId", channel.as_str()),
                    ("part", "snippet,id"),
                    ("order", "date"),
                    ("maxResults", "10"),
                    ("publishedAfter", published_after.as_str()),
                ])
                .send()
                .await;
            let resp = match resp.and_then(|resp| resp.error_for_status()) {
                Ok(resp) => resp,
                Err(err) => {
                    tracing::warn!(err = ?err.without_url(), %channel, "skipping channel lookup");
                    return Vec::new();
                }
            };
            match resp.json::<SearchResponse>().await {
                Ok(data) => data.items,
                Err(err) => {
                    tracing::warn!(err = ?err.without_url(), %channel, "unparseable channel answer");
                    Vec::new()
                }
            }
        }
    }))
    .await;

    let mut videos: Vec<Video> = lookups
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let thumbnail = item.snippet.thumbnails.medium.or(item.snippet.thumbnails.high);
            Some(Video {
                video_id,
                title: item.snippet.title,
                channel_title: item.snippet.channel_title,
                published_at: item.snippet.published_at,
                thumbnail_url: thumbnail.map(|t| t.url),
            })
        })
        .collect();
    videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_fall_back_to_the_raw_date() {
        assert_eq!(weekday_name("2026-08-24"), "Monday");
        assert_eq!(weekday_name("not-a-date"), "not-a-date");
    }

    #[test]
    fn protocol_relative_icons_get_a_scheme() {
        assert_eq!(
            icon_url("//cdn.weatherapi.com/weather/64x64/day/113.png"),
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }
}
