use anyhow::Context;
use async_trait::async_trait;
use futures::future;
use panorama_api::{Item, ItemStore};

use crate::Error;

/// How many front-page stories the dashboard shows.
const TOP_STORIES: usize = 10;

/// `ItemStore` backed by the Hacker News Firebase API.
pub struct HttpItemStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpItemStore {
    pub fn new(client: reqwest::Client, base_url: String) -> HttpItemStore {
        HttpItemStore { client, base_url }
    }
}

#[async_trait]
impl ItemStore for HttpItemStore {
    async fn fetch_item(&self, id: u64) -> anyhow::Result<Option<Item>> {
        // The API answers `null` (not 404) for ids it does not know.
        let item = self
            .client
            .get(format!("{}/item/{}.json", self.base_url, id))
            .send()
            .await
            .with_context(|| format!("requesting item {id}"))?
            .error_for_status()
            .with_context(|| format!("bad status fetching item {id}"))?
            .json::<Option<Item>>()
            .await
            .with_context(|| format!("parsing item {id}"))?;
        Ok(item)
    }
}

/// Fetch the current front page: the first ten top-story ids, resolved
/// concurrently. Ids that fail to resolve are dropped from the list, the
/// way unresolvable comments are dropped from a thread.
pub async fn top_stories(
    client: &reqwest::Client,
    base_url: &str,
    store: &(dyn ItemStore + Send + Sync),
) -> Result<Vec<Item>, Error> {
    let ids: Vec<u64> = client
        .get(format!("{base_url}/topstories.json"))
        .send()
        .await
        .map_err(|err| Error::upstream_failed(err.without_url().to_string()))?
        .error_for_status()
        .map_err(|err| Error::upstream_failed(err.without_url().to_string()))?
        .json()
        .await
        .map_err(|err| Error::upstream_failed(err.without_url().to_string()))?;

    let stories = future::join_all(
        ids.iter()
            .take(TOP_STORIES)
            .map(|&id| store.fetch_item(id)),
    )
    .await;

    Ok(stories
        .into_iter()
        .filter_map(|story| match story {
            Ok(Some(story)) => Some(story),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(?err, "skipping unresolvable top story");
                None
            }
        })
        .collect())
}
