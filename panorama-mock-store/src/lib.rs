use std::{
    collections::{BTreeMap, HashSet},
    time::Duration,
};

use async_trait::async_trait;
use panorama_api::{Item, ItemStore};
use rand::Rng;

/// In-memory stand-in for the Hacker News item store.
///
/// Supports per-id transport-failure injection and artificial latency, so
/// tests can exercise pruning and check that completion order never leaks
/// into result order.
#[derive(Debug, Default)]
pub struct MockStore {
    items: BTreeMap<u64, Item>,
    failing: HashSet<u64>,
    delays: BTreeMap<u64, Duration>,
    jitter: Option<Duration>,
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore::default()
    }

    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Make every `fetch_item(id)` fail with a transport error.
    pub fn fail_on(&mut self, id: u64) {
        self.failing.insert(id);
    }

    /// Delay every `fetch_item(id)` by `delay` before answering.
    pub fn delay(&mut self, id: u64, delay: Duration) {
        self.delays.insert(id, delay);
    }

    /// Delay every lookup by a random duration up to `max`, scrambling the
    /// completion order of concurrent lookups.
    pub fn with_jitter(&mut self, max: Duration) {
        self.jitter = Some(max);
    }

    /// Whether lookups of `id` are set up to fail.
    pub fn fails(&self, id: u64) -> bool {
        self.failing.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ItemStore for MockStore {
    async fn fetch_item(&self, id: u64) -> anyhow::Result<Option<Item>> {
        if let Some(max) = self.jitter {
            let nanos = rand::thread_rng().gen_range(0..=max.as_nanos() as u64);
            tokio::time::sleep(Duration::from_nanos(nanos)).await;
        }
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&id) {
            anyhow::bail!("injected transport failure looking up item {id}");
        }
        Ok(self.items.get(&id).cloned())
    }
}

/// A story item: title and replies, no text.
pub fn story(id: u64, kids: Vec<u64>) -> Item {
    Item {
        id,
        by: Some(format!("author-{id}")),
        title: Some(format!("story {id}")),
        text: None,
        url: None,
        time: Some(1_700_000_000 + id),
        score: Some(42),
        descendants: Some(kids.len() as u64),
        kind: Some(String::from("story")),
        kids,
        deleted: false,
        dead: false,
    }
}

/// A live comment with the given replies.
pub fn comment(id: u64, kids: Vec<u64>) -> Item {
    Item {
        id,
        by: Some(format!("author-{id}")),
        title: None,
        text: Some(format!("comment {id}")),
        url: None,
        time: Some(1_700_000_000 + id),
        score: None,
        descendants: None,
        kind: Some(String::from("comment")),
        kids,
        deleted: false,
        dead: false,
    }
}

/// The placeholder the store serves for removed content: no author, no text.
pub fn placeholder(id: u64, kids: Vec<u64>) -> Item {
    Item {
        id,
        by: None,
        title: None,
        text: None,
        url: None,
        time: Some(1_700_000_000 + id),
        score: None,
        descendants: None,
        kind: Some(String::from("comment")),
        kids,
        deleted: false,
        dead: false,
    }
}
