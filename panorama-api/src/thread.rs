use async_recursion::async_recursion;
use async_trait::async_trait;
use futures::future;
use tokio::sync::Semaphore;

use crate::{CommentNode, Error, Item};

/// Ceiling on reply nesting. The store is supposed to hand us a finite tree,
/// but it is external data, so a thread deeper than this is reported as a
/// fault instead of being followed forever.
pub const MAX_THREAD_DEPTH: usize = 256;

/// Cap on in-flight item lookups for one forest build, whatever the tree
/// shape. Sibling lookups still run concurrently, they just queue on this.
pub const MAX_CONCURRENT_LOOKUPS: usize = 16;

/// The one capability the forest builder needs: look an item up by id.
///
/// `Ok(None)` means the store has no item with this id; `Err` is a transport
/// failure. The builder treats both the same way for children (prune) and
/// for the root (fail the whole build).
#[async_trait]
pub trait ItemStore {
    async fn fetch_item(&self, id: u64) -> anyhow::Result<Option<Item>>;
}

/// Why a fetched id did not make it into the forest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PruneReason {
    FetchFailed,
    Missing,
    Deleted,
    Dead,
    Textless,
}

/// An item that survived classification, with the fields a comment is
/// guaranteed to have.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiveItem {
    pub id: u64,
    pub by: Option<String>,
    pub text: String,
    pub time: u64,
    pub kids: Vec<u64>,
}

/// Result of classifying one lookup: either a displayable comment or the
/// reason it gets pruned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolved {
    Live(LiveItem),
    Pruned(PruneReason),
}

/// The single place where the pruning policy lives. A node is pruned by its
/// own flags or lookup failure only, never by what happened to an ancestor.
///
/// Absent `text` counts as removed: the store serves textless placeholder
/// records for scrubbed comments, and there is nothing to display anyway.
pub fn classify(fetched: anyhow::Result<Option<Item>>) -> Resolved {
    let item = match fetched {
        Err(err) => {
            tracing::warn!(?err, "item lookup failed, pruning");
            return Resolved::Pruned(PruneReason::FetchFailed);
        }
        Ok(None) => return Resolved::Pruned(PruneReason::Missing),
        Ok(Some(item)) => item,
    };
    if item.deleted {
        return Resolved::Pruned(PruneReason::Deleted);
    }
    if item.dead {
        return Resolved::Pruned(PruneReason::Dead);
    }
    match item.text {
        None => Resolved::Pruned(PruneReason::Textless),
        Some(text) => Resolved::Live(LiveItem {
            id: item.id,
            by: item.by,
            text,
            time: item.time.unwrap_or(0),
            kids: item.kids,
        }),
    }
}

/// Build the ordered comment forest below `root_id`.
///
/// The forest is the root's surviving children in the root's `kids` order,
/// each carrying its fully resolved subtree. A root that cannot be looked up
/// is an error, distinct from a root with no comments (which yields `[]`).
/// Pruning a child never aborts its siblings; only root failure, a reply
/// cycle or an absurdly deep thread abort the build.
pub async fn build_comment_forest<S>(store: &S, root_id: u64) -> Result<Vec<CommentNode>, Error>
where
    S: ItemStore + Sync + ?Sized,
{
    let root = match store.fetch_item(root_id).await {
        Err(err) => {
            tracing::warn!(?err, root_id, "root item lookup failed");
            return Err(Error::RootLookupFailed(root_id));
        }
        Ok(None) => return Err(Error::RootLookupFailed(root_id)),
        Ok(Some(root)) => root,
    };
    if root.kids.is_empty() {
        return Ok(Vec::new());
    }
    let lookups = Semaphore::new(MAX_CONCURRENT_LOOKUPS);
    let ancestors = [root_id];
    let children = future::try_join_all(
        root.kids
            .iter()
            .map(|&kid| resolve_node(store, &lookups, kid, &ancestors)),
    )
    .await?;
    Ok(children.into_iter().flatten().collect())
}

/// Resolve one subtree. `Ok(None)` is the pruning sentinel.
///
/// `ancestors` is the id path from the root down to (excluding) `id`; an id
/// reappearing on its own path is a cycle in the store's reference graph.
#[async_recursion]
async fn resolve_node<S>(
    store: &S,
    lookups: &Semaphore,
    id: u64,
    ancestors: &[u64],
) -> Result<Option<CommentNode>, Error>
where
    S: ItemStore + Sync + ?Sized,
{
    if ancestors.contains(&id) {
        return Err(Error::CycleDetected(id));
    }
    if ancestors.len() > MAX_THREAD_DEPTH {
        return Err(Error::ThreadTooDeep(id));
    }
    let fetched = {
        // Permit covers the lookup only. Holding it across the recursion
        // would deadlock once the tree is deeper than the permit count.
        let _permit = lookups
            .acquire()
            .await
            .map_err(|_| Error::Unknown(String::from("lookup semaphore closed")))?;
        store.fetch_item(id).await
    };
    let item = match classify(fetched) {
        Resolved::Pruned(reason) => {
            tracing::debug!(id, ?reason, "pruning comment");
            return Ok(None);
        }
        Resolved::Live(item) => item,
    };
    let mut path = Vec::with_capacity(ancestors.len() + 1);
    path.extend_from_slice(ancestors);
    path.push(id);
    let kids = future::try_join_all(
        item.kids
            .iter()
            .map(|&kid| resolve_node(store, lookups, kid, &path)),
    )
    .await?;
    Ok(Some(CommentNode {
        id: item.id,
        by: item.by,
        text: item.text,
        time: item.time,
        kids: kids.into_iter().flatten().collect(),
    }))
}
