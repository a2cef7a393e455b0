/// One record from the Hacker News item store, story or comment alike.
///
/// Field names follow the upstream JSON contract. The store answers with
/// `null` for ids it does not know, and with placeholder records (no `text`,
/// `deleted` or `dead` set) for removed content.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Item {
    pub id: u64,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub descendants: Option<u64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Direct reply ids, in the store's canonical display order.
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

/// A surviving comment with its fully resolved replies.
///
/// `text` passes through unmodified; escaping any markup it contains is the
/// rendering layer's problem.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentNode {
    pub id: u64,
    pub by: Option<String>,
    pub text: String,
    pub time: u64,
    pub kids: Vec<CommentNode>,
}
