use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Debug, Eq, PartialEq, bolero::generator::TypeGenerator, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Missing request parameter {0:?}")]
    MissingParameter(String),

    #[error("{0} API key is not configured")]
    ApiKeyNotConfigured(String),

    #[error("Failed to look up root item {0}")]
    RootLookupFailed(u64),

    #[error("Item {0} appears in its own reply chain")]
    CycleDetected(u64),

    #[error("Replies below item {0} nest deeper than supported")]
    ThreadTooDeep(u64),

    #[error("Upstream service failure: {0}")]
    UpstreamFailed(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Error::ApiKeyNotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::RootLookupFailed(_) => StatusCode::NOT_FOUND,
            Error::CycleDetected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ThreadTooDeep(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::MissingParameter(param) => json!({
                "message": format!("missing request parameter {param:?}"),
                "type": "missing-parameter",
                "parameter": param,
            }),
            Error::ApiKeyNotConfigured(feed) => json!({
                "message": format!("{feed} API key is not configured"),
                "type": "api-key-not-configured",
                "feed": feed,
            }),
            Error::RootLookupFailed(id) => json!({
                "message": "failed to look up the requested story",
                "type": "root-lookup-failed",
                "id": id,
            }),
            Error::CycleDetected(id) => json!({
                "message": "the discussion thread references itself",
                "type": "cycle-detected",
                "id": id,
            }),
            Error::ThreadTooDeep(id) => json!({
                "message": "the discussion thread nests too deeply",
                "type": "thread-too-deep",
                "id": id,
            }),
            Error::UpstreamFailed(msg) => json!({
                "message": msg,
                "type": "upstream-failed",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let item_id = |data: &serde_json::Value| {
            data.get("id")
                .and_then(|id| id.as_u64())
                .ok_or_else(|| anyhow!("error is about an item but has no id"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "missing-parameter" => Error::MissingParameter(String::from(
                    data.get("parameter")
                        .and_then(|p| p.as_str())
                        .ok_or_else(|| anyhow!("missing-parameter error without a parameter"))?,
                )),
                "api-key-not-configured" => Error::ApiKeyNotConfigured(String::from(
                    data.get("feed")
                        .and_then(|f| f.as_str())
                        .ok_or_else(|| anyhow!("api-key error without a feed name"))?,
                )),
                "root-lookup-failed" => Error::RootLookupFailed(item_id(&data)?),
                "cycle-detected" => Error::CycleDetected(item_id(&data)?),
                "thread-too-deep" => Error::ThreadTooDeep(item_id(&data)?),
                "upstream-failed" => Error::UpstreamFailed(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_round_trips_through_json() {
        bolero::check!().with_type::<Error>().for_each(|err| {
            let parsed = Error::parse(&err.contents()).expect("parsing serialized error");
            assert_eq!(*err, parsed);
        })
    }

    #[test]
    fn status_codes_are_client_or_server_errors() {
        bolero::check!().with_type::<Error>().for_each(|err| {
            assert!(err.status_code().is_client_error() || err.status_code().is_server_error());
        })
    }
}
