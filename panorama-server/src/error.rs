use panorama_api::Error as ApiError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    pub fn missing_parameter(param: &str) -> Error {
        Error::Api(ApiError::MissingParameter(String::from(param)))
    }

    pub fn api_key_not_configured(feed: &str) -> Error {
        Error::Api(ApiError::ApiKeyNotConfigured(String::from(feed)))
    }

    pub fn upstream_failed(msg: impl Into<String>) -> Error {
        Error::Api(ApiError::UpstreamFailed(msg.into()))
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let err = match self {
            Error::Anyhow(err) => {
                tracing::error!(?err, "internal server error");
                #[cfg(not(test))]
                let err =
                    ApiError::Unknown(String::from("Internal server error, see logs for details"));
                #[cfg(test)]
                let err = ApiError::Unknown(format!("Internal server error: {err:?}"));
                err
            }
            Error::Api(err) => {
                tracing::info!("returning error to client: {err}");
                err
            }
        };
        (err.status_code(), err.contents()).into_response()
    }
}
