#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("failed to read body: {0}")]
    Body(#[from] axum::Error),
    #[error("streaming bodies cannot be collected")]
    StreamingBody,
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error("failed to rebuild message: {0}")]
    Http(#[from] http::Error),
}
