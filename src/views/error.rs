use crate::core::rest::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum ViewsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Could not encode view: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("View has no id")]
    MissingId,
}

impl ViewsError {
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Fetch(e) => e.status(),
            _ => None,
        }
    }
}
