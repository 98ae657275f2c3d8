#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Unknown pivot type: {0}")]
    UnknownPivotType(String),
    #[error("Invalid {kind} config: {source}")]
    InvalidConfig {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Widget {0} has no config")]
    MissingConfig(String),
    #[error("Malformed widget JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
