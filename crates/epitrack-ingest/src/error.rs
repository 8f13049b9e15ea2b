use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read articles from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no date column found; looked for [{looked_for}], got [{found}]")]
    NoDateColumn { looked_for: String, found: String },

    #[error("JSON parse error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected input shape: {0}")]
    UnexpectedShape(String),
}
