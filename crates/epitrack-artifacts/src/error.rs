use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {path} into place: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
