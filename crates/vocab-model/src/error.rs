use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("unknown value set kind: {0}")]
    UnknownKind(String),
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
}

pub type Result<T> = std::result::Result<T, VocabError>;
