use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("epoch index {index} is outside the series (length {len})")]
    NotFound { index: String, len: usize },
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
    #[error("invalid record at {epoch}: {field} = {value:?}")]
    InvalidRecord {
        epoch: String,
        field: &'static str,
        value: String,
    },
    #[error("no epochs loaded")]
    EmptySeries,
}
