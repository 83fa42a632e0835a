use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        line: usize,
        id: Option<u64>,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn malformed(line: usize, id: Option<u64>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            id,
            reason: reason.into(),
        }
    }
}
