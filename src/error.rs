pub type SolvetraceResult<T> = Result<T, SolvetraceError>;

#[derive(thiserror::Error, Debug)]
pub enum SolvetraceError {
    #[error("malformed record: {0}")]
    Record(String),

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SolvetraceError {
    pub fn record(msg: impl Into<String>) -> Self {
        Self::Record(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }
}
