use thiserror::Error;

pub type HandleResult<T> = Result<T, HandleError>;

/// Recoverable errors surfaced while handling a form event.  None of
/// them leave partial state behind; each requires a new user action.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum HandleError {
    #[error("exactly 100 boxes must be assigned, got {total}")]
    InvalidBoxCount { total: u32 },

    #[error("custom split must add up to exactly 100%, got {sum}")]
    InvalidSplit { sum: f64 },

    #[error("box price must be above zero to create a payout pool")]
    EmptyPayoutPool,

    #[error("add at least one participant first")]
    NoParticipants,

    #[error("all 100 boxes are already assigned")]
    BoxesAlreadyFull,

    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl From<StorageError> for HandleError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Faults from the underlying key-value store.  Persistence is
/// best-effort end to end; the gateway logs these and keeps going.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
}
