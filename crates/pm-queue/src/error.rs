use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue capacity must be at least 1")]
    ZeroCapacity,

    #[error("queue needs at least 2 slots, got {0}")]
    TooFewSlots(usize),

    #[error("slot tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
}

pub type QueueResult<T> = Result<T, QueueError>;
