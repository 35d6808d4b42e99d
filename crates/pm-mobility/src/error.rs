use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("speed range is empty: min {min} > max {max}")]
    EmptyRange { min: f64, max: f64 },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
