use pm_behavior::BehaviorError;
use pm_core::PmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Core(#[from] PmError),
}

pub type SimResult<T> = Result<T, SimError>;
