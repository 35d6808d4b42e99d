use pm_core::AgentId;
use pm_geometry::SampleError;
use pm_queue::QueueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("movement configuration error: {0}")]
    Config(String),

    #[error("queue setup failed: {0}")]
    Queue(#[from] QueueError),

    #[error("could not place {agent} in the start region: {source}")]
    Placement {
        agent:  AgentId,
        source: SampleError,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
