use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("route {name:?} has {points} point(s); a route needs at least 2")]
    MalformedRoute { name: String, points: usize },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("agent capacity is zero; nothing can be spawned")]
    ZeroAgentCap,
}

pub type EngineResult<T> = Result<T, EngineError>;
