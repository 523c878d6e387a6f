use thiserror::Error;

/// Top-level error type for the polyhedral gravity engine.
#[derive(Debug, Error)]
pub enum GravityError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// Errors raised while building a shape model.
///
/// Only index-level problems are detected. A mesh that is not a closed
/// 2-manifold is accepted and yields physically meaningless results.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("shape model has no {0}")]
    Empty(&'static str),

    #[error("face {face} references vertex {index}, but the model has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} repeats a vertex index")]
    RepeatedVertex { face: usize },

    #[error("invalid shape parameter: {0}")]
    InvalidParameter(String),
}

/// Errors related to an evaluation pass.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("a reference potential is required to compute elevation for {0}")]
    MissingReferencePotential(&'static str),

    #[error("{normals} normals supplied for {points} field points")]
    NormalCountMismatch { points: usize, normals: usize },

    #[error("parameter {parameter} = {value} is invalid: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("gravity evaluation produced a non-finite value at field point {index}")]
    NonFinite { index: usize },
}

/// Errors raised by the scatter/gather driver.
#[derive(Debug, Error)]
pub enum ParallelError {
    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience type alias for results using [`GravityError`].
pub type Result<T> = std::result::Result<T, GravityError>;
