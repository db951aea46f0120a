//! Error types for operator construction.

use thiserror::Error;

use crate::order::{Narrowing, Order};

/// Failures raised while selecting or building an operator set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    /// Raised by the factory before any builder runs.
    #[error("unsupported order {order}: expected 6 or 8")]
    UnsupportedOrder { order: u32 },

    #[error("unsupported narrowing {narrowing}: expected 0 (wide), 1 (intermediate) or 2 (narrow)")]
    UnsupportedNarrowing { narrowing: u8 },

    #[error(
        "insufficient grid size for order {order} with {narrowing} narrowing: \
         got {points} points, need at least {minimum}"
    )]
    InsufficientGridSize {
        order: Order,
        narrowing: Narrowing,
        points: usize,
        minimum: usize,
    },

    #[error("domain length must be finite and positive, got {length}")]
    InvalidDomainLength { length: f64 },

    #[error("grid spacing must be finite and positive, got {h}")]
    InvalidSpacing { h: f64 },

    /// The boundary closure system could not be satisfied.
    #[error("boundary closure solve failed: {0}")]
    ClosureSolve(String),

    #[error("unsupported periodic order {order}: expected 2, 4, 6, 8, 10 or 12")]
    UnsupportedPeriodicOrder { order: u32 },

    #[error("unsupported upwind order {order}: expected 3, 5 or 7")]
    UnsupportedUpwindOrder { order: u32 },

    #[error("operator needs at least {minimum} grid points, got {points}")]
    TooFewPoints { points: usize, minimum: usize },

    #[error("coefficient vector has {actual} entries, expected {expected}")]
    CoefficientLength { expected: usize, actual: usize },

    #[error("norm matrix is not positive definite")]
    SingularNorm,
}

pub type OperatorResult<T> = Result<T, OperatorError>;
