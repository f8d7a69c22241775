//! Errors raised to callers of the movement core.
//!
//! Only argument and construction mistakes surface as errors. Geometry that
//! fails to converge degrades to "no event" inside the tick instead.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MovementError {
    #[error("body radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("direction {0:?} has no fall focus")]
    UnsupportedDirection(crate::scouting::Direction),
}
