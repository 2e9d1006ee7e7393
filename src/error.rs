use thiserror::Error;

use crate::types::Point;

/// Errors produced while building a brush or computing a stroke.
///
/// A stroke either produces a complete schedule or one of these; there is no
/// partial result.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BrushError {
    /// The grid has fewer than two lines or columns.
    #[error("grid needs at least 2 lines and 2 columns, got {lines} x {columns}")]
    InvalidGrid { lines: u32, columns: u32 },
    /// Actuator spacing is zero, negative or not finite.
    #[error("inter-actuator distance must be positive, got {0} cm")]
    InvalidSpacing(f32),
    /// Stroke duration is zero, negative or not finite.
    #[error("stroke duration must be positive, got {0} ms")]
    InvalidDuration(f32),
    /// Stroke intensity is outside [0, 1].
    #[error("stroke intensity must be within [0, 1], got {0}")]
    InvalidIntensity(f32),
    /// A stroke endpoint has a NaN or infinite coordinate.
    #[error("stroke endpoint {0} is not a finite position")]
    InvalidPoint(Point),
    /// Start and end coincide, so the stroke has no direction of travel.
    #[error("stroke starts and ends at {0}")]
    DegenerateStroke(Point),
    /// A stroke endpoint lies outside the grid.
    #[error("stroke point {point} lies outside the grid range {min} - {max}")]
    OutOfRange { point: Point, min: Point, max: Point },
    /// A stroke endpoint lies on neither a row nor a column of actuators.
    #[error("stroke endpoint {0} is not on any grid line")]
    OffGridEndpoint(Point),
    /// The requested duration is too short for the number of crossings.
    #[error(
        "virtual point {index} would be driven for {duration_ms:.3} ms; \
         this stroke needs at least {minimum_duration_ms:.1} ms"
    )]
    InvalidTiming {
        index: usize,
        duration_ms: f32,
        /// Shortest duration that schedules this stroke, infinite if none does
        minimum_duration_ms: f32,
    },
    /// A virtual point is on no grid line. Indicates a bug in the geometry pass.
    #[error("virtual point {0} is not aligned with the grid")]
    InternalConsistency(Point),
}
