//! Documented constants for the Tactile Brush pipeline.
//!
//! The timing values come from psychophysical measurements of apparent
//! tactile motion and are fixed: changing them changes what the user feels,
//! not just how the schedule looks.

// ============================================================================
// Geometry Constants
// ============================================================================

/// Tolerance, in centimeters, for every geometric comparison.
///
/// **Rationale**: Grid crossings are computed from a line equation in `f32`,
/// so a crossing that should land on an actuator (e.g. a 45° diagonal over a
/// square grid) comes back a few ULPs away from it. 1e-3 cm (10 µm) is far
/// below anything a fingertip can resolve and far above `f32` rounding for
/// grids of a few dozen centimeters.
///
/// Two virtual points closer than this on both axes are the same point, and a
/// coordinate closer than this to a grid line lies on that line.
pub const EPSILON: f32 = 1e-3;

// ============================================================================
// SOA (Stimulus Onset Asynchrony) Model
// ============================================================================
//
// Apparent motion between two vibrating actuators is perceived when the delay
// between their onsets (SOA) follows the activation duration:
//
//     SOA = SOA_DURATION_SLOPE * duration + SOA_INTERCEPT_MS
//
// Solving this for consecutive virtual points, where the duration of the
// current point depends on the onset of the next one, yields the recurrence
// used in `timing.rs`:
//
//     increment = (SLOPE * (before - sum_soa + next_arrival) + INTERCEPT) / (1 + SLOPE)

/// Slope of the SOA/duration relation (dimensionless).
pub const SOA_DURATION_SLOPE: f32 = 0.32;

/// Intercept of the SOA/duration relation, in milliseconds.
///
/// **Rationale**: This is also the shortest stroke that can be rendered at
/// all. A stroke with no interior crossings needs `duration >= 47.3 ms`,
/// otherwise the end actuator would be given a negative duration.
pub const SOA_INTERCEPT_MS: f32 = 47.3;

/// Normalizer of the recurrence, `1 + SOA_DURATION_SLOPE`.
pub const SOA_NORMALIZER: f32 = 1.32;

// ============================================================================
// Configuration Defaults
// ============================================================================

/// Default number of actuator lines (rows) for [`crate::BrushConfig`].
///
/// **Rationale**: The reference sleeve layout is a 4 x 3 array (4 columns,
/// 3 lines) worn on the forearm.
pub const DEFAULT_LINES: u32 = 3;

/// Default number of actuator columns for [`crate::BrushConfig`].
pub const DEFAULT_COLUMNS: u32 = 4;

/// Default inter-actuator spacing in centimeters.
///
/// **Rationale**: 2.5 cm is close to the two-point discrimination threshold
/// of the forearm for vibration, so phantom sensations between neighbors are
/// perceived as a single moving point instead of two separate buzzes.
pub const DEFAULT_INTER_DIST_CM: f32 = 2.5;

/// Default log verbosity (3 = info), same scale as [`crate::BrushConfig::log_level`].
pub const DEFAULT_LOG_LEVEL: i32 = 3;
