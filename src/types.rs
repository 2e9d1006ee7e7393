use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLUMNS, DEFAULT_INTER_DIST_CM, DEFAULT_LINES, DEFAULT_LOG_LEVEL, EPSILON,
};
use crate::error::BrushError;

/// A position on the actuator grid, in centimeters.
///
/// Pure geometry: timing information lives in [`VirtualPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// True when both coordinates are within [`EPSILON`] of `other`.
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Physical actuator lattice.
///
/// Actuator `(line, column)` sits at `(column * inter_dist, line * inter_dist)`.
/// A grid is validated on construction and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Grid {
    lines: u32,
    columns: u32,
    inter_dist: f32,
}

impl Grid {
    /// Create a grid of `lines` x `columns` actuators spaced `inter_dist` cm apart.
    ///
    /// A single line or column leaves nothing to interpolate between, so both
    /// counts must be at least 2.
    pub fn new(lines: u32, columns: u32, inter_dist: f32) -> Result<Self, BrushError> {
        if lines < 2 || columns < 2 {
            return Err(BrushError::InvalidGrid { lines, columns });
        }
        if !inter_dist.is_finite() || inter_dist <= 0.0 {
            return Err(BrushError::InvalidSpacing(inter_dist));
        }
        Ok(Self {
            lines,
            columns,
            inter_dist,
        })
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Spacing between neighboring actuators, in centimeters.
    pub fn inter_dist(&self) -> f32 {
        self.inter_dist
    }

    pub fn min_coord(&self) -> Point {
        Point::new(0.0, 0.0)
    }

    pub fn max_coord(&self) -> Point {
        Point::new(
            (self.columns - 1) as f32 * self.inter_dist,
            (self.lines - 1) as f32 * self.inter_dist,
        )
    }

    /// Position of the physical actuator at `(line, column)`.
    pub fn actuator_position(&self, line: u32, column: u32) -> Point {
        Point::new(
            column as f32 * self.inter_dist,
            line as f32 * self.inter_dist,
        )
    }

    /// Inclusive bounds check against `[min_coord, max_coord]`.
    pub fn contains(&self, point: &Point) -> bool {
        let min = self.min_coord();
        let max = self.max_coord();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// True when `point` lies on a grid row line, a grid column line, or both.
    pub fn is_on_grid_line(&self, point: &Point) -> bool {
        self.aligned_index(point.x).is_some() || self.aligned_index(point.y).is_some()
    }

    /// Index of the grid line `coord` lies on, if any.
    ///
    /// Measured as the distance to the nearest multiple of `inter_dist`, so a
    /// coordinate just below a line (0.9999 on a 1 cm grid) still counts.
    pub(crate) fn aligned_index(&self, coord: f32) -> Option<u32> {
        let index = (coord / self.inter_dist).round();
        if index >= 0.0 && (coord - index * self.inter_dist).abs() < EPSILON {
            Some(index as u32)
        } else {
            None
        }
    }
}

/// A straight-line stroke request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Start position, in centimeters
    pub start: Point,
    /// End position, in centimeters
    pub end: Point,
    /// Total stroke duration in milliseconds
    pub duration: f32,
    /// Global intensity, on the scale [0, 1]
    pub intensity: f32,
}

impl Stroke {
    pub fn new(start: Point, end: Point, duration: f32, intensity: f32) -> Self {
        Self {
            start,
            end,
            duration,
            intensity,
        }
    }

    /// Stroke between two physical actuators given as `(line, column)` indices.
    pub fn between_actuators(
        grid: &Grid,
        from: (u32, u32),
        to: (u32, u32),
        duration: f32,
        intensity: f32,
    ) -> Self {
        Self::new(
            grid.actuator_position(from.0, from.1),
            grid.actuator_position(to.0, to.1),
            duration,
            intensity,
        )
    }

    /// Straight-line length of the stroke in centimeters.
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }
}

/// A control point of the stroke, with its timing once the SOA model ran.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VirtualPoint {
    pub position: Point,
    /// Ideal time (ms from stroke start) of peak intensity at constant speed
    pub timer_max_intensity: f32,
    /// Scheduled trigger time, ms from stroke start
    pub onset: f32,
    /// Time spent before the peak intensity, in ms
    pub duration_before: f32,
    /// Time spent after the peak intensity, in ms
    pub duration_after: f32,
}

impl VirtualPoint {
    /// Total actuation time of this point.
    pub fn total_duration(&self) -> f32 {
        self.duration_before + self.duration_after
    }
}

impl From<Point> for VirtualPoint {
    fn from(position: Point) -> Self {
        Self {
            position,
            timer_max_intensity: 0.0,
            onset: 0.0,
            duration_before: 0.0,
            duration_after: 0.0,
        }
    }
}

/// Activation of a **physical** actuator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActuatorStep {
    /// Line index of the actuator, NOT centimeters
    pub line: u32,
    /// Column index of the actuator, NOT centimeters
    pub column: u32,
    /// On the scale [0, 1]
    pub intensity: f32,
    /// In milliseconds
    pub duration: f32,
}

impl ActuatorStep {
    pub fn new(line: u32, column: u32, intensity: f32, duration: f32) -> Self {
        Self {
            line,
            column,
            intensity,
            duration,
        }
    }
}

impl fmt::Display for ActuatorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "actuator ({}, {}) for {:.2}ms at intensity {:.3}",
            self.line, self.column, self.duration, self.intensity
        )
    }
}

/// Brush configuration passed from FFI.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct BrushConfig {
    /// Number of actuator lines (rows), at least 2
    pub lines: u32,
    /// Number of actuator columns, at least 2
    pub columns: u32,
    /// Distance between two neighboring actuators, in centimeters
    pub inter_dist_cm: f32,
    /// Log verbosity level: 0=off, 1=error, 2=warn, 3=info, 4=debug, 5=trace
    pub log_level: i32,
}

impl BrushConfig {
    /// Map `log_level` onto the `log` crate's filter. Out-of-range values clamp.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level {
            i32::MIN..=0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES,
            columns: DEFAULT_COLUMNS,
            inter_dist_cm: DEFAULT_INTER_DIST_CM,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Stroke request as laid out by C callers. Coordinates in centimeters.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CStroke {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub duration_ms: f32,
    pub intensity: f32,
}

impl From<CStroke> for Stroke {
    fn from(s: CStroke) -> Self {
        Stroke::new(
            Point::new(s.start_x, s.start_y),
            Point::new(s.end_x, s.end_y),
            s.duration_ms,
            s.intensity,
        )
    }
}

/// One flattened schedule entry handed to the driver.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CActuatorTrigger {
    /// ms after stroke start
    pub onset_ms: f32,
    pub line: u32,
    pub column: u32,
    pub intensity: f32,
    pub duration_ms: f32,
}

/// Outcome of a C ABI call.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CBrushStatus {
    Ok = 0,
    NullPointer = 1,
    InvalidGrid = 2,
    InvalidStroke = 3,
    OutOfRange = 4,
    InvalidTiming = 5,
    Internal = 6,
}

impl From<&BrushError> for CBrushStatus {
    fn from(e: &BrushError) -> Self {
        match e {
            BrushError::InvalidGrid { .. } | BrushError::InvalidSpacing(_) => {
                CBrushStatus::InvalidGrid
            }
            BrushError::InvalidDuration(_)
            | BrushError::InvalidIntensity(_)
            | BrushError::InvalidPoint(_)
            | BrushError::DegenerateStroke(_)
            | BrushError::OffGridEndpoint(_) => CBrushStatus::InvalidStroke,
            BrushError::OutOfRange { .. } => CBrushStatus::OutOfRange,
            BrushError::InvalidTiming { .. } => CBrushStatus::InvalidTiming,
            BrushError::InternalConsistency(_) => CBrushStatus::Internal,
        }
    }
}

/// Schedule returned across the C ABI. Free with `tactile_brush_free_schedule`.
#[repr(C)]
pub struct CStrokeSchedule {
    pub triggers: *mut CActuatorTrigger,
    pub len: usize,
    pub status: CBrushStatus,
}

impl CStrokeSchedule {
    #[cfg_attr(not(feature = "c-api"), allow(dead_code))]
    pub(crate) fn failed(status: CBrushStatus) -> Self {
        Self {
            triggers: std::ptr::null_mut(),
            len: 0,
            status,
        }
    }
}
