use crate::error::BrushError;
use crate::geometry::compute_virtual_points;
use crate::phantom::compute_physical_mapping;
use crate::schedule::Schedule;
use crate::timing::compute_timings;
use crate::types::{BrushConfig, Grid, Point, Stroke, VirtualPoint};

/// Tactile Brush context for one actuator grid.
///
/// The brush only reads its grid, so a single instance can serve strokes
/// from several threads at once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TactileBrush {
    grid: Grid,
}

impl TactileBrush {
    /// Brush for a grid of `lines` x `columns` actuators spaced `inter_dist` cm apart.
    pub fn new(lines: u32, columns: u32, inter_dist: f32) -> Result<Self, BrushError> {
        Ok(Self::with_grid(Grid::new(lines, columns, inter_dist)?))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn from_config(config: &BrushConfig) -> Result<Self, BrushError> {
        Self::new(config.lines, config.columns, config.inter_dist_cm)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Compute the activation steps for a stroke.
    ///
    /// Given a straight line and a duration, this computes which actuators
    /// must be enabled at which time (SOA), for how long, and with which
    /// intensity (phantom actuators).
    pub fn compute_stroke(&self, stroke: &Stroke) -> Result<Schedule, BrushError> {
        let virtual_points = self.plan_stroke(stroke)?;

        let mut schedule = Schedule::new();
        compute_physical_mapping(&virtual_points, stroke.intensity, &self.grid, &mut schedule)?;

        log::info!(
            "Stroke {} -> {} over {:.1}ms: {} actuator steps at {} onsets",
            stroke.start,
            stroke.end,
            stroke.duration,
            schedule.step_count(),
            schedule.len()
        );

        Ok(schedule)
    }

    /// Timed virtual points of a stroke, before the physical mapping.
    pub fn plan_stroke(&self, stroke: &Stroke) -> Result<Vec<VirtualPoint>, BrushError> {
        self.validate(stroke)?;

        let points = compute_virtual_points(stroke.start, stroke.end, &self.grid);
        let virtual_points = compute_timings(&points, stroke.duration)?;

        for p in &virtual_points {
            log::debug!(
                "virtual point {}: peak at {:.2}ms, onset {:.2}ms, ramp {:.2}ms / {:.2}ms",
                p.position,
                p.timer_max_intensity,
                p.onset,
                p.duration_before,
                p.duration_after
            );
        }

        Ok(virtual_points)
    }

    fn validate(&self, stroke: &Stroke) -> Result<(), BrushError> {
        if !stroke.duration.is_finite() || stroke.duration <= 0.0 {
            return Err(BrushError::InvalidDuration(stroke.duration));
        }
        if !(0.0..=1.0).contains(&stroke.intensity) {
            return Err(BrushError::InvalidIntensity(stroke.intensity));
        }
        for point in [stroke.start, stroke.end] {
            self.validate_endpoint(point)?;
        }
        if stroke.start.approx_eq(&stroke.end) {
            return Err(BrushError::DegenerateStroke(stroke.start));
        }
        Ok(())
    }

    fn validate_endpoint(&self, point: Point) -> Result<(), BrushError> {
        if !point.is_finite() {
            return Err(BrushError::InvalidPoint(point));
        }
        if !self.grid.contains(&point) {
            return Err(BrushError::OutOfRange {
                point,
                min: self.grid.min_coord(),
                max: self.grid.max_coord(),
            });
        }
        if !self.grid.is_on_grid_line(&point) {
            return Err(BrushError::OffGridEndpoint(point));
        }
        Ok(())
    }
}
