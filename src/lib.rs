//! Tactile Brush: render straight-line haptic strokes on a grid of
//! vibrotactile actuators.
//!
//! A stroke is cut at every grid-line crossing into virtual points, each
//! point gets an onset and activation time from the SOA model, and points
//! lying between two actuators become phantom actuators with an
//! energy-preserving intensity split.
//!
//! ```
//! use tactile_brush::{Point, Stroke, TactileBrush};
//!
//! let brush = TactileBrush::new(3, 3, 1.0).unwrap();
//! let stroke = Stroke::new(Point::new(0.0, 1.0), Point::new(2.0, 1.0), 200.0, 1.0);
//! let schedule = brush.compute_stroke(&stroke).unwrap();
//! assert_eq!(schedule.step_count(), 3);
//! ```

pub mod brush;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod phantom;
pub mod schedule;
pub mod timing;
pub mod types;
pub mod utils;

pub use brush::TactileBrush;
pub use error::BrushError;
pub use schedule::{Schedule, ScheduleEntry};
pub use timing::minimum_duration;
pub use types::{
    ActuatorStep, BrushConfig, CActuatorTrigger, CBrushStatus, CStroke, CStrokeSchedule, Grid,
    Point, Stroke, VirtualPoint,
};

// ============================================================================
// C ABI
// ============================================================================

/// Compute the schedule of a stroke for the driver.
///
/// On success `status` is `Ok` and `triggers` holds `len` entries sorted by
/// onset. On failure `triggers` is null. Every non-null result must be
/// released with [`tactile_brush_free_schedule`].
#[cfg(feature = "c-api")]
#[no_mangle]
pub extern "C" fn tactile_brush_compute_stroke(
    config_ptr: *const BrushConfig,
    stroke_ptr: *const CStroke,
) -> CStrokeSchedule {
    if config_ptr.is_null() || stroke_ptr.is_null() {
        return CStrokeSchedule::failed(CBrushStatus::NullPointer);
    }

    // Both records are plain Copy data
    let config = unsafe { *config_ptr };
    let stroke: Stroke = unsafe { *stroke_ptr }.into();

    log::set_max_level(config.level_filter());

    let result =
        TactileBrush::from_config(&config).and_then(|brush| brush.compute_stroke(&stroke));

    match result {
        Ok(schedule) => {
            let triggers: Box<[CActuatorTrigger]> = schedule
                .triggers()
                .into_iter()
                .map(|(onset, step)| CActuatorTrigger {
                    onset_ms: onset,
                    line: step.line,
                    column: step.column,
                    intensity: step.intensity,
                    duration_ms: step.duration,
                })
                .collect();
            let len = triggers.len();
            // Ownership moves to the caller until tactile_brush_free_schedule
            let ptr = Box::into_raw(triggers) as *mut CActuatorTrigger;

            CStrokeSchedule {
                triggers: ptr,
                len,
                status: CBrushStatus::Ok,
            }
        }
        Err(e) => {
            log::error!("Stroke computation failed: {}", e);
            CStrokeSchedule::failed(CBrushStatus::from(&e))
        }
    }
}

/// Release a schedule returned by [`tactile_brush_compute_stroke`].
#[cfg(feature = "c-api")]
#[no_mangle]
pub extern "C" fn tactile_brush_free_schedule(schedule: CStrokeSchedule) {
    if schedule.triggers.is_null() || schedule.len == 0 {
        return;
    }
    unsafe {
        // Rebuild the boxed slice handed out above and let it drop
        let slice = std::ptr::slice_from_raw_parts_mut(schedule.triggers, schedule.len);
        drop(Box::from_raw(slice));
    }
}
