// Phantom actuator mapping: virtual points -> physical actuator steps
use crate::error::BrushError;
use crate::schedule::Schedule;
use crate::types::{ActuatorStep, Grid, VirtualPoint};

/// Map each timed virtual point onto one or two physical actuators and add
/// the resulting steps to `schedule`.
///
/// A point on an actuator drives it at `global_intensity`. A point between
/// two actuators of the same row or column is rendered as a phantom: both
/// neighbors are driven with `sqrt(1 - ratio)` and `sqrt(ratio)` of the
/// intensity, which keeps the summed energy at `global_intensity^2`.
pub fn compute_physical_mapping(
    virtual_points: &[VirtualPoint],
    global_intensity: f32,
    grid: &Grid,
    schedule: &mut Schedule,
) -> Result<(), BrushError> {
    let d = grid.inter_dist();

    for e in virtual_points {
        let duration = e.total_duration();
        let column = grid.aligned_index(e.position.x);
        let line = grid.aligned_index(e.position.y);

        match (line, column) {
            (Some(line), Some(column)) => {
                schedule.insert(
                    e.onset,
                    ActuatorStep::new(line, column, global_intensity, duration),
                );
            }
            (None, Some(column)) => {
                let l1 = (e.position.y / d).floor() as u32;
                let l2 = (e.position.y / d).ceil() as u32;
                let (i1, i2) = phantom_intensities(
                    grid,
                    e,
                    (l1, column),
                    (l2, column),
                    global_intensity,
                );
                schedule.insert(e.onset, ActuatorStep::new(l1, column, i1, duration));
                schedule.insert(e.onset, ActuatorStep::new(l2, column, i2, duration));
            }
            (Some(line), None) => {
                let c1 = (e.position.x / d).floor() as u32;
                let c2 = (e.position.x / d).ceil() as u32;
                let (i1, i2) =
                    phantom_intensities(grid, e, (line, c1), (line, c2), global_intensity);
                schedule.insert(e.onset, ActuatorStep::new(line, c1, i1, duration));
                schedule.insert(e.onset, ActuatorStep::new(line, c2, i2, duration));
            }
            (None, None) => {
                log::error!("virtual point {} is not on a grid line", e.position);
                return Err(BrushError::InternalConsistency(e.position));
            }
        }
    }

    Ok(())
}

/// Energy split between the two physical actuators bracketing `e`.
fn phantom_intensities(
    grid: &Grid,
    e: &VirtualPoint,
    first: (u32, u32),
    second: (u32, u32),
    global_intensity: f32,
) -> (f32, f32) {
    let phys1 = grid.actuator_position(first.0, first.1);
    let phys2 = grid.actuator_position(second.0, second.1);
    let ratio = (phys1.distance(&e.position) / phys1.distance(&phys2)).clamp(0.0, 1.0);

    (
        (1.0 - ratio).sqrt() * global_intensity,
        ratio.sqrt() * global_intensity,
    )
}
