// Timing model: arrival times and the SOA recurrence over the virtual points
use std::ops::{Add, Sub};

use crate::constants::{EPSILON, SOA_DURATION_SLOPE, SOA_INTERCEPT_MS, SOA_NORMALIZER};
use crate::error::BrushError;
use crate::types::{Point, VirtualPoint};

/// Compute timing for the ordered `points` of a stroke lasting `duration` ms.
///
/// The first point must be the stroke start and the last one its end.
/// Fails with [`BrushError::InvalidTiming`] when the duration is too short for
/// the number of points, instead of returning negative activation times.
pub fn compute_timings(points: &[Point], duration: f32) -> Result<Vec<VirtualPoint>, BrushError> {
    let mut virtual_points: Vec<VirtualPoint> =
        points.iter().copied().map(VirtualPoint::from).collect();
    if virtual_points.len() < 2 {
        return Ok(virtual_points);
    }

    compute_max_intensity_timers(&mut virtual_points, duration);
    compute_durations_and_soas(&mut virtual_points, duration);

    for (index, p) in virtual_points.iter_mut().enumerate() {
        let shortest = p.duration_before.min(p.duration_after);
        if shortest < -EPSILON {
            return Err(BrushError::InvalidTiming {
                index,
                duration_ms: shortest,
                minimum_duration_ms: minimum_duration(points).unwrap_or(f32::INFINITY),
            });
        }
        // Float noise around zero
        p.duration_before = p.duration_before.max(0.0);
        p.duration_after = p.duration_after.max(0.0);
    }

    Ok(virtual_points)
}

/// Time of maximum intensity for each point, assuming constant speed.
fn compute_max_intensity_timers(points: &mut [VirtualPoint], duration: f32) {
    let begin = points[0].position;
    let end = points[points.len() - 1].position;
    let speed = begin.distance(&end) / duration;

    points[0].timer_max_intensity = 0.0;
    for p in points.iter_mut().skip(1) {
        p.timer_max_intensity = begin.distance(&p.position) / speed;
    }
}

/// Onsets (accumulated SOA) and the ramp durations around each peak.
fn compute_durations_and_soas(points: &mut [VirtualPoint], duration: f32) {
    let mut sum_soa = 0.0_f32;
    points[0].onset = 0.0;
    // First actuator is not triggered before its own peak
    points[0].duration_before = 0.0;

    for i in 0..points.len() - 1 {
        let current_before = points[i].duration_before;
        let next_timer = points[i + 1].timer_max_intensity;

        sum_soa += soa_increment(current_before, sum_soa, next_timer);

        let ramp = next_timer - sum_soa;
        points[i].duration_after = ramp;
        points[i + 1].onset = sum_soa;
        points[i + 1].duration_before = ramp;
    }

    // Last actuator runs until the requested end of the stroke
    let last = points.len() - 1;
    points[last].duration_before = duration - sum_soa;
    points[last].duration_after = 0.0;
}

fn soa_increment(current_before: f32, sum_soa: f32, next_timer: f32) -> f32 {
    (SOA_DURATION_SLOPE * (current_before - sum_soa + next_timer) + SOA_INTERCEPT_MS)
        / SOA_NORMALIZER
}

/// `slope * duration + offset`
#[derive(Clone, Copy, Debug, Default)]
struct Affine {
    slope: f64,
    offset: f64,
}

impl Add for Affine {
    type Output = Affine;

    fn add(self, other: Affine) -> Affine {
        Affine {
            slope: self.slope + other.slope,
            offset: self.offset + other.offset,
        }
    }
}

impl Sub for Affine {
    type Output = Affine;

    fn sub(self, other: Affine) -> Affine {
        Affine {
            slope: self.slope - other.slope,
            offset: self.offset - other.offset,
        }
    }
}

/// Shortest stroke duration, in ms, for which no point of `points` gets a
/// negative activation time. `None` if no duration works.
///
/// Arrival times are `f_i * D` where `f_i` is the fraction of the stroke
/// covered at point `i`, so every onset and ramp of the recurrence is affine
/// in the duration `D`. Each ramp must satisfy `slope * D + offset >= 0`.
pub fn minimum_duration(points: &[Point]) -> Option<f32> {
    if points.len() < 2 {
        return Some(0.0);
    }
    let begin = points[0];
    let length = begin.distance(&points[points.len() - 1]) as f64;
    if length <= 0.0 {
        return None;
    }

    let slope = SOA_DURATION_SLOPE as f64;
    let intercept = SOA_INTERCEPT_MS as f64;
    let normalizer = SOA_NORMALIZER as f64;

    let mut lower = 0.0_f64;
    let mut upper = f64::INFINITY;
    let mut sum_soa = Affine::default();
    let mut before = Affine::default();

    for (i, p) in points.iter().enumerate().skip(1) {
        let fraction = if i == points.len() - 1 {
            1.0
        } else {
            begin.distance(p) as f64 / length
        };
        let timer = Affine {
            slope: fraction,
            offset: 0.0,
        };

        let lhs = before - sum_soa + timer;
        let increment = Affine {
            slope: slope * lhs.slope / normalizer,
            offset: (slope * lhs.offset + intercept) / normalizer,
        };
        sum_soa = sum_soa + increment;
        before = timer - sum_soa;

        if before.slope > f64::EPSILON {
            lower = lower.max(-before.offset / before.slope);
        } else if before.slope < -f64::EPSILON {
            upper = upper.min(-before.offset / before.slope);
        } else if before.offset < 0.0 {
            return None;
        }
    }

    if lower <= upper {
        Some(lower as f32)
    } else {
        None
    }
}
