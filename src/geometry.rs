// Stroke geometry: intersect the stroke with the actuator grid lines
use crate::constants::EPSILON;
use crate::types::{Grid, Point};

/// Ordered virtual points of the segment `start -> end`.
///
/// The result holds `start`, every crossing of the segment with a grid row or
/// grid column line, and `end`, in direction of travel. Crossings closer than
/// [`EPSILON`] on both axes are merged, and crossings that coincide with an
/// endpoint are replaced by the endpoint itself, so the first and last points
/// are exactly `start` and `end`.
///
/// Both endpoints are expected to be inside the grid.
pub fn compute_virtual_points(start: Point, end: Point, grid: &Grid) -> Vec<Point> {
    let candidates = grid_line_crossings(&start, &end, grid);

    // Every accepted candidate is on the segment, so its distance from the
    // start orders it along the direction of travel.
    let mut crossings: Vec<(f32, Point)> = candidates
        .into_iter()
        .filter(|p| is_point_on_segment(p, &start, &end))
        .map(|p| (start.distance(&p), p))
        .collect();
    crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut points = Vec::with_capacity(crossings.len() + 2);
    points.push(start);
    for (_, p) in crossings {
        let last = points[points.len() - 1];
        if p.approx_eq(&last) || p.approx_eq(&end) {
            continue;
        }
        points.push(p);
    }
    points.push(end);

    points
}

/// Intersections of the infinite line through `start` and `end` with every
/// grid row and column. Points may fall outside the segment.
fn grid_line_crossings(start: &Point, end: &Point, grid: &Grid) -> Vec<Point> {
    let d = grid.inter_dist();
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let mut candidates = Vec::with_capacity((grid.lines() + grid.columns()) as usize);

    if dx.abs() < EPSILON {
        // Vertical segment: no slope, only rows can be crossed
        candidates.extend((0..grid.lines()).map(|l| Point::new(start.x, l as f32 * d)));
    } else if dy.abs() < EPSILON {
        // Horizontal segment: only columns can be crossed
        candidates.extend((0..grid.columns()).map(|c| Point::new(c as f32 * d, start.y)));
    } else {
        let coef = dy / dx;
        let orig = start.y - coef * start.x;

        for l in 0..grid.lines() {
            let y = l as f32 * d;
            candidates.push(Point::new((y - orig) / coef, y));
        }
        for c in 0..grid.columns() {
            let x = c as f32 * d;
            candidates.push(Point::new(x, coef * x + orig));
        }
    }

    candidates
}

/// True when `point` lies on the segment `[start, end]`.
///
/// On the segment the two partial distances add up to the full length;
/// anywhere else the three points form a triangle and the sum is longer.
pub fn is_point_on_segment(point: &Point, start: &Point, end: &Point) -> bool {
    let seg_dist = start.distance(end);
    let start_to_point = start.distance(point);
    let point_to_end = point.distance(end);
    start_to_point + point_to_end - seg_dist < EPSILON
}
