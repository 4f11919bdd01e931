//! Shape segments: the boundary points one record contributes.
//!
//! Each record is turned into a [`Segment`] purely from its own fields; the
//! segment is then merged into the group's rings by [`apply`], which is where
//! bounding-box validity and duplicate suppression happen.

use crate::record::{ShapeCode, VertexRecord};
use crate::types::{BoundingBox, LonLat, NauticalMiles};

use super::defaults::{
    CIRCLE_SAMPLES, LITERAL_DECIMALS, SAMPLE_LAT_DECIMALS, SAMPLE_LON_DECIMALS,
    SAMPLE_STEP_DEG, SWEEP_EPSILON_DEG,
};
use super::geodesy::{bearing, project};
use super::ring::{CircleSpec, RingBuilder};

/// Points contributed by one record
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A closed sampled circle, and optionally a second concentric one
    Circle {
        outer: (CircleSpec, Vec<LonLat>),
        inner: Option<(CircleSpec, Vec<LonLat>)>,
    },
    /// Points appended to the current ring in order
    Path(Vec<LonLat>),
}

/// A projected sample, rounded the way sampled output is rounded.
fn sample(center: LonLat, radius: NauticalMiles, theta: f64) -> LonLat {
    project(center, radius, theta).quantize(SAMPLE_LON_DECIMALS, SAMPLE_LAT_DECIMALS)
}

/// A point copied from the record, rounded the way literal output is rounded.
fn literal(p: LonLat) -> LonLat {
    p.quantize(LITERAL_DECIMALS, LITERAL_DECIMALS)
}

/// Sample a full circle, closed by repeating its first point.
pub fn circle_points(center: LonLat, radius: NauticalMiles) -> Vec<LonLat> {
    let mut points: Vec<LonLat> = (0..CIRCLE_SAMPLES)
        .map(|i| sample(center, radius, SAMPLE_STEP_DEG * i as f64))
        .collect();
    points.push(points[0]);
    points
}

/// Signed sweep from `start` to `end` bearing in the arc's direction.
pub fn arc_sweep(start: f64, end: f64, direction: f64) -> f64 {
    let sweep = end - start;
    if sweep * direction < 0.0 {
        sweep + direction * 360.0
    } else {
        sweep
    }
}

/// Sampled points along a sweep: `ceil(|sweep| / 10°)`, less a small
/// tolerance. A sweep past a multiple of 10° by under that tolerance loses
/// its last sample.
pub fn arc_steps(sweep: f64) -> usize {
    ((sweep.abs() - SWEEP_EPSILON_DEG) / SAMPLE_STEP_DEG).ceil().max(0.0) as usize
}

/// Sample an arc from `start` to `end` around `center`, then finish on the
/// literal `end` so the next segment joins exactly.
pub fn arc_points(
    center: LonLat,
    radius: NauticalMiles,
    start: LonLat,
    end: LonLat,
    direction: f64,
) -> Vec<LonLat> {
    let theta1 = bearing(center, start);
    let theta2 = bearing(center, end);
    let sweep = arc_sweep(theta1, theta2, direction);
    let mut points: Vec<LonLat> = (0..arc_steps(sweep))
        .map(|i| sample(center, radius, theta1 + direction * SAMPLE_STEP_DEG * i as f64))
        .collect();
    points.push(literal(end));
    points
}

/// Build the segment for one record.
pub fn build(record: &VertexRecord) -> Segment {
    match record.shape {
        ShapeCode::Circle | ShapeCode::AreaCircle => {
            let outer = CircleSpec {
                center: record.center,
                radius: record.radius,
            };
            let inner = record.radius2.map(|radius| CircleSpec {
                center: record.center,
                radius,
            });
            Segment::Circle {
                outer: (outer, circle_points(outer.center, outer.radius)),
                inner: inner.map(|spec| (spec, circle_points(spec.center, spec.radius))),
            }
        }
        ShapeCode::ClockwiseArc | ShapeCode::CounterClockwiseArc => {
            let direction = record.shape.sweep_direction().unwrap_or(1.0);
            Segment::Path(arc_points(
                record.center,
                record.radius,
                record.point1,
                record.point2,
                direction,
            ))
        }
        ShapeCode::Default => Segment::Path(vec![literal(record.point1), literal(record.point2)]),
    }
}

/// Merge one record's segment into the group's rings.
///
/// A second concentric circle goes into `inner`, which is created on demand
/// and never merged with `outer`.
pub fn apply(
    record: &VertexRecord,
    outer: &mut RingBuilder,
    inner: &mut Option<RingBuilder>,
    bounds: &BoundingBox,
) {
    match build(record) {
        Segment::Circle {
            outer: (spec, points),
            inner: second,
        } => {
            outer.extend_circle(spec, points, bounds);
            if let Some((spec, points)) = second {
                inner
                    .get_or_insert_with(RingBuilder::new)
                    .extend_circle(spec, points, bounds);
            }
        }
        Segment::Path(points) => outer.extend_path(points, bounds),
    }
}
