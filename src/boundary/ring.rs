//! Ring accumulation, closure and the finished ring handed to the emitters

use std::collections::HashSet;

use crate::record::RecordProperties;
use crate::types::{BoundingBox, LonLat, NauticalMiles};

use super::defaults::MIN_DISTINCT_POINTS;

/// A ring under construction, plus its bounding-box validity flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingBuilder {
    points: Vec<LonLat>,
    valid: bool,
    /// Set while the ring is exactly one sampled circle
    circle: Option<CircleSpec>,
}

/// Center and radius of a ring that came from a single circle record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    pub center: LonLat,
    pub radius: NauticalMiles,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[LonLat] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn circle(&self) -> Option<CircleSpec> {
        self.circle
    }

    /// Append one point.
    ///
    /// The point always counts towards validity, but an immediate repeat of
    /// the previous point (the join between two consecutive segments) is not
    /// stored twice.
    pub fn push(&mut self, point: LonLat, bounds: &BoundingBox) {
        self.valid |= bounds.contains(point);
        if self.points.last() == Some(&point) {
            return;
        }
        self.points.push(point);
    }

    /// Append a path segment. The ring stops being a plain circle.
    pub fn extend_path(&mut self, points: impl IntoIterator<Item = LonLat>, bounds: &BoundingBox) {
        self.circle = None;
        for p in points {
            self.push(p, bounds);
        }
    }

    /// Append a sampled circle. The ring keeps the circle's center and
    /// radius only if the circle is all it contains.
    pub fn extend_circle(
        &mut self,
        spec: CircleSpec,
        points: impl IntoIterator<Item = LonLat>,
        bounds: &BoundingBox,
    ) {
        self.circle = if self.points.is_empty() { Some(spec) } else { None };
        for p in points {
            self.push(p, bounds);
        }
    }

    pub fn distinct_points(&self) -> usize {
        self.points
            .iter()
            .map(|p| ((p.lon() + 0.0).to_bits(), (p.lat() + 0.0).to_bits()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Close the ring, or give it back unchanged if it has too few distinct
    /// points to enclose an area.
    pub fn close(self) -> Result<ClosedRing, RingBuilder> {
        if self.distinct_points() < MIN_DISTINCT_POINTS {
            return Err(self);
        }
        let mut points = self.points;
        if points.first() != points.last() {
            points.push(points[0]);
        }
        Ok(ClosedRing {
            ring: BoundaryRing { points },
            valid: self.valid,
            circle: self.circle,
        })
    }
}

/// A ring that passed the vertex threshold; `valid` decides emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedRing {
    pub ring: BoundaryRing,
    pub valid: bool,
    pub circle: Option<CircleSpec>,
}

/// Closed boundary: first point == last point, at least four points.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRing {
    points: Vec<LonLat>,
}

impl BoundaryRing {
    /// All points including the closing repeat of the first
    pub fn points(&self) -> &[LonLat] {
        &self.points
    }

    /// Points without the closing repeat
    pub fn open_points(&self) -> &[LonLat] {
        &self.points[..self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[[lon, lat], ...]` positions for a GeoJSON linear ring
    pub fn to_positions(&self) -> Vec<Vec<f64>> {
        self.points.iter().map(|p| p.to_position()).collect()
    }
}

/// How a ring should be drawn as a drawing-document primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingPrimitive {
    /// Only center and radius are recorded
    Ellipse(CircleSpec),
    /// Every vertex is recorded
    Polygon,
}

/// A closed, in-bounds ring ready for emission
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRing {
    pub properties: RecordProperties,
    pub ring: BoundaryRing,
    pub primitive: RingPrimitive,
}

impl FinishedRing {
    pub fn new(properties: RecordProperties, closed: ClosedRing) -> Self {
        let primitive = closed
            .circle
            .map_or(RingPrimitive::Polygon, RingPrimitive::Ellipse);
        Self {
            properties,
            ring: closed.ring,
            primitive,
        }
    }

    pub fn ident(&self) -> &str {
        &self.properties.ident
    }
}
