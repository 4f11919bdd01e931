//! Input records: one row of the SUAS extract per boundary vertex.

use crate::types::{LonLat, NauticalMiles};

/// How a record contributes to its boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeCode {
    /// `C`: full circle around the center
    Circle,
    /// `A`: circle defining an area (built the same way as `Circle`)
    AreaCircle,
    /// `R`: arc swept clockwise from point 1 to point 2
    ClockwiseArc,
    /// `L`: arc swept counter-clockwise from point 1 to point 2
    CounterClockwiseArc,
    /// Straight edge from point 1 to point 2 (great circle, rhumb line, or
    /// any code we don't recognize)
    Default,
}

impl ShapeCode {
    /// Map a DAFIF `SHAP` code. Unknown codes are ordinary polygon vertices.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C" => ShapeCode::Circle,
            "A" => ShapeCode::AreaCircle,
            "R" => ShapeCode::ClockwiseArc,
            "L" => ShapeCode::CounterClockwiseArc,
            _ => ShapeCode::Default,
        }
    }

    pub fn is_circle(self) -> bool {
        matches!(self, ShapeCode::Circle | ShapeCode::AreaCircle)
    }

    pub fn is_arc(self) -> bool {
        matches!(self, ShapeCode::ClockwiseArc | ShapeCode::CounterClockwiseArc)
    }

    /// +1 for clockwise, -1 for counter-clockwise, `None` for non-arcs
    pub fn sweep_direction(self) -> Option<f64> {
        match self {
            ShapeCode::ClockwiseArc => Some(1.0),
            ShapeCode::CounterClockwiseArc => Some(-1.0),
            _ => None,
        }
    }
}

/// Descriptive attributes shared by every record of one boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordProperties {
    /// `SUAS_IDENT`, the grouping key
    pub ident: String,
    /// `NAME`
    pub name: String,
    /// `ICAO` region, the alternate identifier
    pub icao: String,
    /// `TYPE`, the airspace category code (R, P, W, ...)
    pub category: String,
    /// Country code from the country table (may be empty)
    pub country: String,
}

/// One boundary vertex.
///
/// Only the numeric fields the shape needs are meaningful; the others are
/// zero. The reader enforces that required fields were present.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexRecord {
    pub properties: RecordProperties,
    pub shape: ShapeCode,
    pub center: LonLat,
    pub radius: NauticalMiles,
    /// Inner radius of a double circle
    pub radius2: Option<NauticalMiles>,
    /// First adjacent boundary point (arc start, edge start)
    pub point1: LonLat,
    /// Second adjacent boundary point (arc end, edge end)
    pub point2: LonLat,
    /// 1-based line in the source text, 0 when records were built in memory
    pub line: usize,
}

impl VertexRecord {
    pub fn ident(&self) -> &str {
        &self.properties.ident
    }

    /// A straight edge from `from` to `to`.
    pub fn edge(properties: RecordProperties, from: LonLat, to: LonLat) -> Self {
        Self {
            properties,
            shape: ShapeCode::Default,
            center: LonLat::default(),
            radius: NauticalMiles::ZERO,
            radius2: None,
            point1: from,
            point2: to,
            line: 0,
        }
    }

    /// A circle, optionally with an inner concentric radius.
    pub fn circle(
        properties: RecordProperties,
        center: LonLat,
        radius: NauticalMiles,
        radius2: Option<NauticalMiles>,
    ) -> Self {
        Self {
            properties,
            shape: ShapeCode::Circle,
            center,
            radius,
            radius2,
            point1: LonLat::default(),
            point2: LonLat::default(),
            line: 0,
        }
    }

    /// An arc around `center` from `start` to `end`.
    pub fn arc(
        properties: RecordProperties,
        clockwise: bool,
        center: LonLat,
        radius: NauticalMiles,
        start: LonLat,
        end: LonLat,
    ) -> Self {
        Self {
            properties,
            shape: if clockwise {
                ShapeCode::ClockwiseArc
            } else {
                ShapeCode::CounterClockwiseArc
            },
            center,
            radius,
            radius2: None,
            point1: start,
            point2: end,
            line: 0,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}
