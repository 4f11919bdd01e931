//! GeoJSON feature collection output

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::boundary::FinishedRing;
use crate::errors::EmitError;

use super::Emit;

/// Property keys, as DAFIF names the columns
pub const KEY_IDENT: &str = "SUAS";
pub const KEY_NAME: &str = "Name";
pub const KEY_ICAO: &str = "ICAO";
pub const KEY_CATEGORY: &str = "TYPE";

/// Collects one polygon feature per ring; written once at the end.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonEmitter {
    features: Vec<Feature>,
}

impl GeoJsonEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn collection(self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }
}

/// Single-ring polygon feature with flat string properties.
pub fn ring_feature(ring: &FinishedRing) -> Feature {
    let props = &ring.properties;
    let properties: Map<String, JsonValue> = [
        (KEY_IDENT, &props.ident),
        (KEY_NAME, &props.name),
        (KEY_ICAO, &props.icao),
        (KEY_CATEGORY, &props.category),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), JsonValue::from(v.as_str())))
    .collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring.ring.to_positions()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl Emit for GeoJsonEmitter {
    fn emit(&mut self, ring: &FinishedRing) {
        self.features.push(ring_feature(ring));
    }

    fn count(&self) -> usize {
        self.features.len()
    }

    fn finish(self) -> Result<String, EmitError> {
        Ok(self.collection().to_string())
    }
}
