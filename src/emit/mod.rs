//! Output documents
//!
//! This module is organized into submodules:
//! - `defaults`: Fixed pen, font and line settings of drawing primitives
//! - `style`: Category code to pen color
//! - `geojson`: Feature collection output
//! - `drawing`: Drawing-object document output

pub mod defaults;
pub mod drawing;
pub mod geojson;
pub mod style;

use enum_dispatch::enum_dispatch;

use crate::boundary::FinishedRing;
use crate::errors::EmitError;
use crate::options::OutputFormat;

pub use drawing::DrawingEmitter;
pub use geojson::GeoJsonEmitter;
pub use style::{FillStyle, Style};

/// A sink for finished rings that produces one document at the end.
#[enum_dispatch]
pub trait Emit {
    /// Append the primitive(s) for one ring.
    fn emit(&mut self, ring: &FinishedRing);

    /// Number of primitives appended so far
    fn count(&self) -> usize;

    /// Serialize the whole document.
    fn finish(self) -> Result<String, EmitError>;
}

#[enum_dispatch(Emit)]
#[derive(Debug, Clone)]
pub enum Emitter {
    GeoJsonEmitter,
    DrawingEmitter,
}

impl Emitter {
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::GeoJson => GeoJsonEmitter::new().into(),
            OutputFormat::Drawing => DrawingEmitter::new().into(),
        }
    }

    /// Emit every ring, then serialize.
    pub fn write_all<'a, I>(mut self, rings: I) -> Result<String, EmitError>
    where
        I: IntoIterator<Item = &'a FinishedRing>,
    {
        for ring in rings {
            self.emit(ring);
        }
        crate::log::debug!(count = self.count(), "document complete");
        self.finish()
    }
}
