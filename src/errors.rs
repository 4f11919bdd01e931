//! Error types with rich diagnostics using miette
//!
//! Parse errors carry source spans so a malformed DAFIF row is reported with
//! the offending field highlighted.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading a tab-delimited extract
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed tab-delimited text: {message}")]
    #[diagnostic(code(suasgeo::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("missing column: {column}")]
    #[diagnostic(
        code(suasgeo::parse::missing_column),
        help("the first row must name every column, separated by tabs")
    )]
    MissingColumn {
        column: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("header row")]
        span: SourceSpan,
    },

    #[error("{ident}: required field {field} is blank")]
    #[diagnostic(code(suasgeo::parse::missing_field))]
    MissingField {
        ident: String,
        field: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("in this record")]
        span: SourceSpan,
    },

    #[error("{ident}: invalid number in {field}: {value:?}")]
    #[diagnostic(code(suasgeo::parse::invalid_number))]
    InvalidNumber {
        ident: String,
        field: &'static str,
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },
}

// ============================================================================
// Assembly Errors
// ============================================================================

/// Errors that occur while grouping records into rings
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum AssembleError {
    #[error("identifier {ident} reappears on line {line} after its boundary was closed")]
    #[diagnostic(
        code(suasgeo::assemble::out_of_order),
        help("all rows of one boundary must be contiguous; first seen on line {first_line}")
    )]
    OutOfOrderIdentifier {
        ident: String,
        line: usize,
        first_line: usize,
    },
}

// ============================================================================
// Emit Errors
// ============================================================================

/// Errors that occur while serializing the output document
#[derive(Error, Diagnostic, Debug)]
pub enum EmitError {
    #[error("XML serialization error: {message}")]
    #[diagnostic(code(suasgeo::emit::xml))]
    Xml { message: String },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors in caller-supplied filter parameters
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid {name} corner")]
    #[diagnostic(code(suasgeo::config::invalid_corner))]
    InvalidCorner {
        name: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("latitudes must be within ±90 (north {north}, south {south})")]
    #[diagnostic(code(suasgeo::config::latitude_range))]
    LatitudeOutOfRange { north: f64, south: f64 },

    #[error("longitudes must be within ±180 (west {west}, east {east})")]
    #[diagnostic(code(suasgeo::config::longitude_range))]
    LongitudeOutOfRange { west: f64, east: f64 },

    #[error("bounding box is inverted: N {north} W {west} S {south} E {east}")]
    #[diagnostic(
        code(suasgeo::config::inverted_bounds),
        help("give the north-west corner first, then the south-east corner")
    )]
    InvertedBounds {
        north: f64,
        west: f64,
        south: f64,
        east: f64,
    },

    #[error("expected four numbers \"N W S E\", got {input:?}")]
    #[diagnostic(code(suasgeo::config::malformed_bounds), help("e.g. \"50 -131 23 -66\""))]
    MalformedBounds { input: String },
}
