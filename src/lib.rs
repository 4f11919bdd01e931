//! Convert DAFIF Special Use Airspace boundaries into GeoJSON or
//! FalconView/JMPS drawing documents.

use pest_derive::Parser;

pub mod boundary;
pub mod emit;
pub mod errors;
pub mod log;
pub mod options;
pub mod parse;
pub mod record;
pub mod types;

pub use boundary::{FinishedRing, assemble};
pub use emit::{Emit, Emitter};
pub use errors::{AssembleError, ConfigError, EmitError, ParseError, SourceContext};
pub use options::{ConvertOptions, CountryFilter, OutputFormat};
pub use parse::{CountryTable, parse_countries, parse_suas, parse_suas_filtered};
pub use record::{RecordProperties, ShapeCode, VertexRecord};
pub use types::{BoundingBox, LonLat, NauticalMiles};

#[derive(Parser)]
#[grammar = "dafif.pest"]
pub struct DafifParser;

/// Convert a `SUAS.TXT` / `SUAS_CTRY.TXT` pair into an output document.
///
/// Returns the document text on success, or an error with diagnostics.
pub fn convert(
    suas: &SourceContext,
    countries: &SourceContext,
    options: &ConvertOptions,
) -> Result<String, miette::Report> {
    let table = parse_countries(countries)?;
    let records = parse_suas_filtered(suas, &table, &options.countries)?;
    convert_records(records, options)
}

/// Convert records that are already typed. They must be grouped by
/// identifier; the country filter is applied to each record's country.
pub fn convert_records<I>(records: I, options: &ConvertOptions) -> Result<String, miette::Report>
where
    I: IntoIterator<Item = VertexRecord>,
{
    let records = records
        .into_iter()
        .filter(|r| options.countries.accepts(&r.properties.country));
    let rings = assemble(records, &options.bounds)?;
    crate::log::debug!(rings = rings.len(), format = ?options.format, "boundaries assembled");
    let text = Emitter::for_format(options.format).write_all(&rings)?;
    Ok(text)
}
