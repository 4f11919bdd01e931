//! Read DAFIF tab-delimited tables into typed records

use std::collections::HashMap;

use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;

use crate::errors::{ParseError, SourceContext};
use crate::options::CountryFilter;
use crate::record::{RecordProperties, ShapeCode, VertexRecord};
use crate::types::{LonLat, NauticalMiles, finite};
use crate::{DafifParser, Rule};

pub const SUAS_IDENT: &str = "SUAS_IDENT";
pub const SHAP: &str = "SHAP";
pub const WGS_DLAT0: &str = "WGS_DLAT0";
pub const WGS_DLONG0: &str = "WGS_DLONG0";
pub const RADIUS1: &str = "RADIUS1";
pub const RADIUS2: &str = "RADIUS2";
pub const WGS_DLAT1: &str = "WGS_DLAT1";
pub const WGS_DLONG1: &str = "WGS_DLONG1";
pub const WGS_DLAT2: &str = "WGS_DLAT2";
pub const WGS_DLONG2: &str = "WGS_DLONG2";
pub const TYPE: &str = "TYPE";
pub const NAME: &str = "NAME";
pub const ICAO: &str = "ICAO";
pub const CTRY_1: &str = "CTRY_1";

/// One cell, with its byte range in the source
#[derive(Debug, Clone, Copy, Default)]
struct Field<'s> {
    text: &'s str,
    start: usize,
    end: usize,
}

impl<'s> Field<'s> {
    /// Trimmed cell text, borrowed from the source rather than the cell
    fn value(&self) -> &'s str {
        self.text.trim()
    }

    fn is_blank(&self) -> bool {
        self.value().is_empty()
    }

    fn span(&self) -> SourceSpan {
        (self.start, self.end - self.start).into()
    }
}

#[derive(Debug, Clone, Default)]
struct Row<'s> {
    /// 1-based source line
    line: usize,
    start: usize,
    end: usize,
    fields: Vec<Field<'s>>,
}

impl<'s> Row<'s> {
    fn from_pair(pair: Pair<'s, Rule>) -> Self {
        let (line, _) = pair.line_col();
        let span = pair.as_span();
        let fields = pair
            .into_inner()
            .map(|f| {
                let s = f.as_span();
                Field {
                    text: f.as_str(),
                    start: s.start(),
                    end: s.end(),
                }
            })
            .collect();
        Self {
            line,
            start: span.start(),
            end: span.end(),
            fields,
        }
    }

    /// A short row reads as blank trailing fields.
    fn field(&self, index: usize) -> Field<'s> {
        self.fields.get(index).copied().unwrap_or(Field {
            text: "",
            start: self.end,
            end: self.end,
        })
    }

    fn is_blank(&self) -> bool {
        self.fields.iter().all(Field::is_blank)
    }

    fn span(&self) -> SourceSpan {
        (self.start, self.end - self.start).into()
    }
}

/// Header row plus the non-blank data rows
#[derive(Debug)]
struct Table<'s> {
    header: Row<'s>,
    rows: Vec<Row<'s>>,
}

impl<'s> Table<'s> {
    fn read(src: &'s SourceContext) -> Result<Self, ParseError> {
        let pairs = DafifParser::parse(Rule::table, &src.source).map_err(|e| syntax_error(src, &e))?;
        let mut rows = pairs
            .flatten()
            .filter(|p| p.as_rule() == Rule::record)
            .map(Row::from_pair);
        let header = rows.next().unwrap_or_default();
        let rows = rows.filter(|r| !r.is_blank()).collect();
        Ok(Self { header, rows })
    }

    fn column(&self, src: &SourceContext, name: &'static str) -> Result<usize, ParseError> {
        self.header
            .fields
            .iter()
            .position(|f| f.value() == name)
            .ok_or_else(|| ParseError::MissingColumn {
                column: name,
                src: src.named_source(),
                span: self.header.span(),
            })
    }
}

fn syntax_error(src: &SourceContext, e: &pest::error::Error<Rule>) -> ParseError {
    let span = match e.location {
        pest::error::InputLocation::Pos(p) => (p, 0),
        pest::error::InputLocation::Span((s, e)) => (s, e - s),
    };
    ParseError::Syntax {
        message: e.variant.message().to_string(),
        src: src.named_source(),
        span: span.into(),
    }
}

/// `SUAS_IDENT` → country code, from `SUAS_CTRY.TXT`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryTable {
    countries: HashMap<String, String>,
}

impl CountryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same identifier replace earlier ones.
    pub fn insert(&mut self, ident: impl Into<String>, country: impl Into<String>) {
        self.countries.insert(ident.into(), country.into());
    }

    /// Country code of `ident`, empty when unknown
    pub fn country(&self, ident: &str) -> &str {
        self.countries.get(ident).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CountryTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// Read the country table (`SUAS_IDENT`, `CTRY_1`).
pub fn parse_countries(src: &SourceContext) -> Result<CountryTable, ParseError> {
    let table = Table::read(src)?;
    let ident = table.column(src, SUAS_IDENT)?;
    let country = table.column(src, CTRY_1)?;
    let countries: CountryTable = table
        .rows
        .iter()
        .map(|row| (row.field(ident).value(), row.field(country).value()))
        .collect();
    crate::log::debug!(source = %src.name, count = countries.len(), "country table read");
    Ok(countries)
}

/// Column positions of the SUAS table
struct SuasColumns {
    ident: usize,
    shape: usize,
    lat0: usize,
    lon0: usize,
    radius1: usize,
    radius2: usize,
    lat1: usize,
    lon1: usize,
    lat2: usize,
    lon2: usize,
    category: usize,
    name: usize,
    icao: usize,
}

impl SuasColumns {
    fn locate(table: &Table<'_>, src: &SourceContext) -> Result<Self, ParseError> {
        Ok(Self {
            ident: table.column(src, SUAS_IDENT)?,
            shape: table.column(src, SHAP)?,
            lat0: table.column(src, WGS_DLAT0)?,
            lon0: table.column(src, WGS_DLONG0)?,
            radius1: table.column(src, RADIUS1)?,
            radius2: table.column(src, RADIUS2)?,
            lat1: table.column(src, WGS_DLAT1)?,
            lon1: table.column(src, WGS_DLONG1)?,
            lat2: table.column(src, WGS_DLAT2)?,
            lon2: table.column(src, WGS_DLONG2)?,
            category: table.column(src, TYPE)?,
            name: table.column(src, NAME)?,
            icao: table.column(src, ICAO)?,
        })
    }
}

/// Typed access to one row's fields, reporting failures against the row
struct RowReader<'a, 's> {
    src: &'a SourceContext,
    row: &'a Row<'s>,
    ident: &'a str,
}

impl RowReader<'_, '_> {
    fn optional(&self, index: usize, field: &'static str) -> Result<Option<f64>, ParseError> {
        let cell = self.row.field(index);
        if cell.is_blank() {
            return Ok(None);
        }
        let invalid = |reason: String| ParseError::InvalidNumber {
            ident: self.ident.to_string(),
            field,
            value: cell.value().to_string(),
            src: self.src.named_source(),
            span: cell.span(),
            reason,
        };
        let value = cell
            .value()
            .parse::<f64>()
            .map_err(|_| invalid("not a number".to_string()))?;
        finite(value).map(Some).map_err(|e| invalid(e.to_string()))
    }

    fn required(&self, index: usize, field: &'static str) -> Result<f64, ParseError> {
        self.optional(index, field)?
            .ok_or_else(|| ParseError::MissingField {
                ident: self.ident.to_string(),
                field,
                src: self.src.named_source(),
                span: self.row.span(),
            })
    }

    fn point(
        &self,
        (lat, lat_name): (usize, &'static str),
        (lon, lon_name): (usize, &'static str),
    ) -> Result<LonLat, ParseError> {
        let lat = self.required(lat, lat_name)?;
        let lon = self.required(lon, lon_name)?;
        Ok(LonLat::new(lon, lat))
    }

    fn radius(&self, value: f64, index: usize, field: &'static str) -> Result<NauticalMiles, ParseError> {
        NauticalMiles::try_new(value).map_err(|e| {
            let cell = self.row.field(index);
            ParseError::InvalidNumber {
                ident: self.ident.to_string(),
                field,
                value: cell.value().to_string(),
                src: self.src.named_source(),
                span: cell.span(),
                reason: e.to_string(),
            }
        })
    }
}

fn read_record(
    src: &SourceContext,
    cols: &SuasColumns,
    row: &Row<'_>,
    properties: RecordProperties,
) -> Result<VertexRecord, ParseError> {
    let shape = ShapeCode::from_code(row.field(cols.shape).value());
    let reader = RowReader {
        src,
        row,
        ident: &properties.ident,
    };
    let lat0 = (cols.lat0, WGS_DLAT0);
    let lon0 = (cols.lon0, WGS_DLONG0);
    let p1 = ((cols.lat1, WGS_DLAT1), (cols.lon1, WGS_DLONG1));
    let p2 = ((cols.lat2, WGS_DLAT2), (cols.lon2, WGS_DLONG2));

    // Fields the shape doesn't use stay zero.
    let mut record = VertexRecord::edge(RecordProperties::default(), LonLat::default(), LonLat::default());
    record.shape = shape;
    record.line = row.line;

    if shape.is_circle() {
        record.center = reader.point(lat0, lon0)?;
        let r1 = reader.required(cols.radius1, RADIUS1)?;
        record.radius = reader.radius(r1, cols.radius1, RADIUS1)?;
        record.radius2 = reader
            .optional(cols.radius2, RADIUS2)?
            .map(|r2| reader.radius(r2, cols.radius2, RADIUS2))
            .transpose()?;
    } else {
        if shape.is_arc() {
            record.center = reader.point(lat0, lon0)?;
            let r1 = reader.required(cols.radius1, RADIUS1)?;
            record.radius = reader.radius(r1, cols.radius1, RADIUS1)?;
        }
        record.point1 = reader.point(p1.0, p1.1)?;
        record.point2 = reader.point(p2.0, p2.1)?;
    }
    record.properties = properties;
    Ok(record)
}

/// Read `SUAS.TXT`, keeping every row.
pub fn parse_suas(src: &SourceContext, countries: &CountryTable) -> Result<Vec<VertexRecord>, ParseError> {
    parse_suas_filtered(src, countries, &CountryFilter::all())
}

/// Read `SUAS.TXT`, skipping rows whose country the filter rejects.
///
/// Rejected rows are skipped before their numeric fields are looked at.
pub fn parse_suas_filtered(
    src: &SourceContext,
    countries: &CountryTable,
    filter: &CountryFilter,
) -> Result<Vec<VertexRecord>, ParseError> {
    let table = Table::read(src)?;
    let cols = SuasColumns::locate(&table, src)?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let ident_cell = row.field(cols.ident);
        if ident_cell.is_blank() {
            return Err(ParseError::MissingField {
                ident: format!("line {}", row.line),
                field: SUAS_IDENT,
                src: src.named_source(),
                span: row.span(),
            });
        }
        let ident = ident_cell.value();
        let country = countries.country(ident);
        if !filter.accepts(country) {
            continue;
        }
        let properties = RecordProperties {
            ident: ident.to_string(),
            name: row.field(cols.name).value().to_string(),
            icao: row.field(cols.icao).value().to_string(),
            category: row.field(cols.category).value().to_string(),
            country: country.to_string(),
        };
        records.push(read_record(src, &cols, row, properties)?);
    }

    crate::log::debug!(
        source = %src.name,
        records = records.len(),
        skipped = table.rows.len() - records.len(),
        "vertex records read"
    );
    Ok(records)
}
