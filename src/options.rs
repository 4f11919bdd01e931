//! Caller-supplied conversion settings

use std::collections::BTreeSet;
use std::path::Path;

use crate::types::BoundingBox;

/// Which document a conversion produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// GeoJSON feature collection
    #[default]
    GeoJson,
    /// FalconView/JMPS drawing-object document
    Drawing,
}

impl OutputFormat {
    /// Pick a format from a destination file name: `.drx` and `.xml` are
    /// drawing documents, anything else is GeoJSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("drx" | "xml") => OutputFormat::Drawing,
            _ => OutputFormat::GeoJson,
        }
    }
}

/// Allow-list of two-letter country codes. Empty accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryFilter {
    codes: BTreeSet<String>,
}

impl CountryFilter {
    /// Accepts every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whitespace-separated codes; only the first two characters of each
    /// count, compared upper-cased.
    pub fn parse(input: &str) -> Self {
        Self {
            codes: input.split_whitespace().map(prefix).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn accepts(&self, country: &str) -> bool {
        self.is_empty() || self.codes.contains(&prefix(country))
    }
}

impl<S: AsRef<str>> FromIterator<S> for CountryFilter {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().map(|s| prefix(s.as_ref())).collect(),
        }
    }
}

fn prefix(code: &str) -> String {
    code.trim().chars().take(2).collect::<String>().to_uppercase()
}

/// Everything a conversion needs besides its input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    pub countries: CountryFilter,
    pub bounds: BoundingBox,
}

impl ConvertOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_countries(mut self, countries: CountryFilter) -> Self {
        self.countries = countries;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }
}
