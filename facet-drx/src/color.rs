//! Pen and font colors.

use facet::Facet;
use facet_xml as xml;

/// A color element (`<Color red="255" green="0" blue="0" type="fore"/>`)
///
/// `type` is `fore` for the outline/text color and `back` for the fill or
/// label background.
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct Color {
    #[facet(xml::attribute)]
    pub red: Option<String>,
    #[facet(xml::attribute)]
    pub green: Option<String>,
    #[facet(xml::attribute)]
    pub blue: Option<String>,
    #[facet(xml::attribute, rename = "type")]
    pub type_: Option<String>,
}

impl Color {
    pub fn new(kind: &str, r: u8, g: u8, b: u8) -> Self {
        Self {
            red: Some(r.to_string()),
            green: Some(g.to_string()),
            blue: Some(b.to_string()),
            type_: Some(kind.to_string()),
        }
    }

    pub fn fore(r: u8, g: u8, b: u8) -> Self {
        Self::new("fore", r, g, b)
    }

    pub fn back(r: u8, g: u8, b: u8) -> Self {
        Self::new("back", r, g, b)
    }

    /// The channels as numbers, if all three are present and in range.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let channel = |c: &Option<String>| c.as_deref().and_then(|s| s.trim().parse::<u8>().ok());
        Some((channel(&self.red)?, channel(&self.green)?, channel(&self.blue)?))
    }
}
