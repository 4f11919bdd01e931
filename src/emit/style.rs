//! Category code → drawing style

use crate::types::Rgb;

use super::defaults;

/// Fill pattern of a drawing primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    None,
    Solid,
}

impl FillStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FillStyle::None => "none",
            FillStyle::Solid => "solid",
        }
    }
}

/// Pen and fill for one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub line_width: u32,
    pub fore: Rgb,
    pub back: Rgb,
    pub fill: FillStyle,
}

/// Outline color for an airspace category.
pub fn category_color(category: &str) -> Rgb {
    match category.trim() {
        // Temporary reserved and restricted
        "T" | "R" => Rgb::RED,
        // Military operations area
        "M" => Rgb::PURPLE,
        // Alert
        "A" => Rgb::MAGENTA,
        // Warning
        "W" => Rgb::BLUE,
        _ => Rgb::BLACK,
    }
}

pub fn resolve(category: &str) -> Style {
    Style {
        line_width: defaults::LINE_WIDTH,
        fore: category_color(category),
        back: defaults::PEN_BACK,
        fill: FillStyle::None,
    }
}
