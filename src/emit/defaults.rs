//! Drawing-document defaults

use crate::types::Rgb;

pub const LINE_WIDTH: u32 = 4;
pub const LINE_STYLE: &str = "solid";
pub const LINE_TYPE: &str = "rhumb";
pub const ROTATION: &str = "0";
/// Back pen color, only visible when the fill style isn't `none`
pub const PEN_BACK: Rgb = Rgb::RED;
pub const LABEL_FORE: Rgb = Rgb::BLACK;
pub const LABEL_BACK: Rgb = Rgb::WHITE;
pub const FONT_NAME: &str = "Arial";
pub const FONT_SIZE: &str = "12";
pub const FONT_BACKTYPE: &str = "none";
pub const EMBED_POSITION: &str = "center";
