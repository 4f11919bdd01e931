//! Facet-derived types for FalconView/JMPS drawing-object documents.
//!
//! A drawing-object document (`*.drx`) is a flat list of `Object` elements
//! under an `Objects` root. Each object carries a `Detail` block (comment,
//! status, tooltip) and exactly one primitive: an `Ellipse` or a `Line`
//! (optionally closed into a polygon).
//!
//! # Example
//!
//! ```rust
//! use facet_drx::{Objects, Object, ObjectNode, Detail};
//!
//! let mut doc = Objects::new();
//! doc.push(Object::new(0, vec![ObjectNode::Detail(Detail::with_tooltip("R-2508"))]));
//! assert_eq!(doc.next.as_deref(), Some("1"));
//! ```

use facet::Facet;
use facet_xml as xml;

mod color;

pub use color::Color;

/// Drawing-object namespace URI
pub const DRX_NS: &str = "urn:JMPS/JMPS";

/// Root element (`<Objects>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(rename = "Objects")]
pub struct Objects {
    #[facet(xml::attribute)]
    pub xmlns: Option<String>,
    /// Index the next appended object will receive
    #[facet(xml::attribute, rename = "Next")]
    pub next: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<DrawingNode>,
}

impl Objects {
    /// Empty document with the namespace set and no objects yet.
    pub fn new() -> Self {
        Self {
            xmlns: Some(DRX_NS.to_string()),
            next: None,
            children: Vec::new(),
        }
    }

    /// Index that the next appended object should carry.
    pub fn next_index(&self) -> u32 {
        self.next
            .as_deref()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }

    /// Append an object and advance the `Next` counter past its ID.
    pub fn push(&mut self, object: Object) {
        let id = object.id.as_deref().and_then(|n| n.parse::<u32>().ok());
        let next = id.map_or(self.next_index(), |id| id + 1).max(self.next_index());
        self.next = Some(next.to_string());
        self.children.push(DrawingNode::Object(object));
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.children.iter().map(|node| match node {
            DrawingNode::Object(o) => o,
        })
    }
}

/// Children of the root element
#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum DrawingNode {
    #[facet(rename = "Object")]
    Object(Object),
}

/// One drawing object (`<Object ID="n">`)
#[derive(Facet, Debug, Clone, Default)]
pub struct Object {
    #[facet(xml::attribute, rename = "ID")]
    pub id: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<ObjectNode>,
}

impl Object {
    pub fn new(id: u32, children: Vec<ObjectNode>) -> Self {
        Self {
            id: Some(id.to_string()),
            children,
        }
    }
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum ObjectNode {
    #[facet(rename = "Detail")]
    Detail(Detail),
    #[facet(rename = "Ellipse")]
    Ellipse(Ellipse),
    #[facet(rename = "Line")]
    Line(Line),
}

/// Element whose only content is character data
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct TextNode {
    #[facet(xml::text)]
    pub content: String,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Object metadata (`<Detail>`)
#[derive(Facet, Debug, Clone, Default)]
pub struct Detail {
    #[facet(xml::elements)]
    pub children: Vec<DetailNode>,
}

impl Detail {
    /// Empty comment and status, with the given tooltip.
    pub fn with_tooltip(tooltip: impl Into<String>) -> Self {
        Self {
            children: vec![
                DetailNode::Comment(TextNode::default()),
                DetailNode::Status(TextNode::default()),
                DetailNode::Tooltip(TextNode::new(tooltip)),
            ],
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            DetailNode::Tooltip(t) => Some(t.content.as_str()),
            _ => None,
        })
    }
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum DetailNode {
    #[facet(rename = "Comment")]
    Comment(TextNode),
    #[facet(rename = "Status")]
    Status(TextNode),
    #[facet(rename = "Tooltip")]
    Tooltip(TextNode),
}

/// Ellipse primitive (`<Ellipse>`), radii in feet
#[derive(Facet, Debug, Clone, Default)]
pub struct Ellipse {
    #[facet(xml::attribute)]
    pub style: Option<String>,
    #[facet(xml::attribute)]
    pub rotate: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<ShapeNode>,
}

/// Line primitive (`<Line>`), closed when `polygon="true"`
#[derive(Facet, Debug, Clone, Default)]
pub struct Line {
    #[facet(xml::attribute)]
    pub style: Option<String>,
    #[facet(xml::attribute)]
    pub linetype: Option<String>,
    #[facet(xml::attribute)]
    pub polygon: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<ShapeNode>,
}

/// Shared accessors for the two primitive kinds
pub trait Primitive {
    fn children(&self) -> &[ShapeNode];

    fn points(&self) -> impl Iterator<Item = &Point> {
        self.children().iter().filter_map(|node| match node {
            ShapeNode::Point(p) => Some(p),
            _ => None,
        })
    }

    fn pen(&self) -> Option<&Pen> {
        self.children().iter().find_map(|node| match node {
            ShapeNode::Pen(p) => Some(p),
            _ => None,
        })
    }
}

impl Primitive for Ellipse {
    fn children(&self) -> &[ShapeNode] {
        &self.children
    }
}

impl Primitive for Line {
    fn children(&self) -> &[ShapeNode] {
        &self.children
    }
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum ShapeNode {
    #[facet(rename = "Pen")]
    Pen(Pen),
    #[facet(rename = "Fill")]
    Fill(Fill),
    #[facet(rename = "VRadius")]
    VRadius(TextNode),
    #[facet(rename = "HRadius")]
    HRadius(TextNode),
    #[facet(rename = "Point")]
    Point(Point),
    #[facet(rename = "Label")]
    Label(Label),
    #[facet(rename = "Embedded")]
    Embedded(Embedded),
}

/// Outline pen (`<Pen width="4">`) with fore and back colors
#[derive(Facet, Debug, Clone, Default)]
pub struct Pen {
    #[facet(xml::attribute)]
    pub width: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<ColorNode>,
}

impl Pen {
    pub fn color(&self, kind: &str) -> Option<&Color> {
        self.children.iter().find_map(|node| match node {
            ColorNode::Color(c) if c.type_.as_deref() == Some(kind) => Some(c),
            _ => None,
        })
    }
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum ColorNode {
    #[facet(rename = "Color")]
    Color(Color),
}

/// Fill style (`<Fill style="none"/>`); uses the pen's back color
#[derive(Facet, Debug, Clone, Default)]
pub struct Fill {
    #[facet(xml::attribute)]
    pub style: Option<String>,
}

/// Geographic point (`<Point>`), `type="center"` for ellipse centers
#[derive(Facet, Debug, Clone, Default)]
pub struct Point {
    #[facet(xml::attribute, rename = "type")]
    pub type_: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<CoordNode>,
}

impl Point {
    pub fn new(type_: Option<&str>, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            type_: type_.map(str::to_string),
            children: vec![
                CoordNode::Latitude(TextNode::new(latitude)),
                CoordNode::Longitude(TextNode::new(longitude)),
            ],
        }
    }

    pub fn latitude(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            CoordNode::Latitude(t) => Some(t.content.as_str()),
            _ => None,
        })
    }

    pub fn longitude(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            CoordNode::Longitude(t) => Some(t.content.as_str()),
            _ => None,
        })
    }
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum CoordNode {
    #[facet(rename = "LATITUDE")]
    Latitude(TextNode),
    #[facet(rename = "LONGITUDE")]
    Longitude(TextNode),
}

/// Label anchored to the first point (`<Label Display="false">`)
#[derive(Facet, Debug, Clone, Default)]
pub struct Label {
    #[facet(xml::attribute, rename = "Display")]
    pub display: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<TextBlockNode>,
}

/// Text embedded along a line (`<Embedded text_position="center">`)
#[derive(Facet, Debug, Clone, Default)]
pub struct Embedded {
    #[facet(xml::attribute)]
    pub text_position: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<TextBlockNode>,
}

/// Children of `Label` and `Embedded`
#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum TextBlockNode {
    #[facet(rename = "Font")]
    Font(Font),
    #[facet(rename = "String")]
    String(TextNode),
}

#[derive(Facet, Debug, Clone, Default)]
pub struct Font {
    #[facet(xml::attribute)]
    pub size: Option<String>,
    #[facet(xml::attribute)]
    pub attributes: Option<String>,
    #[facet(xml::attribute)]
    pub backtype: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<FontNode>,
}

#[derive(Facet, Debug, Clone)]
#[repr(u8)]
pub enum FontNode {
    #[facet(rename = "Name")]
    Name(TextNode),
    #[facet(rename = "Color")]
    Color(Color),
}

// Re-export facet_xml for convenience
pub use facet_xml;
