//! Drawing-document (`*.drx`) generation

use facet_drx::facet_xml::{self, SerializeOptions};
use facet_drx::{
    Color, ColorNode, Detail, Ellipse, Embedded, Fill, Font, FontNode, Label, Line, Object,
    ObjectNode, Objects, Pen, Point, ShapeNode, TextBlockNode, TextNode,
};

use crate::boundary::{CircleSpec, FinishedRing, RingPrimitive};
use crate::errors::EmitError;
use crate::types::{LonLat, Rgb};

use super::Emit;
use super::defaults;
use super::style::{Style, resolve};

fn color(kind: &str, rgb: Rgb) -> Color {
    Color::new(kind, rgb.0, rgb.1, rgb.2)
}

/// Decimal text for a coordinate, full precision
fn coord(value: f64) -> String {
    format!("{value}")
}

fn pen(style: &Style) -> ShapeNode {
    ShapeNode::Pen(Pen {
        width: Some(style.line_width.to_string()),
        children: vec![
            ColorNode::Color(color("fore", style.fore)),
            ColorNode::Color(color("back", style.back)),
        ],
    })
}

fn fill(style: &Style) -> ShapeNode {
    ShapeNode::Fill(Fill {
        style: Some(style.fill.as_str().to_string()),
    })
}

fn font(fore: Rgb, back: Rgb) -> TextBlockNode {
    TextBlockNode::Font(Font {
        size: Some(defaults::FONT_SIZE.to_string()),
        attributes: Some("0".to_string()),
        backtype: Some(defaults::FONT_BACKTYPE.to_string()),
        children: vec![
            FontNode::Name(TextNode::new(defaults::FONT_NAME)),
            FontNode::Color(color("fore", fore)),
            FontNode::Color(color("back", back)),
        ],
    })
}

/// Hidden label anchored to the first point
fn label() -> ShapeNode {
    ShapeNode::Label(Label {
        display: Some("false".to_string()),
        children: vec![
            font(defaults::LABEL_FORE, defaults::LABEL_BACK),
            TextBlockNode::String(TextNode::default()),
        ],
    })
}

fn embedded() -> ShapeNode {
    ShapeNode::Embedded(Embedded {
        text_position: Some(defaults::EMBED_POSITION.to_string()),
        children: vec![
            font(defaults::LABEL_FORE, defaults::LABEL_BACK),
            TextBlockNode::String(TextNode::default()),
        ],
    })
}

fn point(type_: Option<&str>, p: LonLat) -> ShapeNode {
    ShapeNode::Point(Point::new(type_, coord(p.lat()), coord(p.lon())))
}

/// Ellipse primitive: center and radius only, radii in whole feet
pub fn ellipse(circle: CircleSpec, style: &Style) -> Ellipse {
    let feet = format!("{}", circle.radius.to_feet().round() as i64);
    Ellipse {
        style: Some(defaults::LINE_STYLE.to_string()),
        rotate: Some(defaults::ROTATION.to_string()),
        children: vec![
            pen(style),
            fill(style),
            ShapeNode::VRadius(TextNode::new(feet.clone())),
            ShapeNode::HRadius(TextNode::new(feet)),
            point(Some("center"), circle.center),
            label(),
        ],
    }
}

/// Closed polyline primitive; the closing vertex is implied by `polygon="true"`
pub fn polygon(points: &[LonLat], style: &Style) -> Line {
    let mut children = vec![pen(style), fill(style), label()];
    children.extend(points.iter().map(|p| point(None, *p)));
    children.push(embedded());
    Line {
        style: Some(defaults::LINE_STYLE.to_string()),
        linetype: Some(defaults::LINE_TYPE.to_string()),
        polygon: Some("true".to_string()),
        children,
    }
}

/// Builds the drawing document; object IDs come from the root's `Next`.
#[derive(Debug, Clone)]
pub struct DrawingEmitter {
    doc: Objects,
}

impl Default for DrawingEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingEmitter {
    pub fn new() -> Self {
        Self { doc: Objects::new() }
    }

    /// Continue numbering after an existing document's objects.
    pub fn with_document(doc: Objects) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &Objects {
        &self.doc
    }

    pub fn into_document(self) -> Objects {
        self.doc
    }

    fn append(&mut self, tooltip: &str, primitive: ObjectNode) {
        let id = self.doc.next_index();
        self.doc.push(Object::new(
            id,
            vec![ObjectNode::Detail(Detail::with_tooltip(tooltip)), primitive],
        ));
    }
}

impl Emit for DrawingEmitter {
    fn emit(&mut self, ring: &FinishedRing) {
        let style = resolve(&ring.properties.category);
        let primitive = match ring.primitive {
            RingPrimitive::Ellipse(circle) => ObjectNode::Ellipse(ellipse(circle, &style)),
            RingPrimitive::Polygon => ObjectNode::Line(polygon(ring.ring.open_points(), &style)),
        };
        crate::log::debug!(ident = %ring.ident(), id = self.doc.next_index(), "drawing object");
        self.append(ring.ident(), primitive);
    }

    fn count(&self) -> usize {
        self.doc.objects().count()
    }

    fn finish(self) -> Result<String, EmitError> {
        facet_xml::to_string_with_options(&self.doc, &SerializeOptions::default())
            .map_err(|e| EmitError::Xml {
                message: e.to_string(),
            })
    }
}
