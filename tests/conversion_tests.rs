use facet_drx::{ColorNode, ObjectNode, Objects, Pen, Primitive, ShapeNode};
use geojson::{Feature, GeoJson, Value};
use suasgeo::{
    AssembleError, BoundingBox, ConvertOptions, CountryFilter, OutputFormat, ParseError,
    SourceContext, convert,
};

const HEADER: &str = "SUAS_IDENT\tSECTOR\tSHAP\tWGS_DLAT0\tWGS_DLONG0\tRADIUS1\tRADIUS2\t\
                      WGS_DLAT1\tWGS_DLONG1\tWGS_DLAT2\tWGS_DLONG2\tTYPE\tNAME\tICAO";

const COUNTRIES: &str = "SUAS_IDENT\tSECTOR\tCTRY_1\n\
                         X1\tA\tUS\n\
                         X2\tA\tUS\n\
                         C1\tA\tUS\n\
                         ARC1\tA\tUS\n\
                         J1\tA\tJA\n";

/// A straight-edge row from `p1` to `p2`, both `(lat, lon)`
fn edge(ident: &str, category: &str, p1: (f64, f64), p2: (f64, f64)) -> String {
    format!(
        "{ident}\tA\tG\t\t\t\t\t{}\t{}\t{}\t{}\t{category}\t{ident} AREA\tK2",
        p1.0, p1.1, p2.0, p2.1
    )
}

fn triangle(ident: &str, category: &str) -> Vec<String> {
    vec![
        edge(ident, category, (35.0, -117.0), (35.0, -116.0)),
        edge(ident, category, (35.0, -116.0), (36.0, -116.5)),
        edge(ident, category, (36.0, -116.5), (35.0, -117.0)),
    ]
}

fn suas(rows: &[String]) -> SourceContext {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    SourceContext::new("SUAS.TXT", text)
}

fn countries() -> SourceContext {
    SourceContext::new("SUAS_CTRY.TXT", COUNTRIES)
}

fn features(text: &str) -> Vec<Feature> {
    match text.parse::<GeoJson>().expect("output is GeoJSON") {
        GeoJson::FeatureCollection(fc) => fc.features,
        other => panic!("expected a feature collection, got {other:?}"),
    }
}

fn ring(feature: &Feature) -> Vec<Vec<f64>> {
    match &feature.geometry.as_ref().expect("feature has geometry").value {
        Value::Polygon(rings) => {
            assert_eq!(rings.len(), 1, "one ring per feature");
            rings[0].clone()
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
}

fn property<'a>(feature: &'a Feature, key: &str) -> &'a str {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
}

#[test]
fn triangle_becomes_one_feature() {
    let text = convert(&suas(&triangle("X1", "R")), &countries(), &ConvertOptions::default()).unwrap();
    let features = features(&text);
    assert_eq!(features.len(), 1);

    let feature = &features[0];
    assert_eq!(property(feature, "SUAS"), "X1");
    assert_eq!(property(feature, "Name"), "X1 AREA");
    assert_eq!(property(feature, "ICAO"), "K2");
    assert_eq!(property(feature, "TYPE"), "R");

    let ring = ring(feature);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring[0], vec![-117.0, 35.0]);
    assert_eq!(ring[1], vec![-116.0, 35.0]);
    assert_eq!(ring[2], vec![-116.5, 36.0]);
    assert_eq!(ring[0], ring[3]);
}

#[test]
fn literal_points_are_rounded() {
    let rows = vec![
        edge("X1", "R", (35.000049, -117.000051), (35.0, -116.0)),
        edge("X1", "R", (35.0, -116.0), (36.0, -116.5)),
        edge("X1", "R", (36.0, -116.5), (35.000049, -117.000051)),
    ];
    let text = convert(&suas(&rows), &countries(), &ConvertOptions::default()).unwrap();
    let ring = ring(&features(&text)[0]);
    assert_eq!(ring[0], vec![-117.0001, 35.0]);
}

#[test]
fn bounding_box_drops_outside_rings() {
    let mut rows = triangle("X1", "R");
    rows.extend(vec![
        edge("X2", "W", (10.0, 10.0), (10.0, 11.0)),
        edge("X2", "W", (10.0, 11.0), (11.0, 11.0)),
        edge("X2", "W", (11.0, 11.0), (10.0, 10.0)),
    ]);
    let bounds: BoundingBox = "50 -131 23 -66".parse().unwrap();
    let options = ConvertOptions::default().with_bounds(bounds);
    let text = convert(&suas(&rows), &countries(), &options).unwrap();
    let idents: Vec<_> = features(&text).iter().map(|f| property(f, "SUAS").to_string()).collect();
    assert_eq!(idents, ["X1"]);
}

#[test]
fn country_filter_keeps_listed_countries() {
    let mut rows = triangle("X1", "R");
    rows.extend(triangle("J1", "R"));
    let options = ConvertOptions::default().with_countries(CountryFilter::parse("ja"));
    let text = convert(&suas(&rows), &countries(), &options).unwrap();
    let idents: Vec<_> = features(&text).iter().map(|f| property(f, "SUAS").to_string()).collect();
    assert_eq!(idents, ["J1"]);
}

#[test]
fn double_circle_gives_two_features() {
    let row = "C1\tA\tC\t35.25\t-117.5\t10\t5\t\t\t\t\tM\tC1 AREA\tK2".to_string();
    let text = convert(&suas(&[row]), &countries(), &ConvertOptions::default()).unwrap();
    let features = features(&text);
    assert_eq!(features.len(), 2);
    for feature in &features {
        assert_eq!(property(feature, "SUAS"), "C1");
        let ring = ring(feature);
        assert_eq!(ring.len(), 37);
        assert_eq!(ring[0], ring[36]);
    }
    // Due north of the center, 10 NM then 5 NM
    let north = |f: &Feature| ring(f)[0][1];
    assert!((north(&features[0]) - (35.25 + 10.0 / 60.0)).abs() < 1e-3);
    assert!((north(&features[1]) - (35.25 + 5.0 / 60.0)).abs() < 1e-3);
}

#[test]
fn arc_boundary_is_closed() {
    // Quarter circle clockwise from due north to due east, closed back
    // through the center.
    let rows = vec![
        "ARC1\tA\tR\t35\t-117\t10\t\t35.1667\t-117\t35\t-116.7966\tR\tARC\tK2".to_string(),
        edge("ARC1", "R", (35.0, -116.7966), (35.0, -117.0)),
        edge("ARC1", "R", (35.0, -117.0), (35.1667, -117.0)),
    ];
    let text = convert(&suas(&rows), &countries(), &ConvertOptions::default()).unwrap();
    let features = features(&text);
    assert_eq!(features.len(), 1);
    let ring = ring(&features[0]);
    assert_eq!(ring.first(), ring.last());
    assert!(ring.contains(&vec![-116.7966, 35.0]));
    for w in ring.windows(2) {
        assert_ne!(w[0], w[1]);
    }
}

#[test]
fn drawing_output() {
    let mut rows = triangle("X1", "W");
    rows.push("C1\tA\tC\t35.25\t-117.5\t5\t\t\t\t\t\tR\tC1 AREA\tK2".to_string());
    let options = ConvertOptions::default().with_format(OutputFormat::Drawing);
    let text = convert(&suas(&rows), &countries(), &options).unwrap();

    assert!(text.contains("urn:JMPS/JMPS"));
    assert!(text.contains("Next=\"2\""));
    assert_eq!(text.matches("<Object ").count(), 2);
    assert_eq!(text.matches("<Line ").count(), 1);
    assert_eq!(text.matches("<Ellipse ").count(), 1);
    assert!(text.contains("<Tooltip>X1</Tooltip>"));
    assert!(text.contains("<Tooltip>C1</Tooltip>"));
    assert!(text.contains("<VRadius>30381</VRadius>"));
    // Three line vertices plus the ellipse center
    assert_eq!(text.matches("<LATITUDE>").count(), 4);
}

/// Element names of a primitive's children, in document order
fn shape_tags(children: &[ShapeNode]) -> Vec<&'static str> {
    children
        .iter()
        .map(|node| match node {
            ShapeNode::Pen(_) => "Pen",
            ShapeNode::Fill(_) => "Fill",
            ShapeNode::VRadius(_) => "VRadius",
            ShapeNode::HRadius(_) => "HRadius",
            ShapeNode::Point(_) => "Point",
            ShapeNode::Label(_) => "Label",
            ShapeNode::Embedded(_) => "Embedded",
        })
        .collect()
}

fn pen_colors(pen: &Pen) -> Vec<(String, (u8, u8, u8))> {
    pen.children
        .iter()
        .map(|ColorNode::Color(c)| (c.type_.clone().unwrap_or_default(), c.rgb().unwrap()))
        .collect()
}

#[test]
fn drawing_document_structure() {
    let mut rows = triangle("X1", "W");
    rows.extend(vec![
        edge("X2", "M", (10.0, 10.0), (10.0, 11.0)),
        edge("X2", "M", (10.0, 11.0), (11.0, 11.0)),
        edge("X2", "M", (11.0, 11.0), (10.0, 10.0)),
    ]);
    rows.push("C1\tA\tC\t35.25\t-117.5\t5\t\t\t\t\t\tR\tC1 AREA\tK2".to_string());
    let options = ConvertOptions::default()
        .with_format(OutputFormat::Drawing)
        .with_bounds("50 -131 23 -66".parse().unwrap());
    let text = convert(&suas(&rows), &countries(), &options).unwrap();
    let doc: Objects = facet_drx::facet_xml::from_str(&text).expect("drawing parses back");

    // X2 lies outside the box, so numbering runs X1, C1 without a gap
    assert_eq!(doc.next.as_deref(), Some("2"));
    let objects: Vec<_> = doc.objects().collect();
    let ids: Vec<_> = objects.iter().map(|o| o.id.as_deref().unwrap_or_default()).collect();
    assert_eq!(ids, ["0", "1"]);
    let tooltips: Vec<_> = objects
        .iter()
        .filter_map(|o| match &o.children[0] {
            ObjectNode::Detail(d) => d.tooltip(),
            _ => None,
        })
        .collect();
    assert_eq!(tooltips, ["X1", "C1"]);

    let ObjectNode::Line(line) = &objects[0].children[1] else {
        panic!("X1 should be a line, got {:?}", objects[0].children[1]);
    };
    assert_eq!(line.polygon.as_deref(), Some("true"));
    assert_eq!(
        shape_tags(&line.children),
        ["Pen", "Fill", "Label", "Point", "Point", "Point", "Embedded"]
    );
    assert_eq!(
        pen_colors(line.pen().unwrap()),
        [("fore".to_string(), (0, 64, 128)), ("back".to_string(), (255, 0, 0))]
    );
    let lons: Vec<_> = line.points().map(|p| p.longitude().unwrap_or_default()).collect();
    assert_eq!(lons, ["-117", "-116", "-116.5"]);

    let ObjectNode::Ellipse(ellipse) = &objects[1].children[1] else {
        panic!("C1 should be an ellipse, got {:?}", objects[1].children[1]);
    };
    assert_eq!(
        shape_tags(&ellipse.children),
        ["Pen", "Fill", "VRadius", "HRadius", "Point", "Label"]
    );
    assert_eq!(
        pen_colors(ellipse.pen().unwrap()),
        [("fore".to_string(), (255, 0, 0)), ("back".to_string(), (255, 0, 0))]
    );
    let center = ellipse.points().next().unwrap();
    assert_eq!(center.type_.as_deref(), Some("center"));
    assert_eq!(center.latitude(), Some("35.25"));
}

#[test]
fn format_follows_destination_extension() {
    let rows = triangle("X1", "R");
    let options = ConvertOptions::default().with_format(OutputFormat::from_path("suas.DRX"));
    let text = convert(&suas(&rows), &countries(), &options).unwrap();
    assert!(text.contains("<Objects"));
}

#[test]
fn malformed_number_aborts() {
    let mut rows = triangle("X1", "R");
    rows[1] = rows[1].replace("-116.5", "-116.5.0");
    let err = convert(&suas(&rows), &countries(), &ConvertOptions::default()).unwrap_err();
    match err.downcast_ref::<ParseError>() {
        Some(ParseError::InvalidNumber { ident, field, value, .. }) => {
            assert_eq!(ident, "X1");
            assert_eq!(*field, "WGS_DLONG2");
            assert_eq!(value, "-116.5.0");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn reappearing_identifier_aborts() {
    let mut rows = triangle("X1", "R");
    rows.extend(triangle("X2", "R"));
    rows.push(edge("X1", "R", (35.0, -117.0), (35.0, -116.0)));
    let err = convert(&suas(&rows), &countries(), &ConvertOptions::default()).unwrap_err();
    match err.downcast_ref::<AssembleError>() {
        Some(AssembleError::OutOfOrderIdentifier { ident, line, first_line }) => {
            assert_eq!(ident, "X1");
            assert_eq!(*line, 8);
            assert_eq!(*first_line, 2);
        }
        other => panic!("expected OutOfOrderIdentifier, got {other:?}"),
    }
}

#[test]
fn unknown_shape_code_is_an_edge() {
    let rows: Vec<_> = triangle("X1", "R")
        .into_iter()
        .map(|r| r.replacen("\tG\t", "\tZ\t", 1))
        .collect();
    let text = convert(&suas(&rows), &countries(), &ConvertOptions::default()).unwrap();
    assert_eq!(features(&text).len(), 1);
}
