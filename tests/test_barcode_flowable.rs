//! Integration tests for barcode flowables: geometry resolution, symbology
//! selection, style collection and dispatch to the canvas.

use pdf_barcode::color::{Color, ColorResolver, StandardColors};
use pdf_barcode::drawing::Drawing;
use pdf_barcode::elements::{AttributeMap, SourceElement, XmlElement};
use pdf_barcode::flowable::{resolve_code_name, BarcodeFlowable, Flowable};
use pdf_barcode::style::{StyleParams, StyleValue, BASELINE_BAR_STROKE_WIDTH, COLOR_ATTRIBUTES};
use pdf_barcode::units::MM;
use pdf_barcode::writer::Canvas;
use pdf_barcode::{Error, RenderContext, Result};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct RecordingCanvas {
    calls: Vec<(Drawing, f32, f32, String)>,
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, drawing: &Drawing, x: f32, y: f32, show_boundary: &str) -> Result<()> {
        self.calls.push((drawing.clone(), x, y, show_boundary.to_string()));
        Ok(())
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "expected {} but got {}", expected, actual);
}

/// Attribute names that never feed style collection.
const NON_STYLE_ATTRIBUTES: [&str; 6] = ["x", "y", "width", "height", "showBoundary", "id"];

fn non_style_attributes() -> impl Strategy<Value = AttributeMap> {
    prop::collection::vec(
        (prop::sample::select(NON_STYLE_ATTRIBUTES.to_vec()), 0u32..1000),
        0..6,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, n)| (name.to_string(), n.to_string()))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_missing_code_selects_code128(node in non_style_attributes()) {
        prop_assert_eq!(resolve_code_name(&node), "Code128");
    }

    #[test]
    fn prop_explicit_bounds_are_kept(w in 1u32..4000, h in 1u32..4000) {
        let ctx = RenderContext::new();
        let (width, height) = (w as f32 / 4.0, h as f32 / 4.0);
        let node = AttributeMap::new()
            .with("width", width.to_string())
            .with("height", height.to_string());
        let barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
        prop_assert_eq!(barcode.width(), width);
        prop_assert_eq!(barcode.height(), height);
        prop_assert_eq!(barcode.wrap(1.0, 1.0), (width, height));
    }

    #[test]
    fn prop_no_style_attributes_yields_only_baseline(node in non_style_attributes()) {
        let ctx = RenderContext::new();
        let style = StyleParams::collect(&node, ctx.units(), ctx.colors()).unwrap();
        prop_assert_eq!(style.len(), 1);
        prop_assert_eq!(
            style.get("barStrokeWidth"),
            Some(&StyleValue::Length(BASELINE_BAR_STROKE_WIDTH))
        );
    }

    #[test]
    fn prop_single_color_attribute(
        name in prop::sample::select(COLOR_ATTRIBUTES.to_vec()),
        rgb in prop::array::uniform3(any::<u8>()),
    ) {
        let ctx = RenderContext::new();
        let raw = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
        let node = AttributeMap::new().with(name, raw.clone());
        let style = StyleParams::collect(&node, ctx.units(), ctx.colors()).unwrap();

        let expected = StandardColors::new().resolve(&raw).unwrap();
        prop_assert_eq!(style.len(), 2);
        prop_assert_eq!(style.get(name), Some(&StyleValue::Color(expected)));
    }
}

#[test]
fn test_missing_width_uses_natural_width_only() {
    let ctx = RenderContext::new();
    let natural = ctx.catalog().measure("Code128", "HELLO").unwrap();

    let node = AttributeMap::new().with("height", "15mm");
    let barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
    assert_eq!(barcode.width(), natural.width);
    assert_close(barcode.height(), 15.0 * MM);

    let node = AttributeMap::new().with("width", "3in").with("height", "0");
    let barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
    assert_eq!(barcode.width(), 216.0);
    assert_eq!(barcode.height(), natural.height);
}

#[test]
fn test_ean13_natural_bounds() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new().with("code", "EAN13").with("x", "0").with("y", "0");
    let barcode = BarcodeFlowable::new(node, "5901234123457", &ctx).unwrap();

    let natural = ctx.catalog().measure("EAN13", "5901234123457").unwrap();
    assert_eq!((barcode.width(), barcode.height()), (natural.width, natural.height));

    let mut canvas = RecordingCanvas::default();
    barcode.draw(&mut canvas, &ctx).unwrap();
    assert_eq!(canvas.calls.len(), 1);
    let (drawing, x, y, boundary) = &canvas.calls[0];
    assert_eq!((*x, *y), (0.0, 0.0));
    assert_eq!(boundary, "");
    assert_eq!((drawing.width, drawing.height), (natural.width, natural.height));
    assert!(drawing.is_untransformed());
    assert_eq!(drawing.texts().collect::<Vec<_>>(), vec!["5901234123457"]);
}

#[test]
fn test_code128_explicit_size_and_fill() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new()
        .with("width", "50mm")
        .with("height", "10mm")
        .with("barFillColor", "#000000");
    let barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
    assert_close(barcode.width(), 141.732);
    assert_close(barcode.height(), 28.346);

    let style = barcode.style(&ctx).unwrap();
    let entries: Vec<_> = style.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    assert_eq!(
        entries,
        vec![
            ("barStrokeWidth".to_string(), StyleValue::Length(BASELINE_BAR_STROKE_WIDTH)),
            ("barFillColor".to_string(), StyleValue::Color(Color::black())),
        ]
    );

    let mut canvas = RecordingCanvas::default();
    barcode.draw(&mut canvas, &ctx).unwrap();
    let drawing = &canvas.calls[0].0;
    assert_eq!((drawing.width, drawing.height), (barcode.width(), barcode.height()));
    assert!(drawing.count_filled(Color::black()) > 0);
}

#[test]
fn test_unknown_symbology_fails_construction() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new().with("code", "NotARealCode");
    match BarcodeFlowable::new(node, "123", &ctx) {
        Err(Error::UnknownSymbology(name)) => assert_eq!(name, "NotARealCode"),
        other => panic!("expected UnknownSymbology, got {:?}", other.map(|b| b.code_name().to_string())),
    }
}

#[test]
fn test_unknown_symbology_never_reaches_canvas() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new()
        .with("code", "NotARealCode")
        .with("width", "1in")
        .with("height", "1in");
    let barcode = BarcodeFlowable::new(node, "123", &ctx).unwrap();

    let mut canvas = RecordingCanvas::default();
    assert!(matches!(barcode.draw(&mut canvas, &ctx), Err(Error::UnknownSymbology(_))));
    assert!(canvas.calls.is_empty());
}

#[test]
fn test_code_name_is_case_sensitive() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new().with("code", "code128");
    assert!(matches!(BarcodeFlowable::new(node, "HELLO", &ctx), Err(Error::UnknownSymbology(_))));
}

#[test]
fn test_degenerate_value_fails_measure() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new().with("code", "EAN13");
    assert!(matches!(BarcodeFlowable::new(node, "not digits", &ctx), Err(Error::Barcode(_))));
}

#[test]
fn test_all_style_groups_from_markup() {
    let ctx = RenderContext::new();
    let node = XmlElement::parse(
        r#"<barCode code="Code128" width="2in" height="0.5in"
                    textColor="(0,0,1)" humanReadable="1" fontSize="6"
                    barWidth="0.5mm" quiet="0">ABC-123</barCode>"#,
    )
    .unwrap();
    assert_eq!(node.get_attribute("humanReadable"), "1");
    let value = node.text().to_string();
    let barcode = BarcodeFlowable::new(node, value, &ctx).unwrap();

    let style = barcode.style(&ctx).unwrap();
    assert_eq!(style.get("textColor"), Some(&StyleValue::Color(Color::new(0.0, 0.0, 1.0))));
    assert_eq!(style.get("humanReadable"), Some(&StyleValue::Text("1".to_string())));
    assert_eq!(style.get("quiet"), Some(&StyleValue::Text("0".to_string())));
    assert_eq!(style.get("fontSize"), Some(&StyleValue::Length(6.0)));
    assert_eq!(style.len(), 6);

    let mut canvas = RecordingCanvas::default();
    barcode.draw(&mut canvas, &ctx).unwrap();
    assert_eq!(canvas.calls[0].0.texts().collect::<Vec<_>>(), vec!["ABC-123"]);
}

#[test]
fn test_every_standard_symbology_draws() {
    let ctx = RenderContext::new();
    let samples = [
        ("Code128", "HELLO"),
        ("Standard39", "ABC123"),
        ("Standard93", "ABC123"),
        ("I2of5", "123456"),
        ("Codabar", "A40156B"),
        ("EAN13", "5901234123457"),
        ("EAN8", "9638507"),
        ("UPCA", "03600029145"),
        ("Extended39", "Order #42"),
        ("Extended93", "Order #42"),
        ("Code11", "123-45"),
        ("MSI", "1234567"),
        ("POSTNET", "12345-6789"),
        ("FIM", "A"),
        ("QR", "https://example.com"),
    ];

    let mut canvas = RecordingCanvas::default();
    for (code, value) in samples {
        let node = AttributeMap::new().with("code", code);
        let barcode = BarcodeFlowable::new(node, value, &ctx).unwrap_or_else(|e| panic!("{}: {}", code, e));
        assert!(barcode.width() > 0.0 && barcode.height() > 0.0, "{}", code);
        barcode.draw(&mut canvas, &ctx).unwrap_or_else(|e| panic!("{}: {}", code, e));
    }
    assert_eq!(canvas.calls.len(), samples.len());
}

#[test]
fn test_node_mut_restyles_without_moving() {
    let ctx = RenderContext::new();
    let node = AttributeMap::new().with("x", "1in").with("y", "2in");
    let mut barcode = BarcodeFlowable::new(node, "HELLO", &ctx).unwrap();
    let bounds = barcode.bounds();

    barcode.node_mut().set("x", "5in").set("barFillColor", "blue");

    let mut canvas = RecordingCanvas::default();
    barcode.draw(&mut canvas, &ctx).unwrap();
    let (drawing, x, y, _) = &canvas.calls[0];
    assert_eq!((*x, *y), (72.0, 144.0));
    assert_eq!(barcode.bounds(), bounds);
    assert!(drawing.count_filled(Color::new(0.0, 0.0, 1.0)) > 0);
}

#[test]
fn test_postnet_from_markup() {
    let ctx = RenderContext::new();
    let node = XmlElement::parse(r#"<barCode x="1in" y="1in" code="POSTNET">55555</barCode>"#).unwrap();
    let value = node.text().to_string();
    let barcode = BarcodeFlowable::new(node, value, &ctx).unwrap();
    assert_close(barcode.height(), 9.0);

    let mut canvas = RecordingCanvas::default();
    barcode.draw(&mut canvas, &ctx).unwrap();
    let (drawing, x, y, _) = &canvas.calls[0];
    assert_eq!((*x, *y), (72.0, 72.0));
    assert!(drawing.is_untransformed());
    // frame bars plus five per digit and check digit
    assert_eq!(drawing.count_filled(Color::black()), 32);
}
