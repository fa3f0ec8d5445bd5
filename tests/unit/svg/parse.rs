use super::*;
use crate::{
    foundation::core::{Point, Rgba8},
    svg::style::Paint,
};

const SQUARE: &str = "M10 0 L20 0 L20 10 L10 10 Z";

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn doc(view_box: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="{view_box}">{body}</svg>"#
    )
}

#[test]
fn parsing_is_deterministic() {
    let m = doc(
        "0 0 100 50",
        &format!(r#"<g fill="red"><path d="{SQUARE}"/><rect width="3" height="4"/></g>"#),
    );
    let a = parse_svg(&m).unwrap();
    let b = parse_svg(&m).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.nodes.len(), 2);
}

#[test]
fn document_level_failures_abort() {
    assert!(matches!(parse_svg("<svg"), Err(SvgMorphError::Parse(_))));
    assert!(matches!(
        parse_svg(r#"<g viewBox="0 0 1 1"/>"#),
        Err(SvgMorphError::Parse(_))
    ));
    assert!(matches!(
        parse_svg(r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#),
        Err(SvgMorphError::Parse(_))
    ));
    assert!(matches!(
        parse_svg(r#"<svg viewBox="0 0 0 10"/>"#),
        Err(SvgMorphError::Parse(_))
    ));
}

#[test]
fn view_box_center_becomes_origin() {
    let g = parse_svg(&doc("0 0 20 20", r#"<path d="M0 0 L10 0 L10 10 L0 10 Z"/>"#)).unwrap();
    assert_eq!(g.size, Vec2::new(20.0, 20.0));
    assert_eq!(g.view_box, Rect::new(0.0, 0.0, 20.0, 20.0));
    let t = g.nodes[0].transform;
    assert!(approx(t.position.x, -5.0));
    assert!(approx(t.position.y, -5.0));
    assert_eq!(t.scale, Vec2::new(1.0, 1.0));
}

#[test]
fn nested_translate_then_rotate_places_path_centroid() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(
            r#"<g transform="translate(30, 40)"><g transform="rotate(90)"><path d="{SQUARE}"/></g></g>"#
        ),
    ))
    .unwrap();
    assert_eq!(g.nodes.len(), 1);
    let t = g.nodes[0].transform;
    // Centroid (15, 5) rotated by 90 degrees is (-5, 15).
    assert!(approx(t.position.x, 25.0));
    assert!(approx(t.position.y, 55.0));
    assert!(approx(t.rotation_deg, 90.0));
    assert!(approx(t.scale.x, 1.0));
    assert!(approx(t.scale.y, 1.0));
}

#[test]
fn rect_is_centered_on_its_midpoint() {
    let g = parse_svg(&doc(
        "0 0 100 100",
        r#"<rect id="r" x="10" y="20" width="4" height="6"/>"#,
    ))
    .unwrap();
    let r = &g.nodes[0];
    assert_eq!(r.id.as_deref(), Some("r"));
    assert_eq!(
        r.kind,
        PrimitiveKind::Rect {
            width: 4.0,
            height: 6.0
        }
    );
    assert!(approx(r.transform.position.x, -38.0));
    assert!(approx(r.transform.position.y, -27.0));
}

#[test]
fn rendered_size_scales_view_box_units() {
    let m = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="200" height="100px"><path d="M0 0 L100 100"/></svg>"#;
    let g = parse_svg(m).unwrap();
    assert_eq!(g.size, Vec2::new(200.0, 100.0));
    let t = g.nodes[0].transform;
    assert!(approx(t.position.x, 0.0));
    assert!(approx(t.position.y, 0.0));
    assert!(approx(t.scale.x, 2.0));
    assert!(approx(t.scale.y, 1.0));

    let m = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50" width="50"/>"#;
    assert_eq!(parse_svg(m).unwrap().size, Vec2::new(50.0, 25.0));
}

#[test]
fn non_pixel_rendered_size_falls_back_to_view_box() {
    let m = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 -750 1200 1000" width="2.7ex" height="2.3ex"/>"#;
    let g = parse_svg(m).unwrap();
    assert_eq!(g.size, Vec2::new(1200.0, 1000.0));
    assert_eq!(g.view_box.center(), Point::new(600.0, -250.0));
}

#[test]
fn references_inline_target_with_reference_ancestry_style() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(
            r##"<defs><g fill="blue"><path id="glyph" d="{SQUARE}"/></g></defs>
                <g fill="red" stroke-width="2"><use xlink:href="#glyph" x="5"/></g>"##
        ),
    ))
    .unwrap();
    assert_eq!(g.nodes.len(), 1, "defs content is not drawn directly");
    let p = &g.nodes[0];
    assert_eq!(p.style.fill, Some(Paint::Color(Rgba8::opaque(255, 0, 0))));
    assert_eq!(p.style.stroke_width, Some(2.0));
    assert!(approx(p.transform.position.x, 20.0));
    assert!(approx(p.transform.position.y, 5.0));
    assert_eq!(p.id.as_deref(), Some("glyph"));
}

#[test]
fn reference_target_keeps_its_own_attributes() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(
            r##"<defs><path id="glyph" fill="currentColor" d="{SQUARE}"/></defs>
                <g fill="red"><use href="#glyph"/></g>"##
        ),
    ))
    .unwrap();
    assert_eq!(g.nodes[0].style.fill, Some(Paint::CurrentColor));
}

#[test]
fn bad_elements_are_skipped_with_warnings() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(
            r##"<path id="blank" d="  "/>
                <path id="junk" d="M 1 1 X 3"/>
                <use href="#missing"/>
                <rect id="bad" width="-1" height="2"/>
                <g transform="wobble(3)"><path d="{SQUARE}"/></g>"##
        ),
    ))
    .unwrap();
    assert_eq!(g.nodes.len(), 1);
    assert_eq!(
        g.warnings[0],
        ParseWarning::MissingPathData {
            id: "blank".to_string()
        }
    );
    assert!(matches!(
        &g.warnings[1],
        ParseWarning::InvalidPathData { id, .. } if id == "junk"
    ));
    assert_eq!(
        g.warnings[2],
        ParseWarning::UnresolvedReference {
            href: "#missing".to_string()
        }
    );
    assert_eq!(
        g.warnings[3],
        ParseWarning::InvalidRectSize {
            id: "bad".to_string()
        }
    );
    assert_eq!(
        g.warnings[4],
        ParseWarning::InvalidTransform {
            value: "wobble(3)".to_string()
        }
    );
}

#[test]
fn reference_cycles_terminate() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(r##"<g id="loop"><path d="{SQUARE}"/><use href="#loop"/></g><use id="me" href="#me"/>"##),
    ))
    .unwrap();
    assert_eq!(g.nodes.len(), 1);
    assert_eq!(g.warnings.len(), 2);
    assert!(
        g.warnings
            .iter()
            .all(|w| matches!(w, ParseWarning::ReferenceCycle { .. }))
    );
}

#[test]
fn unknown_elements_are_not_traversed() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(r#"<circle r="3"/><text><path d="{SQUARE}"/></text><g><path d="{SQUARE}"/></g>"#),
    ))
    .unwrap();
    assert_eq!(g.nodes.len(), 1);
}

#[test]
fn mirrored_group_yields_negative_y_scale() {
    let g = parse_svg(&doc(
        "-50 -50 100 100",
        &format!(r#"<g transform="scale(1,-1)"><path d="{SQUARE}"/></g>"#),
    ))
    .unwrap();
    let t = g.nodes[0].transform;
    assert!(approx(t.scale.x, 1.0));
    assert!(approx(t.scale.y, -1.0));
    assert!(approx(t.rotation_deg, 0.0));
    assert!(approx(t.position.y, -5.0));
}

#[test]
fn root_presentation_attributes_seed_inheritance() {
    let m = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" stroke="black"><g fill="currentColor"><path d="{SQUARE}"/></g></svg>"#
    );
    let p = &parse_svg(&m).unwrap().nodes[0];
    assert_eq!(p.style.stroke, Some(Paint::Color(Rgba8::BLACK)));
    assert_eq!(p.style.fill, Some(Paint::CurrentColor));
}

#[test]
fn parse_cache_parses_each_markup_once() {
    let mut cache = ParseCache::new();
    let a = doc("0 0 10 10", &format!(r#"<path d="{SQUARE}"/>"#));
    let b = doc("0 0 20 10", "");
    cache.get_or_parse(&a).unwrap();
    cache.get_or_parse(&a).unwrap();
    cache.get_or_parse(&b).unwrap();
    assert_eq!(cache.parse_count(), 2);
    assert_eq!(cache.len(), 2);

    assert!(cache.get_or_parse("<svg").is_err());
    assert_eq!(cache.len(), 2);
}
