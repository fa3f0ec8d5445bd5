use super::*;

fn approx_affine(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn number_list_handles_compact_grammar() {
    assert_eq!(
        parse_number_list("1-2.5.5e1").unwrap(),
        vec![1.0, -2.5, 5.0]
    );
    assert_eq!(
        parse_number_list(" 0, 0 ,100\t50 ").unwrap(),
        vec![0.0, 0.0, 100.0, 50.0]
    );
    assert_eq!(parse_number_list("").unwrap(), Vec::<f64>::new());
    assert!(parse_number_list("1 two").is_none());
    assert!(parse_number_list("-").is_none());
}

#[test]
fn single_numbers_and_lengths() {
    assert_eq!(parse_number(" 12.5 "), Some(12.5));
    assert_eq!(parse_number("1 2"), None);
    assert_eq!(parse_length_px("40px"), Some(40.0));
    assert_eq!(parse_length_px("40"), Some(40.0));
    assert_eq!(parse_length_px("2.3ex"), None);
}

#[test]
fn view_box_requires_four_numbers() {
    assert_eq!(
        parse_view_box("0 -750 1200 1000"),
        Some([0.0, -750.0, 1200.0, 1000.0])
    );
    assert_eq!(parse_view_box("0 0 10"), None);
}

#[test]
fn transform_list_composes_left_to_right() {
    let m = parse_transform("translate(10, 20) scale(2)").unwrap();
    assert!(approx_affine(
        m,
        Affine::translate((10.0, 20.0)) * Affine::scale(2.0)
    ));

    let m = parse_transform("matrix(1 0 0 -1 0 0)").unwrap();
    assert!(approx_affine(m, Affine::scale_non_uniform(1.0, -1.0)));

    let m = parse_transform("rotate(90, 5, 5)").unwrap();
    let p = m * Point::new(10.0, 5.0);
    assert!((p.x - 5.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);

    let m = parse_transform("translate(3)").unwrap();
    assert!(approx_affine(m, Affine::translate((3.0, 0.0))));
}

#[test]
fn transform_rejects_unknown_functions_and_arity() {
    assert!(parse_transform("wobble(1)").is_none());
    assert!(parse_transform("scale(1,2,3)").is_none());
    assert!(parse_transform("translate(1,2").is_none());
    assert_eq!(parse_transform("  "), Some(Affine::IDENTITY));
}

#[test]
fn classifies_elements_and_hrefs() {
    let doc = roxmltree::Document::parse(
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
            <g/><use xlink:href="#a"/><use href=" #b "/><path/><rect/><circle/><use href="c"/>
        </svg>"##,
    )
    .unwrap();
    let kids: Vec<_> = doc.root_element().children().filter(|n| n.is_element()).collect();
    let kinds: Vec<_> = kids.iter().map(|n| ElementKind::of(*n)).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Group,
            ElementKind::Reference,
            ElementKind::Reference,
            ElementKind::Path,
            ElementKind::Rect,
            ElementKind::Unknown,
            ElementKind::Reference,
        ]
    );
    assert_eq!(href_id(kids[1]), Some("a"));
    assert_eq!(href_id(kids[2]), Some("b"));
    assert_eq!(href_id(kids[6]), None);
    assert_eq!(href_raw(kids[6]), "c");
}
