use super::*;

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D {
        position: Vec2::new(10.0, -2.5),
        ..Transform2D::default()
    };
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn transform_applies_scale_before_rotation() {
    let t = Transform2D {
        position: Vec2::new(1.0, 0.0),
        rotation_deg: 90.0,
        scale: Vec2::new(2.0, 1.0),
    };
    let p = t.to_affine() * Point::new(1.0, 0.0);
    assert!((p.x - 1.0).abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
}

#[test]
fn view_box_rect_rejects_degenerate_boxes() {
    let r = view_box_rect(-10.0, -5.0, 20.0, 10.0).unwrap();
    assert_eq!(r.center(), Point::new(0.0, 0.0));
    assert_eq!(r.size(), kurbo::Size::new(20.0, 10.0));

    assert!(view_box_rect(0.0, 0.0, 0.0, 10.0).is_err());
    assert!(view_box_rect(0.0, 0.0, 10.0, -1.0).is_err());
    assert!(view_box_rect(f64::NAN, 0.0, 10.0, 10.0).is_err());
}

#[test]
fn rgba_alpha_is_rounded_and_clamped() {
    assert_eq!(Rgba8::BLACK.with_alpha_f64(0.5).a, 128);
    assert_eq!(Rgba8::WHITE.with_alpha_f64(4.0).a, 255);
}
