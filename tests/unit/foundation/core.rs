use super::*;

#[test]
fn clamp_unit_bounds_and_nan() {
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(0.25), 0.25);
    assert_eq!(clamp_unit(7.0), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_unit(f64::INFINITY), 1.0);
}

#[test]
fn depth_lift_and_projection_agree() {
    let p = Point::new(-5.5, 2.0);
    let v = at_depth(p, 3.0);
    assert_eq!(v, DVec3::new(-5.5, 2.0, 3.0));
    assert_eq!(lateral(v), p);
}

#[test]
fn finite_point_rejects_nan() {
    assert!(is_finite_point(Point::new(1.0, 2.0)));
    assert!(!is_finite_point(Point::new(f64::NAN, 2.0)));
    assert!(!is_finite_point(Point::new(1.0, f64::NEG_INFINITY)));
}
