use super::*;
use crate::path::polyline::RouteStyle;

fn trail(visible: bool) -> LightTrail {
    let path = PathPolyline::trace_route(
        Point::new(-5.5, 0.0),
        Point::new(5.5, 0.0),
        RouteStyle::default(),
    );
    let mut t = LightTrail::new(TrailParams::default(), path).unwrap();
    t.set_visible(visible);
    t
}

#[derive(Default)]
struct MockBackend {
    draws: usize,
}

impl TrailBackend for MockBackend {
    fn draw_trail(&mut self, _state: &TrailState, _glow: &GlowFalloff) -> GalleryResult<()> {
        self.draws += 1;
        Ok(())
    }
}

#[test]
fn head_tracks_camera_not_route() {
    let t = trail(true);
    let camera = DVec3::new(1.25, 3.0, 14.0);
    let s = t.update(0.5, camera);
    assert_eq!(s.head, Point::new(1.25, 3.0));
}

#[test]
fn reveal_follows_eased_global_progress() {
    let t = trail(true);
    for g in [0.0, 0.2, 0.5, 0.9, 1.0] {
        let s = t.update(g, DVec3::ZERO);
        assert_eq!(s.revealed, Ease::InOutCubic.apply(g));
        let end = *s.revealed_points.last().unwrap();
        assert!(end.distance(t.path().point_at(s.revealed)) < 1e-9);
    }
    assert_eq!(t.update(1.0, DVec3::ZERO).revealed_points, t.path().points().to_vec());
}

#[test]
fn head_and_light_ramp_in_and_out() {
    let t = trail(true);
    let p = *t.params();
    let start = t.update(0.0, DVec3::ZERO);
    let mid = t.update(0.5, DVec3::ZERO);
    let end = t.update(1.0, DVec3::ZERO);
    assert_eq!(start.head_scale, 0.0);
    assert_eq!(start.light_intensity, 0.0);
    assert_eq!(end.head_scale, 0.0);
    assert_eq!(mid.head_scale, p.head_scale);
    assert_eq!(mid.light_intensity, p.light_intensity);

    let mut last = 0.0;
    for i in 0..=12 {
        let s = t.update(f64::from(i) / 100.0, DVec3::ZERO);
        assert!(s.light_intensity >= last);
        last = s.light_intensity;
    }
}

#[test]
fn hidden_trail_has_no_strength_and_skips_draw() {
    let t = trail(false);
    let s = t.update(0.5, DVec3::ZERO);
    assert!(!s.visible);
    assert_eq!(s.head_scale, 0.0);
    assert_eq!(s.light_intensity, 0.0);

    let mut backend = MockBackend::default();
    t.render(&mut backend, &s).unwrap();
    assert_eq!(backend.draws, 0);

    let shown = trail(true);
    let s = shown.update(0.5, DVec3::ZERO);
    shown.render(&mut backend, &s).unwrap();
    assert_eq!(backend.draws, 1);
}

#[test]
fn glow_falloff_contract() {
    let g = GlowFalloff::default();
    assert_eq!(g.alpha_at(0.0), 1.0);
    assert_eq!(g.alpha_at(-0.03), 1.0);
    assert_eq!(g.alpha_at(g.core_width + g.halo_width), 0.0);
    assert_eq!(g.alpha_at(10.0), 0.0);
    assert_eq!(g.alpha_at(f64::NAN), 0.0);
    assert_eq!(g.alpha_at(f64::INFINITY), 0.0);
    assert_eq!(g.alpha_at(f64::NEG_INFINITY), 0.0);
    let a = g.alpha_at(0.1);
    let b = g.alpha_at(0.2);
    assert!(a > b && b > 0.0 && a < 1.0);

    let hard = GlowFalloff {
        core_width: 0.1,
        halo_width: 0.0,
    };
    assert_eq!(hard.alpha_at(0.05), 1.0);
    assert_eq!(hard.alpha_at(0.15), 0.0);
}

#[test]
fn params_validation() {
    let bad = TrailParams {
        fade_span: 0.8,
        ..TrailParams::default()
    };
    assert!(bad.validate().is_err());
    let bad = TrailParams {
        light_intensity: f64::NAN,
        ..TrailParams::default()
    };
    assert!(bad.validate().is_err());
}
