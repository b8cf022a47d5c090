use super::*;
use crate::foundation::error::GalleryError;

#[derive(Default)]
struct MockBackend {
    calls: Vec<&'static str>,
    fail_on: Option<&'static str>,
}

impl MockBackend {
    fn record(&mut self, call: &'static str) -> GalleryResult<()> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            return Err(GalleryError::validation("backend refused pass"));
        }
        Ok(())
    }
}

impl WallBackend for MockBackend {
    fn draw_content(&mut self, _pass: &ContentPass) -> GalleryResult<()> {
        self.record("draw_content")
    }

    fn write_stencil(&mut self, _pass: &StencilPass) -> GalleryResult<()> {
        self.record("write_stencil")
    }

    fn draw_wall(&mut self, _pass: &WallPass) -> GalleryResult<()> {
        self.record("draw_wall")
    }
}

fn portals() -> Vec<FrameConfig> {
    vec![
        FrameConfig::new("a", Point::new(-5.5, 0.0), 2.0, "a.mp4", "a.jpg"),
        FrameConfig::new("b", Point::new(5.5, 0.0), 2.0, "b.mp4", "b.jpg"),
    ]
}

fn status(blend: f64) -> MediaStatus {
    MediaStatus {
        blend_factor: blend,
        active_visual: if blend >= 0.5 {
            ActiveVisual::Live
        } else {
            ActiveVisual::Static
        },
        playing: blend > 0.1,
        stream_ready: true,
    }
}

fn plan_with(rules: [PlaneDepthRule; 2]) -> WallPlan {
    let portals = portals();
    WallPlan::build(
        portals
            .iter()
            .zip([-1.0, -0.05])
            .zip([status(1.0), status(0.0)])
            .zip(rules)
            .map(|(((config, z), media), rule)| PortalLayer {
                config,
                z,
                media,
                rule,
            }),
    )
}

fn plan() -> WallPlan {
    plan_with([PlaneDepthRule::Tracking, PlaneDepthRule::Tracking])
}

fn hole_portals(plan: &WallPlan) -> Vec<PortalIndex> {
    plan.stencil().holes.iter().map(|h| h.portal).collect()
}

#[test]
fn execute_plan_calls_in_expected_order() {
    let mut backend = MockBackend::default();
    execute_wall_plan(&mut backend, &plan()).unwrap();
    assert_eq!(backend.calls, vec!["draw_content", "write_stencil", "draw_wall"]);
}

#[test]
fn backend_error_stops_the_sequence() {
    let mut backend = MockBackend {
        fail_on: Some("write_stencil"),
        ..MockBackend::default()
    };
    assert!(execute_wall_plan(&mut backend, &plan()).is_err());
    assert_eq!(backend.calls, vec!["draw_content", "write_stencil"]);
}

#[test]
fn stencil_pass_marks_holes_without_color_or_depth() {
    let plan = plan();
    let stencil = plan.stencil();
    assert!(!stencil.color_write);
    assert!(!stencil.depth_write);
    assert_eq!(stencil.stencil.func, StencilFunc::Always);
    assert_eq!(stencil.stencil.pass_op, StencilOp::Replace);
    assert_eq!(stencil.holes.len(), 2);
    assert_eq!(stencil.holes[1].center, Point::new(5.5, 0.0));
}

#[test]
fn wall_rejects_hole_pixels() {
    let plan = plan();
    let wall = plan.wall();
    assert_eq!(wall.stencil.func, StencilFunc::NotEqual);
    assert_eq!(wall.stencil.reference, plan.stencil().stencil.reference);
    assert_eq!(wall.stencil.pass_op, StencilOp::Keep);
    assert_eq!(wall.rings[0].inner_radius, 2.0);
    assert!(wall.rings[0].outer_radius > wall.rings[0].inner_radius);
}

#[test]
fn content_planes_carry_depth_and_blend() {
    let plan = plan();
    let planes = &plan.content().planes;
    assert_eq!(planes[0].z, -1.0);
    assert_eq!(planes[0].active_visual, ActiveVisual::Live);
    assert_eq!(planes[1].z, -0.05);
    assert_eq!(planes[1].blend_factor, 0.0);
}

#[test]
fn only_tracking_portals_are_cut_out() {
    let plan = plan_with([PlaneDepthRule::Tracking, PlaneDepthRule::Resting]);
    assert_eq!(hole_portals(&plan), vec![0]);
    // Resting portals still get their plane and frame ring.
    assert_eq!(plan.content().planes.len(), 2);
    assert_eq!(plan.wall().rings.len(), 2);

    let plan = plan_with([PlaneDepthRule::Resting, PlaneDepthRule::Tracking]);
    assert_eq!(hole_portals(&plan), vec![1]);
    assert_eq!(hole_portals(&plan_with([PlaneDepthRule::Resting; 2])), Vec::<PortalIndex>::new());
}

#[test]
fn empty_gallery_yields_empty_passes_in_order() {
    let plan = WallPlan::build(std::iter::empty());
    assert!(plan.content().planes.is_empty());
    assert!(plan.stencil().holes.is_empty());
    let mut backend = MockBackend::default();
    execute_wall_plan(&mut backend, &plan).unwrap();
    assert_eq!(backend.calls, vec!["draw_content", "write_stencil", "draw_wall"]);
}

#[test]
fn serialized_plan_lists_passes_in_draw_order() {
    let json = serde_json::to_string(&plan()).unwrap();
    let content = json.find("\"content\"").unwrap();
    let stencil = json.find("\"stencil\"").unwrap();
    let wall = json.find("\"wall\"").unwrap();
    assert!(content < stencil && stencil < wall);
}
