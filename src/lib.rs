//! Frame gallery is a choreography engine for a wall of portals.
//!
//! Each portal is a framed hole in an opaque wall with a live stream behind it. The viewer sits
//! immersed in one portal; a transition pulls the camera back to an overview, pans along a
//! routed path to another portal and pushes into it, while the media crossfades and a glowing
//! trail traces the route.
//!
//! # Pipeline overview
//!
//! One [`TransitionController`] owns time. Every frame, [`GalleryDirector::step`] takes its
//! snapshot and derives, in order:
//!
//! 1. **Camera**: [`CameraDirector`] maps global progress to a position on the route.
//! 2. **Depths**: [`content_depths`] keeps engaged content planes behind the camera.
//! 3. **Media**: [`media_cues`] drives each [`SceneManager`] between still and live.
//! 4. **Wall**: [`WallPlan`] orders the content, stencil and wall passes.
//! 5. **Trail**: [`LightTrail`] reveals the route and follows the camera.
//!
//! Rendering and media decoding stay behind the [`WallBackend`], [`TrailBackend`],
//! [`MediaStream`] and [`StillImage`] traits.
#![forbid(unsafe_code)]

mod animation {
    pub mod ease;
}
mod choreo {
    pub mod camera;
    pub mod controller;
    pub mod timeline;
}
mod compositor {
    pub mod depth;
    pub mod media_cues;
    pub mod wall;
}
mod foundation {
    pub mod core;
    pub mod error;
}
mod gallery {
    pub mod config;
    pub mod director;
}
mod path {
    pub mod polyline;
}
mod scene {
    pub mod media;
    pub mod portal;
}
mod trail {
    pub mod light_trail;
}

pub use animation::ease::{Ease, edge_envelope, smoothstep};
pub use choreo::camera::{CameraDirector, CameraParams};
pub use choreo::controller::{PhaseListener, TransitionController, TransitionState};
pub use choreo::timeline::{Phase, PhaseDurations};
pub use compositor::depth::{DepthParams, PlaneDepthRule, content_depths, depth_rule, tracking_z};
pub use compositor::media_cues::{MediaCue, media_cues};
pub use compositor::wall::{
    CompositorPass, ContentPass, ContentPlane, FrameRing, HOLE_STENCIL_REF, HoleShape,
    PortalLayer, StencilFunc, StencilOp, StencilPass, StencilState, WallBackend, WallPass, WallPlan,
    execute_wall_plan,
};
pub use foundation::core::{CAMERA_FORWARD, DVec3, Point, PortalIndex, at_depth, lateral};
pub use foundation::error::{GalleryError, GalleryResult};
pub use gallery::config::GalleryConfig;
pub use gallery::director::{FrameOutputs, GalleryDirector, MediaLoader, PortalMedia};
pub use path::polyline::{PathPolyline, RouteStyle};
pub use scene::media::{
    ActiveVisual, LIVE_MIDPOINT, LIVE_RESUME_THRESHOLD, MediaStatus, MediaStream,
    STATIC_STOP_THRESHOLD, SceneManager, StillImage,
};
pub use scene::portal::FrameConfig;
pub use trail::light_trail::{GlowFalloff, LightTrail, TrailBackend, TrailParams, TrailState};
