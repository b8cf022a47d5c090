use crate::{
    animation::ease::{Ease, edge_envelope, smoothstep},
    foundation::{
        core::{DVec3, Point, clamp_unit, lateral},
        error::{GalleryError, GalleryResult},
    },
    path::polyline::PathPolyline,
};

/// Cross-section falloff of the trail glow.
///
/// Contract: `alpha_at(d)` is `1` within `core_width` of the centerline, falls smoothly to `0`
/// across `halo_width`, and is `0` beyond. Renderers may evaluate this on the GPU.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlowFalloff {
    pub core_width: f64,
    pub halo_width: f64,
}

impl Default for GlowFalloff {
    fn default() -> Self {
        Self {
            core_width: 0.04,
            halo_width: 0.25,
        }
    }
}

impl GlowFalloff {
    /// Glow opacity at `distance` from the trail's centerline. A non-finite distance is outside
    /// the glow.
    pub fn alpha_at(&self, distance: f64) -> f64 {
        if !distance.is_finite() {
            return 0.0;
        }
        let d = distance.abs();
        if d <= self.core_width {
            return 1.0;
        }
        if self.halo_width <= 0.0 {
            return 0.0;
        }
        let fade = 1.0 - smoothstep(0.0, 1.0, (d - self.core_width) / self.halo_width);
        fade * fade
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrailParams {
    /// Head marker scale at full strength.
    pub head_scale: f64,
    /// Point-light intensity at full strength.
    pub light_intensity: f64,
    /// Span of global progress over which head and light ramp in and out.
    pub fade_span: f64,
    pub reveal_ease: Ease,
    pub glow: GlowFalloff,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            head_scale: 0.35,
            light_intensity: 2.5,
            fade_span: 0.12,
            reveal_ease: Ease::InOutCubic,
            glow: GlowFalloff::default(),
        }
    }
}

impl TrailParams {
    pub fn validate(&self) -> GalleryResult<()> {
        for (name, value) in [
            ("head_scale", self.head_scale),
            ("light_intensity", self.light_intensity),
            ("glow.core_width", self.glow.core_width),
            ("glow.halo_width", self.glow.halo_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GalleryError::validation(format!(
                    "trail {name} must be finite and >= 0"
                )));
            }
        }
        if !(0.0..=0.5).contains(&self.fade_span) {
            return Err(GalleryError::validation(
                "trail fade_span must be within [0, 0.5]",
            ));
        }
        Ok(())
    }
}

/// What the renderer needs to draw the trail this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrailState {
    pub visible: bool,
    /// Fraction of the route revealed (eased global progress).
    pub revealed: f64,
    /// Waypoints of the revealed part of the route.
    pub revealed_points: Vec<Point>,
    /// Head marker position: the camera's lateral position, not the route sample.
    pub head: Point,
    pub head_scale: f64,
    pub light_intensity: f64,
}

/// Renderer seam for the glow geometry and head light.
pub trait TrailBackend {
    fn draw_trail(&mut self, state: &TrailState, glow: &GlowFalloff) -> GalleryResult<()>;
}

/// Glowing route between the two transition endpoints, revealed in step with the camera.
#[derive(Clone, Debug)]
pub struct LightTrail {
    params: TrailParams,
    path: PathPolyline,
    visible: bool,
}

impl LightTrail {
    pub fn new(params: TrailParams, path: PathPolyline) -> GalleryResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            path,
            visible: false,
        })
    }

    pub fn params(&self) -> &TrailParams {
        &self.params
    }

    pub fn path(&self) -> &PathPolyline {
        &self.path
    }

    pub fn set_path(&mut self, path: PathPolyline) {
        self.path = path;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Sample the trail for the shared global progress and the camera position of this frame.
    pub fn update(&self, global_progress: f64, camera: DVec3) -> TrailState {
        let g = clamp_unit(global_progress);
        let revealed = self.params.reveal_ease.apply(g);
        let strength = if self.visible {
            edge_envelope(g, self.params.fade_span)
        } else {
            0.0
        };
        TrailState {
            visible: self.visible,
            revealed,
            revealed_points: self.path.prefix(revealed),
            head: lateral(camera),
            head_scale: self.params.head_scale * strength,
            light_intensity: self.params.light_intensity * strength,
        }
    }

    /// Hand a sampled state to the renderer; invisible trails issue no draw.
    pub fn render<B: TrailBackend + ?Sized>(
        &self,
        backend: &mut B,
        state: &TrailState,
    ) -> GalleryResult<()> {
        if !state.visible {
            return Ok(());
        }
        backend.draw_trail(state, &self.params.glow)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/light_trail.rs"]
mod tests;
