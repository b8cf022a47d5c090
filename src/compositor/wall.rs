use crate::{
    compositor::depth::PlaneDepthRule,
    foundation::{
        core::{Point, PortalIndex},
        error::GalleryResult,
    },
    scene::{
        media::{ActiveVisual, MediaStatus},
        portal::FrameConfig,
    },
};

/// Stencil value written where a portal hole is.
pub const HOLE_STENCIL_REF: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StencilFunc {
    Always,
    NotEqual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StencilOp {
    Keep,
    Replace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StencilState {
    pub func: StencilFunc,
    pub reference: u8,
    pub pass_op: StencilOp,
}

/// Everything the wall plan needs to know about one portal this frame.
#[derive(Clone, Copy, Debug)]
pub struct PortalLayer<'a> {
    pub config: &'a FrameConfig,
    /// Content-plane depth from [`content_depths`](crate::compositor::depth::content_depths).
    pub z: f64,
    pub media: MediaStatus,
    /// Only [`PlaneDepthRule::Tracking`] portals are cut out of the wall.
    pub rule: PlaneDepthRule,
}

/// One portal's media quad at its computed depth.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContentPlane {
    pub portal: PortalIndex,
    pub center: Point,
    pub z: f64,
    pub radius: f64,
    /// Live/static mix; the renderer blends the two visuals by this factor.
    pub blend_factor: f64,
    pub active_visual: ActiveVisual,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HoleShape {
    pub portal: PortalIndex,
    pub center: Point,
    pub radius: f64,
}

/// Extruded ring drawn around a hole as part of the wall.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameRing {
    pub portal: PortalIndex,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub depth: f64,
}

/// Pass 1: draw content planes with depth test and write.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContentPass {
    pub planes: Vec<ContentPlane>,
}

/// Pass 2: write hole shapes into the stencil buffer only.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StencilPass {
    pub holes: Vec<HoleShape>,
    pub stencil: StencilState,
    pub color_write: bool,
    pub depth_write: bool,
}

/// Pass 3: draw the opaque wall everywhere the stencil does not mark a hole.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WallPass {
    pub stencil: StencilState,
    pub rings: Vec<FrameRing>,
}

/// Borrowed view of one pass, yielded in draw order by [`WallPlan::passes`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompositorPass<'a> {
    Content(&'a ContentPass),
    Stencil(&'a StencilPass),
    Wall(&'a WallPass),
}

/// The per-frame draw sequence that cuts portal holes into the wall.
///
/// The order content -> stencil -> wall is fixed by construction: the wall must be drawn after
/// the holes are marked, or it covers them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WallPlan {
    content: ContentPass,
    stencil: StencilPass,
    wall: WallPass,
}

impl WallPlan {
    /// Assemble the three passes from each portal's layer, in portal order.
    ///
    /// Every portal keeps its content plane and frame ring, but only engaged (tracking) portals
    /// get a stencil hole; resting content stays hidden behind the wall.
    pub fn build<'a>(portals: impl IntoIterator<Item = PortalLayer<'a>>) -> Self {
        let mut planes = Vec::new();
        let mut holes = Vec::new();
        let mut rings = Vec::new();

        for (portal, layer) in portals.into_iter().enumerate() {
            let cfg = layer.config;
            planes.push(ContentPlane {
                portal,
                center: cfg.position,
                z: layer.z,
                radius: cfg.radius,
                blend_factor: layer.media.blend_factor,
                active_visual: layer.media.active_visual,
            });
            if layer.rule == PlaneDepthRule::Tracking {
                holes.push(HoleShape {
                    portal,
                    center: cfg.position,
                    radius: cfg.radius,
                });
            }
            rings.push(FrameRing {
                portal,
                center: cfg.position,
                inner_radius: cfg.radius,
                outer_radius: cfg.outer_radius(),
                depth: cfg.depth,
            });
        }

        Self {
            content: ContentPass { planes },
            stencil: StencilPass {
                holes,
                stencil: StencilState {
                    func: StencilFunc::Always,
                    reference: HOLE_STENCIL_REF,
                    pass_op: StencilOp::Replace,
                },
                color_write: false,
                depth_write: false,
            },
            wall: WallPass {
                stencil: StencilState {
                    func: StencilFunc::NotEqual,
                    reference: HOLE_STENCIL_REF,
                    pass_op: StencilOp::Keep,
                },
                rings,
            },
        }
    }

    pub fn passes(&self) -> [CompositorPass<'_>; 3] {
        [
            CompositorPass::Content(&self.content),
            CompositorPass::Stencil(&self.stencil),
            CompositorPass::Wall(&self.wall),
        ]
    }

    pub fn content(&self) -> &ContentPass {
        &self.content
    }

    pub fn stencil(&self) -> &StencilPass {
        &self.stencil
    }

    pub fn wall(&self) -> &WallPass {
        &self.wall
    }
}

/// Renderer seam: issues the actual draw calls for each pass.
pub trait WallBackend {
    fn draw_content(&mut self, pass: &ContentPass) -> GalleryResult<()>;

    fn write_stencil(&mut self, pass: &StencilPass) -> GalleryResult<()>;

    fn draw_wall(&mut self, pass: &WallPass) -> GalleryResult<()>;
}

pub fn execute_wall_plan<B: WallBackend + ?Sized>(
    backend: &mut B,
    plan: &WallPlan,
) -> GalleryResult<()> {
    for pass in plan.passes() {
        match pass {
            CompositorPass::Content(p) => backend.draw_content(p)?,
            CompositorPass::Stencil(p) => backend.write_stencil(p)?,
            CompositorPass::Wall(p) => backend.draw_wall(p)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/wall.rs"]
mod tests;
