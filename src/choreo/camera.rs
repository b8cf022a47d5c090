use crate::{
    animation::ease::Ease,
    choreo::{
        controller::TransitionState,
        timeline::{Phase, PhaseDurations},
    },
    foundation::{
        core::{DVec3, Point, at_depth, clamp_unit},
        error::{GalleryError, GalleryResult},
    },
    path::polyline::{PathPolyline, RouteStyle},
};

/// Camera depth profile and channel easing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Camera Z while immersed in a portal (close to the wall at `z = 0`).
    pub immersed_z: f64,
    /// Camera Z while pulled back to see the whole wall.
    pub overview_z: f64,
    /// Fraction of the exiting and entering shares that lateral motion overlaps.
    ///
    /// `0` keeps lateral motion strictly inside overview+panning; `1` spans the whole transition.
    pub lateral_overlap: f64,
    pub depth_ease: Ease,
    pub lateral_ease: Ease,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            immersed_z: 2.0,
            overview_z: 14.0,
            lateral_overlap: 0.5,
            depth_ease: Ease::InOutCubic,
            lateral_ease: Ease::InOutCubic,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> GalleryResult<()> {
        if !self.immersed_z.is_finite() || !self.overview_z.is_finite() {
            return Err(GalleryError::validation("camera depths must be finite"));
        }
        if self.overview_z <= self.immersed_z {
            return Err(GalleryError::validation(
                "camera overview_z must be greater than immersed_z",
            ));
        }
        if !(0.0..=1.0).contains(&self.lateral_overlap) {
            return Err(GalleryError::validation(
                "camera lateral_overlap must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Maps global progress to a camera position.
///
/// Two channels run on overlapping windows of global progress:
/// - depth eases out to `overview_z` over the exiting share and back in over the entering share;
/// - lateral motion sweeps the route from the *from* portal to the *to* portal, starting while
///   the camera is still retreating and ending while it is already advancing.
///
/// Orientation is never touched; see [`CAMERA_FORWARD`](crate::CAMERA_FORWARD).
#[derive(Clone, Debug)]
pub struct CameraDirector {
    durations: PhaseDurations,
    params: CameraParams,
    route: RouteStyle,
}

impl CameraDirector {
    pub fn new(
        durations: PhaseDurations,
        params: CameraParams,
        route: RouteStyle,
    ) -> GalleryResult<Self> {
        durations.validate()?;
        params.validate()?;
        Ok(Self {
            durations,
            params,
            route,
        })
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    pub fn phase_to_global(&self, phase: Phase, local: f64) -> f64 {
        self.durations.phase_to_global(phase, local)
    }

    /// Global-progress window of the lateral sweep.
    pub fn lateral_window(&self) -> (f64, f64) {
        let (_, exit_end) = self.durations.share(Phase::Exiting);
        let (enter_start, _) = self.durations.share(Phase::Entering);
        let overlap = self.params.lateral_overlap;
        (
            exit_end * (1.0 - overlap),
            enter_start + (1.0 - enter_start) * overlap,
        )
    }

    /// The route both the camera and the light trail follow between two portals.
    pub fn route(&self, from: Point, to: Point) -> PathPolyline {
        PathPolyline::trace_route(from, to, self.route)
    }

    pub fn immersed_position(&self, portal: Point) -> DVec3 {
        at_depth(portal, self.params.immersed_z)
    }

    pub fn depth_at(&self, global: f64) -> f64 {
        let g = clamp_unit(global);
        let (_, exit_end) = self.durations.share(Phase::Exiting);
        let (enter_start, _) = self.durations.share(Phase::Entering);
        let CameraParams {
            immersed_z,
            overview_z,
            depth_ease,
            ..
        } = self.params;

        if g <= exit_end {
            let t = depth_ease.window(g, 0.0, exit_end);
            immersed_z + (overview_z - immersed_z) * t
        } else if g < enter_start {
            overview_z
        } else {
            let t = depth_ease.window(g, enter_start, 1.0);
            overview_z + (immersed_z - overview_z) * t
        }
    }

    pub fn lateral_at(&self, global: f64, path: &PathPolyline) -> Point {
        let (start, end) = self.lateral_window();
        let t = self.params.lateral_ease.window(clamp_unit(global), start, end);
        path.point_at(t)
    }

    pub fn position_at(&self, global: f64, path: &PathPolyline) -> DVec3 {
        at_depth(self.lateral_at(global, path), self.depth_at(global))
    }

    /// Camera position for a controller snapshot, reusing a route already built for the
    /// snapshot's endpoints.
    pub fn evaluate_on(&self, state: &TransitionState, path: &PathPolyline) -> DVec3 {
        self.position_at(state.global_progress(&self.durations), path)
    }

    /// Camera position for a controller snapshot between the two portal positions.
    pub fn evaluate(&self, state: &TransitionState, from: Point, to: Point) -> DVec3 {
        self.evaluate_on(state, &self.route(from, to))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/camera.rs"]
mod tests;
