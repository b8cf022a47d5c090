use crate::{
    choreo::{controller::TransitionState, timeline::Phase},
    foundation::{
        core::PortalIndex,
        error::{GalleryError, GalleryResult},
    },
};

/// Placement of portal content planes along the view axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DepthParams {
    /// Distance kept between the camera and a tracking content plane.
    pub viewport_distance: f64,
    /// Depth of an idle content plane, just behind the wall at `z = 0`.
    pub resting_z: f64,
}

impl Default for DepthParams {
    fn default() -> Self {
        Self {
            viewport_distance: 3.0,
            resting_z: -0.05,
        }
    }
}

impl DepthParams {
    pub fn validate(&self) -> GalleryResult<()> {
        if !self.viewport_distance.is_finite() || self.viewport_distance <= 0.0 {
            return Err(GalleryError::validation(
                "depth viewport_distance must be finite and > 0",
            ));
        }
        if !self.resting_z.is_finite() || self.resting_z > 0.0 {
            return Err(GalleryError::validation(
                "depth resting_z must be finite and <= 0 (behind the wall)",
            ));
        }
        Ok(())
    }
}

/// How a portal's content plane is placed this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDepthRule {
    /// Follow the camera, never passing in front of the resting depth.
    Tracking,
    /// Sit at the resting depth behind the wall.
    Resting,
}

/// `min(camera_z - viewport_distance, resting_z)`.
pub fn tracking_z(camera_z: f64, params: &DepthParams) -> f64 {
    (camera_z - params.viewport_distance).min(params.resting_z)
}

pub fn depth_rule(state: &TransitionState, portal: PortalIndex) -> PlaneDepthRule {
    let engaged = match state.phase {
        Phase::Immersed | Phase::Exiting | Phase::Overview => portal == state.from_portal,
        Phase::Panning => portal == state.from_portal || portal == state.to_portal,
        Phase::Entering => portal == state.to_portal,
    };
    if engaged {
        PlaneDepthRule::Tracking
    } else {
        PlaneDepthRule::Resting
    }
}

/// Content-plane depth of every portal, recomputed from the camera each frame.
pub fn content_depths(
    state: &TransitionState,
    camera_z: f64,
    portal_count: usize,
    params: &DepthParams,
) -> Vec<f64> {
    let tracking = tracking_z(camera_z, params);
    (0..portal_count)
        .map(|portal| match depth_rule(state, portal) {
            PlaneDepthRule::Tracking => tracking,
            PlaneDepthRule::Resting => params.resting_z,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/depth.rs"]
mod tests;
