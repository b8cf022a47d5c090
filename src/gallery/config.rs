use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    choreo::{camera::CameraParams, timeline::PhaseDurations},
    compositor::depth::DepthParams,
    foundation::{
        core::{Point, PortalIndex},
        error::{GalleryError, GalleryResult},
    },
    path::polyline::RouteStyle,
    scene::portal::FrameConfig,
    trail::light_trail::TrailParams,
};

/// Everything needed to assemble a gallery.
///
/// All tuning blocks default, so a JSON file may list only the portals. The single
/// [`PhaseDurations`] here feeds both the controller and the camera.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalleryConfig {
    pub portals: Vec<FrameConfig>,
    #[serde(default)]
    pub initial_portal: PortalIndex,
    #[serde(default)]
    pub durations: PhaseDurations,
    #[serde(default)]
    pub camera: CameraParams,
    #[serde(default)]
    pub route: RouteStyle,
    #[serde(default)]
    pub depth: DepthParams,
    #[serde(default)]
    pub trail: TrailParams,
    /// Easing of the live/static crossfade inside `exiting` and `entering`.
    #[serde(default)]
    pub crossfade_ease: Ease,
}

impl GalleryConfig {
    pub fn new(portals: Vec<FrameConfig>) -> Self {
        Self {
            portals,
            initial_portal: 0,
            durations: PhaseDurations::default(),
            camera: CameraParams::default(),
            route: RouteStyle::default(),
            depth: DepthParams::default(),
            trail: TrailParams::default(),
            crossfade_ease: Ease::default(),
        }
    }

    /// Two portals facing each other across the wall at x = ±5.5.
    pub fn two_portal_demo() -> Self {
        Self::new(vec![
            FrameConfig::new(
                "a",
                Point::new(-5.5, 0.0),
                2.0,
                "media/a.mp4",
                "media/a.jpg",
            ),
            FrameConfig::new(
                "b",
                Point::new(5.5, 0.0),
                2.0,
                "media/b.mp4",
                "media/b.jpg",
            ),
        ])
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> GalleryResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| GalleryError::config(format!("parse gallery JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> GalleryResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> GalleryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GalleryError::config(format!("open gallery JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if self.portals.is_empty() {
            return Err(GalleryError::validation(
                "gallery needs at least one portal",
            ));
        }
        if self.initial_portal >= self.portals.len() {
            return Err(GalleryError::validation(format!(
                "initial_portal {} out of range (have {} portals)",
                self.initial_portal,
                self.portals.len()
            )));
        }
        for (idx, portal) in self.portals.iter().enumerate() {
            portal.validate()?;
            if self.portals[..idx].iter().any(|p| p.id == portal.id) {
                return Err(GalleryError::validation(format!(
                    "duplicate portal id '{}'",
                    portal.id
                )));
            }
        }
        self.durations.validate()?;
        self.camera.validate()?;
        self.depth.validate()?;
        self.trail.validate()?;
        if !self.route.lane_offset.is_finite() || !self.route.chamfer.is_finite() {
            return Err(GalleryError::validation("route style must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/config.rs"]
mod tests;
