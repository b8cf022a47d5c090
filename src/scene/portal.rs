use crate::foundation::{
    core::{Point, is_finite_point},
    error::{GalleryError, GalleryResult},
};

/// One wall-mounted portal.
///
/// Immutable after construction; the gallery creates one per wall position at startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameConfig {
    pub id: String,
    /// Center of the portal on the wall plane (`z = 0`).
    pub position: Point,
    /// Radius of the hole cut into the wall.
    pub radius: f64,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    /// How far the frame ring is extruded out of the wall.
    #[serde(default = "default_depth")]
    pub depth: f64,
    /// Continuous media source (video stream).
    pub stream_source: String,
    /// Static fallback image shown while the stream is not live.
    pub fallback_source: String,
}

fn default_border_width() -> f64 {
    0.12
}

fn default_depth() -> f64 {
    0.2
}

impl FrameConfig {
    pub fn new(
        id: impl Into<String>,
        position: Point,
        radius: f64,
        stream_source: impl Into<String>,
        fallback_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            radius,
            border_width: default_border_width(),
            depth: default_depth(),
            stream_source: stream_source.into(),
            fallback_source: fallback_source.into(),
        }
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if self.id.trim().is_empty() {
            return Err(GalleryError::validation("portal id must be non-empty"));
        }
        if !is_finite_point(self.position) {
            return Err(GalleryError::validation(format!(
                "portal '{}' position must be finite",
                self.id
            )));
        }
        for (name, value) in [
            ("radius", self.radius),
            ("border_width", self.border_width),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GalleryError::validation(format!(
                    "portal '{}' {name} must be finite and >= 0",
                    self.id
                )));
            }
        }
        if self.radius == 0.0 {
            return Err(GalleryError::validation(format!(
                "portal '{}' radius must be > 0",
                self.id
            )));
        }
        for (name, source) in [
            ("stream_source", &self.stream_source),
            ("fallback_source", &self.fallback_source),
        ] {
            if source.trim().is_empty() {
                return Err(GalleryError::validation(format!(
                    "portal '{}' {name} must be non-empty",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Outer radius of the frame ring around the hole.
    pub fn outer_radius(&self) -> f64 {
        self.radius + self.border_width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/portal.rs"]
mod tests;
