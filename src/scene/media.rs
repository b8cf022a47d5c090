use crate::foundation::{core::clamp_unit, error::GalleryResult};

/// Blend above which a stopped stream is lazily resumed by [`SceneManager::fade_to_live`].
pub const LIVE_RESUME_THRESHOLD: f64 = 0.1;
/// Fade progress above which [`SceneManager::fade_to_static`] stops the stream.
pub const STATIC_STOP_THRESHOLD: f64 = 0.9;
/// Blend at and above which the live stream is the active visual.
pub const LIVE_MIDPOINT: f64 = 0.5;

/// Continuous media handle (a decoded video stream in practice).
///
/// Decode and upload run elsewhere; the engine only starts, stops and polls readiness.
pub trait MediaStream {
    fn play(&mut self) -> GalleryResult<()>;

    fn pause(&mut self) -> GalleryResult<()>;

    fn is_ready(&self) -> bool;

    fn release(&mut self) -> GalleryResult<()>;
}

/// Static fallback image handle.
pub trait StillImage {
    fn is_ready(&self) -> bool;

    fn release(&mut self) -> GalleryResult<()>;
}

/// Which of the two visuals a portal currently presents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveVisual {
    Static,
    Live,
}

/// Per-frame media summary handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MediaStatus {
    pub blend_factor: f64,
    pub active_visual: ActiveVisual,
    pub playing: bool,
    pub stream_ready: bool,
}

/// Owns one portal's stream, its fallback image and the blend between them.
///
/// `blend_factor` is `0` for fully static and `1` for fully live. It only changes through
/// [`fade_to_live`](Self::fade_to_live) / [`fade_to_static`](Self::fade_to_static), which the
/// gallery calls once per frame. Playback rejections are logged; the next threshold crossing
/// or explicit [`play`](Self::play) retries.
pub struct SceneManager {
    portal_id: String,
    stream: Option<Box<dyn MediaStream>>,
    still: Option<Box<dyn StillImage>>,
    blend_factor: f64,
    playing: bool,
}

impl SceneManager {
    pub fn new(
        portal_id: impl Into<String>,
        stream: Box<dyn MediaStream>,
        still: Box<dyn StillImage>,
    ) -> Self {
        Self {
            portal_id: portal_id.into(),
            stream: Some(stream),
            still: Some(still),
            blend_factor: 0.0,
            playing: false,
        }
    }

    pub fn portal_id(&self) -> &str {
        &self.portal_id
    }

    pub fn blend_factor(&self) -> f64 {
        self.blend_factor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_disposed(&self) -> bool {
        self.stream.is_none() && self.still.is_none()
    }

    pub fn stream_ready(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_ready())
    }

    pub fn still_ready(&self) -> bool {
        self.still.as_ref().is_some_and(|s| s.is_ready())
    }

    pub fn active_visual(&self) -> ActiveVisual {
        if self.blend_factor >= LIVE_MIDPOINT {
            ActiveVisual::Live
        } else {
            ActiveVisual::Static
        }
    }

    pub fn status(&self) -> MediaStatus {
        MediaStatus {
            blend_factor: self.blend_factor,
            active_visual: self.active_visual(),
            playing: self.playing,
            stream_ready: self.stream_ready(),
        }
    }

    /// Start the stream. A rejection leaves the manager "not playing".
    pub fn play(&mut self) {
        let Some(stream) = self.stream.as_mut() else {
            return;
        };
        match stream.play() {
            Ok(()) => self.playing = true,
            Err(err) => {
                tracing::warn!(portal = %self.portal_id, %err, "stream play rejected");
                self.playing = false;
            }
        }
    }

    pub fn pause(&mut self) {
        let Some(stream) = self.stream.as_mut() else {
            return;
        };
        match stream.pause() {
            Ok(()) => self.playing = false,
            Err(err) => {
                tracing::warn!(portal = %self.portal_id, %err, "stream pause rejected");
            }
        }
    }

    /// Set the blend to `progress`; resumes a stopped stream when the blend crosses above
    /// [`LIVE_RESUME_THRESHOLD`].
    ///
    /// Only the crossing triggers a play. Holding above the threshold does not retry a
    /// rejection or override an explicit [`pause`](Self::pause).
    pub fn fade_to_live(&mut self, progress: f64) {
        let progress = clamp_unit(progress);
        let previous = self.blend_factor;
        self.blend_factor = progress;
        if previous <= LIVE_RESUME_THRESHOLD && progress > LIVE_RESUME_THRESHOLD && !self.playing {
            self.play();
        }
    }

    /// Mirror of [`fade_to_live`](Self::fade_to_live); stops the stream when `progress`
    /// crosses above [`STATIC_STOP_THRESHOLD`].
    pub fn fade_to_static(&mut self, progress: f64) {
        let progress = clamp_unit(progress);
        let previous = 1.0 - self.blend_factor;
        self.blend_factor = 1.0 - progress;
        if previous <= STATIC_STOP_THRESHOLD && progress > STATIC_STOP_THRESHOLD && self.playing {
            self.pause();
        }
    }

    /// Release both handles. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if self.playing
                && let Err(err) = stream.pause()
            {
                tracing::warn!(portal = %self.portal_id, %err, "stream pause failed during dispose");
            }
            if let Err(err) = stream.release() {
                tracing::warn!(portal = %self.portal_id, %err, "stream release failed");
            }
        }
        if let Some(mut still) = self.still.take()
            && let Err(err) = still.release()
        {
            tracing::warn!(portal = %self.portal_id, %err, "still image release failed");
        }
        self.playing = false;
        self.blend_factor = 0.0;
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("portal_id", &self.portal_id)
            .field("blend_factor", &self.blend_factor)
            .field("playing", &self.playing)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/media.rs"]
mod tests;
