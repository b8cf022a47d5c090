use crate::{
    choreo::{
        camera::CameraDirector,
        controller::{TransitionController, TransitionState},
        timeline::Phase,
    },
    compositor::{
        depth::{content_depths, depth_rule},
        media_cues::media_cues,
        wall::{PortalLayer, WallBackend, WallPlan, execute_wall_plan},
    },
    foundation::{
        core::{CAMERA_FORWARD, DVec3, PortalIndex},
        error::{GalleryError, GalleryResult},
    },
    gallery::config::GalleryConfig,
    path::polyline::PathPolyline,
    scene::{
        media::{MediaStatus, MediaStream, SceneManager, StillImage},
        portal::FrameConfig,
    },
    trail::light_trail::{LightTrail, TrailBackend, TrailState},
};

/// The two media handles a portal needs.
pub struct PortalMedia {
    pub stream: Box<dyn MediaStream>,
    pub still: Box<dyn StillImage>,
}

/// Opens the stream and fallback image for a portal while the gallery is assembled.
///
/// Implemented for closures, so tests and headless hosts can pass `|cfg| Ok(PortalMedia { .. })`.
pub trait MediaLoader {
    fn open(&mut self, portal: &FrameConfig) -> GalleryResult<PortalMedia>;
}

impl<F> MediaLoader for F
where
    F: FnMut(&FrameConfig) -> GalleryResult<PortalMedia>,
{
    fn open(&mut self, portal: &FrameConfig) -> GalleryResult<PortalMedia> {
        self(portal)
    }
}

/// Everything one frame produced, in pipeline order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameOutputs {
    /// Seconds simulated since the director was built.
    pub time: f64,
    pub state: TransitionState,
    pub global_progress: f64,
    pub camera_position: DVec3,
    pub camera_forward: DVec3,
    pub portal_depths: Vec<f64>,
    pub media: Vec<MediaStatus>,
    pub wall: WallPlan,
    pub trail: TrailState,
}

/// Route between the endpoints of the current snapshot, rebuilt only when they change.
#[derive(Clone, Debug)]
struct ActiveRoute {
    from: PortalIndex,
    to: PortalIndex,
    path: PathPolyline,
}

/// Runs the whole frame gallery: one controller owns time and every other part reads the same
/// snapshot each frame.
///
/// Per frame: controller, camera, content-plane depths, media crossfades, wall plan, trail.
pub struct GalleryDirector {
    config: GalleryConfig,
    controller: TransitionController,
    camera: CameraDirector,
    scenes: Vec<SceneManager>,
    route: ActiveRoute,
    trail: LightTrail,
    time: f64,
}

impl GalleryDirector {
    #[tracing::instrument(skip(config, loader), fields(portals = config.portals.len()))]
    pub fn new(config: GalleryConfig, mut loader: impl MediaLoader) -> GalleryResult<Self> {
        config.validate()?;

        let controller = TransitionController::new(config.initial_portal, config.durations)?;
        let camera = CameraDirector::new(config.durations, config.camera, config.route)?;

        let mut scenes = Vec::with_capacity(config.portals.len());
        for portal in &config.portals {
            let media = loader.open(portal).map_err(|err| {
                GalleryError::media(format!("open media for portal '{}': {err}", portal.id))
            })?;
            scenes.push(SceneManager::new(&portal.id, media.stream, media.still));
        }

        let initial = config.initial_portal;
        let anchor = config.portals[initial].position;
        let path = camera.route(anchor, anchor);
        let trail = LightTrail::new(config.trail, path.clone())?;

        tracing::info!(initial = %config.portals[initial].id, "gallery ready");
        Ok(Self {
            controller,
            camera,
            scenes,
            route: ActiveRoute {
                from: initial,
                to: initial,
                path,
            },
            trail,
            time: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn portal_count(&self) -> usize {
        self.config.portals.len()
    }

    pub fn state(&self) -> TransitionState {
        self.controller.state()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn scenes(&self) -> &[SceneManager] {
        &self.scenes
    }

    pub fn trail(&self) -> &LightTrail {
        &self.trail
    }

    pub fn camera(&self) -> &CameraDirector {
        &self.camera
    }

    pub fn on_phase_change(&mut self, listener: impl FnMut(Phase) + 'static) {
        self.controller.on_phase_change(listener);
    }

    /// Ask for a transition to `to`.
    ///
    /// `Ok(false)` when a transition is already running or `to` is the portal already settled
    /// in; an out-of-range index is an error.
    #[tracing::instrument(skip(self))]
    pub fn request_transition(&mut self, to: PortalIndex) -> GalleryResult<bool> {
        if to >= self.portal_count() {
            return Err(GalleryError::validation(format!(
                "portal index {to} out of range (have {} portals)",
                self.portal_count()
            )));
        }
        if self.controller.is_running() {
            tracing::debug!("transition already running");
            return Ok(false);
        }
        if self.controller.state().from_portal == to {
            tracing::debug!("already immersed in requested portal");
            return Ok(false);
        }
        Ok(self.controller.start_transition(to))
    }

    /// Transition to the next portal in order, wrapping around.
    pub fn advance(&mut self) -> GalleryResult<bool> {
        let next = (self.controller.state().from_portal + 1) % self.portal_count();
        self.request_transition(next)
    }

    /// Advance one frame by `dt` seconds and sample every part from the same snapshot.
    ///
    /// A non-finite or negative `dt` counts as zero.
    pub fn step(&mut self, dt: f64) -> FrameOutputs {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            tracing::warn!(dt, "invalid frame delta; treating as 0");
            0.0
        };
        self.time += dt;

        self.controller.update(dt);
        let state = self.controller.state();
        self.sync_route(&state);

        let global_progress = state.global_progress(self.controller.durations());
        let camera_position = self.camera.position_at(global_progress, &self.route.path);

        let portal_count = self.portal_count();
        let portal_depths =
            content_depths(&state, camera_position.z, portal_count, &self.config.depth);

        let cues = media_cues(&state, portal_count, self.config.crossfade_ease);
        for (cue, scene) in cues.into_iter().zip(self.scenes.iter_mut()) {
            cue.apply(scene);
        }
        let media: Vec<MediaStatus> = self.scenes.iter().map(SceneManager::status).collect();

        let wall = WallPlan::build(
            self.config
                .portals
                .iter()
                .zip(portal_depths.iter().copied())
                .zip(media.iter().copied())
                .enumerate()
                .map(|(portal, ((config, z), media))| PortalLayer {
                    config,
                    z,
                    media,
                    rule: depth_rule(&state, portal),
                }),
        );

        self.trail.set_visible(state.phase != Phase::Immersed);
        let trail = self.trail.update(global_progress, camera_position);

        FrameOutputs {
            time: self.time,
            state,
            global_progress,
            camera_position,
            camera_forward: CAMERA_FORWARD,
            portal_depths,
            media,
            wall,
            trail,
        }
    }

    /// Issue the draw calls for one frame: wall passes first, then the trail on top.
    pub fn render<B>(&self, backend: &mut B, frame: &FrameOutputs) -> GalleryResult<()>
    where
        B: WallBackend + TrailBackend + ?Sized,
    {
        execute_wall_plan(backend, &frame.wall)?;
        self.trail.render(backend, &frame.trail)
    }

    /// Release every portal's media. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.scenes.iter().all(SceneManager::is_disposed) {
            return;
        }
        for scene in &mut self.scenes {
            scene.dispose();
        }
        tracing::info!("gallery torn down");
    }

    fn sync_route(&mut self, state: &TransitionState) {
        if self.route.from == state.from_portal && self.route.to == state.to_portal {
            return;
        }
        let from = self.config.portals[state.from_portal].position;
        let to = self.config.portals[state.to_portal].position;
        let path = self.camera.route(from, to);
        tracing::debug!(
            from = state.from_portal,
            to = state.to_portal,
            length = path.total_length(),
            "route rebuilt"
        );
        self.trail.set_path(path.clone());
        self.route = ActiveRoute {
            from: state.from_portal,
            to: state.to_portal,
            path,
        };
    }
}

impl Drop for GalleryDirector {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for GalleryDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryDirector")
            .field("controller", &self.controller)
            .field("scenes", &self.scenes)
            .field("time", &self.time)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/director.rs"]
mod tests;
