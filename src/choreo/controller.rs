use crate::{
    choreo::timeline::{Phase, PhaseDurations},
    foundation::{
        core::{PortalIndex, clamp_unit},
        error::GalleryResult,
    },
};

/// Slack (seconds) under which a phase counts as finished, absorbing float drift from summing
/// many small frame deltas.
const COMPLETION_EPSILON: f64 = 1e-9;

/// Immutable per-frame snapshot of the transition.
///
/// `progress` is local to `phase`. When `phase == Immersed`, `from_portal == to_portal`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionState {
    pub phase: Phase,
    pub progress: f64,
    pub from_portal: PortalIndex,
    pub to_portal: PortalIndex,
}

impl TransitionState {
    /// Steady state immersed in `portal`.
    pub fn settled(portal: PortalIndex) -> Self {
        Self {
            phase: Phase::Immersed,
            progress: 0.0,
            from_portal: portal,
            to_portal: portal,
        }
    }

    pub fn global_progress(&self, durations: &PhaseDurations) -> f64 {
        durations.phase_to_global(self.phase, self.progress)
    }
}

/// One-way phase-change callback.
pub type PhaseListener = Box<dyn FnMut(Phase)>;

/// Owns time for the whole choreography.
///
/// Advances through `exiting -> overview -> panning -> entering` by the fixed durations, then
/// settles back into `immersed` on the target portal. A trigger while running is ignored.
/// `dt` is not sanitized here; the host loop must feed finite, non-negative deltas.
pub struct TransitionController {
    durations: PhaseDurations,
    phase: Phase,
    elapsed: f64,
    running: bool,
    from_portal: PortalIndex,
    to_portal: PortalIndex,
    listeners: Vec<PhaseListener>,
}

impl TransitionController {
    pub fn new(initial_portal: PortalIndex, durations: PhaseDurations) -> GalleryResult<Self> {
        durations.validate()?;
        Ok(Self {
            durations,
            phase: Phase::Immersed,
            elapsed: 0.0,
            running: false,
            from_portal: initial_portal,
            to_portal: initial_portal,
            listeners: Vec::new(),
        })
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phase-local progress in `[0, 1]`; always `0` while immersed.
    pub fn progress(&self) -> f64 {
        if !self.running {
            return 0.0;
        }
        clamp_unit(self.elapsed / self.durations.duration(self.phase))
    }

    pub fn state(&self) -> TransitionState {
        TransitionState {
            phase: self.phase,
            progress: self.progress(),
            from_portal: self.from_portal,
            to_portal: self.to_portal,
        }
    }

    pub fn on_phase_change(&mut self, listener: impl FnMut(Phase) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Begin a transition toward `to_portal`. Returns `false` (and does nothing) if one is
    /// already running.
    pub fn start_transition(&mut self, to_portal: PortalIndex) -> bool {
        if self.running {
            tracing::debug!(
                requested = to_portal,
                current_target = self.to_portal,
                "transition already running; trigger ignored"
            );
            return false;
        }
        self.running = true;
        self.elapsed = 0.0;
        self.to_portal = to_portal;
        self.enter_phase(Phase::Exiting);
        true
    }

    pub fn update(&mut self, dt: f64) {
        if !self.running {
            return;
        }
        self.elapsed += dt;

        // A long frame may finish several phases; each still gets its own notification.
        loop {
            let duration = self.durations.duration(self.phase);
            if self.elapsed + COMPLETION_EPSILON < duration {
                return;
            }
            self.elapsed = (self.elapsed - duration).max(0.0);

            match self.phase.next() {
                Phase::Immersed => {
                    self.complete();
                    return;
                }
                next => self.enter_phase(next),
            }
        }
    }

    fn complete(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
        self.from_portal = self.to_portal;
        self.enter_phase(Phase::Immersed);
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        tracing::debug!(
            %phase,
            from = self.from_portal,
            to = self.to_portal,
            "phase change"
        );
        for listener in &mut self.listeners {
            listener(phase);
        }
    }
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("durations", &self.durations)
            .field("state", &self.state())
            .field("running", &self.running)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/controller.rs"]
mod tests;
