use crate::foundation::{
    core::clamp_unit,
    error::{GalleryError, GalleryResult},
};

/// The five states of a portal-to-portal transition, in their only legal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Immersed,
    Exiting,
    Overview,
    Panning,
    Entering,
}

impl Phase {
    /// Phases with a fixed duration, in order.
    pub const TIMED: [Phase; 4] = [
        Phase::Exiting,
        Phase::Overview,
        Phase::Panning,
        Phase::Entering,
    ];

    /// Successor in the cycle `immersed -> exiting -> overview -> panning -> entering -> immersed`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Immersed => Phase::Exiting,
            Phase::Exiting => Phase::Overview,
            Phase::Overview => Phase::Panning,
            Phase::Panning => Phase::Entering,
            Phase::Entering => Phase::Immersed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Immersed => "immersed",
            Phase::Exiting => "exiting",
            Phase::Overview => "overview",
            Phase::Panning => "panning",
            Phase::Entering => "entering",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The one duration table (seconds) shared by the controller and the camera.
///
/// Global progress, the camera's channel windows and phase advancement are all derived from a
/// single instance of this struct, so they cannot disagree about where "now" is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub exiting: f64,
    pub overview: f64,
    pub panning: f64,
    pub entering: f64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            exiting: 2.5,
            overview: 1.5,
            panning: 3.0,
            entering: 2.5,
        }
    }
}

impl PhaseDurations {
    pub fn validate(&self) -> GalleryResult<()> {
        for phase in Phase::TIMED {
            let d = self.duration(phase);
            if !d.is_finite() || d <= 0.0 {
                return Err(GalleryError::validation(format!(
                    "{phase} duration must be finite and > 0 (got {d})"
                )));
            }
        }
        Ok(())
    }

    /// Duration of `phase`; `immersed` is unbounded and reports `f64::INFINITY`.
    pub fn duration(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Immersed => f64::INFINITY,
            Phase::Exiting => self.exiting,
            Phase::Overview => self.overview,
            Phase::Panning => self.panning,
            Phase::Entering => self.entering,
        }
    }

    /// Sum of the four timed phases.
    pub fn total(&self) -> f64 {
        self.exiting + self.overview + self.panning + self.entering
    }

    /// Global-progress interval `[start, end]` occupied by `phase`.
    ///
    /// `immersed` occupies the degenerate interval `[0, 0]`.
    pub fn share(&self, phase: Phase) -> (f64, f64) {
        let total = self.total();
        let mut start = 0.0;
        for p in Phase::TIMED {
            let end = start + self.duration(p);
            if p == phase {
                return (start / total, end / total);
            }
            start = end;
        }
        (0.0, 0.0)
    }

    /// Convert a phase-local progress into global progress across the whole transition.
    pub fn phase_to_global(&self, phase: Phase, local: f64) -> f64 {
        let (start, end) = self.share(phase);
        clamp_unit(start + (end - start) * clamp_unit(local))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/timeline.rs"]
mod tests;
