use crate::{
    animation::ease::Ease,
    choreo::{controller::TransitionState, timeline::Phase},
    scene::media::SceneManager,
};

/// Crossfade instruction for one portal's [`SceneManager`] this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "cue", content = "progress", rename_all = "snake_case")]
pub enum MediaCue {
    FadeToLive(f64),
    FadeToStatic(f64),
}

impl MediaCue {
    pub fn apply(self, scene: &mut SceneManager) {
        match self {
            MediaCue::FadeToLive(p) => scene.fade_to_live(p),
            MediaCue::FadeToStatic(p) => scene.fade_to_static(p),
        }
    }
}

/// Which portal plays and how far its crossfade has gone, derived only from the snapshot.
///
/// The settled portal is live; the *from* portal fades out over `exiting`; the *to* portal
/// fades in over `entering`; everything else stays static.
pub fn media_cues(state: &TransitionState, portal_count: usize, ease: Ease) -> Vec<MediaCue> {
    let eased = ease.apply(state.progress);
    (0..portal_count)
        .map(|portal| match state.phase {
            Phase::Immersed if portal == state.from_portal => MediaCue::FadeToLive(1.0),
            Phase::Exiting if portal == state.from_portal => MediaCue::FadeToStatic(eased),
            Phase::Entering if portal == state.to_portal => MediaCue::FadeToLive(eased),
            _ => MediaCue::FadeToStatic(1.0),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/media_cues.rs"]
mod tests;
