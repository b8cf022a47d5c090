use crate::foundation::core::clamp_unit;

/// Easing curves over `[0, 1]`.
///
/// Every curve maps `0 -> 0` and `1 -> 1` and clamps its input first, so callers can feed raw
/// progress values without extrapolating past the endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_unit(t);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Ease the local progress of `t` inside the window `[start, end]`.
    ///
    /// Returns `0` before the window, `1` after it. A zero-width window acts as a step at `end`.
    pub fn window(self, t: f64, start: f64, end: f64) -> f64 {
        if end <= start {
            return if t >= end { 1.0 } else { 0.0 };
        }
        self.apply((t - start) / (end - start))
    }
}

/// Hermite smoothstep between `edge0` and `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = clamp_unit((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Smooth `0 -> 1 -> 0` envelope over `[0, 1]`, ramping within `span` of either end.
pub fn edge_envelope(t: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 1.0;
    }
    let t = clamp_unit(t);
    smoothstep(0.0, span, t) * smoothstep(0.0, span, 1.0 - t)
}
