/// Interpolation curve from one keyframe toward the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    /// Zero slope at both keys (`3t² - 2t³`).
    Smooth,
    /// Starts flat, arrives at full speed.
    EaseIn,
    /// Leaves at full speed, arrives flat.
    EaseOut,
}

impl Ease {
    /// Remap a segment fraction; `t` is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
