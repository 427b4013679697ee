use crate::{
    animation::ease::Ease,
    foundation::core::{Affine, Point, Rgb},
    foundation::error::{RotoError, RotoResult},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rgb::new(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
        )
    }
}

impl Lerp for Affine {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let ca = a.as_coeffs();
        let cb = b.as_coeffs();
        let mut out = [0.0; 6];
        for (i, o) in out.iter_mut().enumerate() {
            *o = ca[i] + (cb[i] - ca[i]) * t;
        }
        Affine::new(out)
    }
}

/// A value that may vary over time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Anim<T> {
    /// Same value at every time.
    Constant(T),
    /// Piecewise animation defined by explicit keyframes.
    Keyframes(Keyframes<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Sample the value at `time`.
    pub fn sample(&self, time: f64) -> RotoResult<T> {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf.sample(time),
        }
    }

    pub fn validate(&self) -> RotoResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Keyframes(kf) => kf.validate(),
        }
    }
}

impl<T> From<T> for Anim<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

/// Keyframed animation. Keys are sorted by `time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>,
    #[serde(default)]
    pub mode: InterpMode,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> RotoResult<()> {
        if self.keys.is_empty() {
            return Err(RotoError::validation("Keyframes must have at least one key"));
        }
        if self.keys.iter().any(|k| !k.time.is_finite()) {
            return Err(RotoError::validation("Keyframes key times must be finite"));
        }
        if !self.keys.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(RotoError::validation("Keyframes keys must be sorted by time"));
        }
        Ok(())
    }

    /// Sample the keyframed value; times outside the key range hold the nearest key.
    pub fn sample(&self, time: f64) -> RotoResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(RotoError::validation("Keyframes has no keys"));
        };

        let idx = self.keys.partition_point(|k| k.time <= time);
        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.time - a.time;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let t = (time - a.time) / denom;
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, a.ease.apply(t))),
        }
    }
}

/// One keyframe in a keyframed animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Time (in frames) of this key; fractional times are sub-frames.
    pub time: f64,
    pub value: T,
    /// Easing applied toward the next keyframe.
    #[serde(default)]
    pub ease: Ease,
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Hold the previous key value until the next keyframe.
    Hold,
    /// Interpolate between keyframes using [`Ease`].
    #[default]
    Linear,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
