use crate::animation::anim::Anim;
use crate::foundation::core::Point;
use crate::foundation::error::RotoResult;
use crate::geometry::bezier::CpSample;

/// A bezier vertex whose position and tangent handles may be animated.
///
/// Handles are absolute positions, not offsets from `position`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ControlPoint {
    pub position: Anim<Point>,
    pub left: Anim<Point>,
    pub right: Anim<Point>,
}

impl ControlPoint {
    /// Static point with handles on the point (a polygon corner).
    pub fn corner(p: Point) -> Self {
        Self {
            position: Anim::constant(p),
            left: Anim::constant(p),
            right: Anim::constant(p),
        }
    }

    /// Static point with explicit handles.
    pub fn smooth(p: Point, left: Point, right: Point) -> Self {
        Self {
            position: Anim::constant(p),
            left: Anim::constant(left),
            right: Anim::constant(right),
        }
    }

    pub fn at(&self, time: f64) -> RotoResult<CpSample> {
        Ok(CpSample::new(
            self.position.sample(time)?,
            self.left.sample(time)?,
            self.right.sample(time)?,
        ))
    }

    pub fn validate(&self) -> RotoResult<()> {
        self.position.validate()?;
        self.left.validate()?;
        self.right.validate()
    }
}

/// Sample every control point at `time`.
pub fn sample_all(cps: &[ControlPoint], time: f64) -> RotoResult<Vec<CpSample>> {
    cps.iter().map(|cp| cp.at(time)).collect()
}
