use crate::animation::anim::Anim;
use crate::foundation::core::{Affine, Point, Rgb};
use crate::foundation::error::{RotoError, RotoResult};
use crate::geometry::bezier::CpSample;
use crate::geometry::polygon::FillRule;
use crate::model::control_point::{ControlPoint, sample_all};
use crate::model::stroke::BrushParams;

/// Handle length factor that makes four cubic arcs approximate a circle.
const CIRCLE_KAPPA: f64 = 0.552_284_749_830_793_4;

/// A bezier roto shape.
///
/// Closed shapes are filled (with a feather band); open ones are stroked with `brush`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BezierShape {
    pub points: Vec<ControlPoint>,
    /// Feather curve, one point per entry of `points`. `None` means the feather curve
    /// coincides with the shape curve and only `feather_distance` widens it.
    #[serde(default)]
    pub feather_points: Option<Vec<ControlPoint>>,
    #[serde(default = "default_true")]
    pub closed: bool,
    #[serde(default = "default_true")]
    pub activated: bool,
    #[serde(default = "default_color")]
    pub color: Anim<Rgb>,
    #[serde(default = "default_one")]
    pub opacity: Anim<f64>,
    #[serde(default = "default_zero")]
    pub feather_distance: Anim<f64>,
    #[serde(default = "default_one")]
    pub feather_falloff: Anim<f64>,
    #[serde(default = "default_transform")]
    pub transform: Anim<Affine>,
    #[serde(default)]
    pub fill_rule: FillRule,
    #[serde(default)]
    pub brush: BrushParams,
}

fn default_true() -> bool {
    true
}

fn default_color() -> Anim<Rgb> {
    Anim::constant(Rgb::WHITE)
}

fn default_one() -> Anim<f64> {
    Anim::constant(1.0)
}

fn default_zero() -> Anim<f64> {
    Anim::constant(0.0)
}

fn default_transform() -> Anim<Affine> {
    Anim::constant(Affine::IDENTITY)
}

/// Everything needed to render a bezier shape at one time.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierFrame {
    /// Control points in canvas space (transform applied, mip not applied).
    pub cps: Vec<CpSample>,
    pub feather_cps: Vec<CpSample>,
    pub color: Rgb,
    pub opacity: f64,
    pub feather_distance: f64,
    pub feather_falloff: f64,
    pub fill_rule: FillRule,
}

impl BezierShape {
    /// Closed shape through `points` with default attributes.
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Self {
            points,
            feather_points: None,
            closed: true,
            activated: true,
            color: default_color(),
            opacity: default_one(),
            feather_distance: default_zero(),
            feather_falloff: default_one(),
            transform: default_transform(),
            fill_rule: FillRule::Winding,
            brush: BrushParams::default(),
        }
    }

    /// Closed polygon (corner points only).
    pub fn polygon(points: &[Point]) -> Self {
        Self::new(points.iter().copied().map(ControlPoint::corner).collect())
    }

    /// Closed four-point circle, traversed clockwise on a y-down grid.
    pub fn circle(center: Point, radius: f64) -> Self {
        let k = radius * CIRCLE_KAPPA;
        let (cx, cy) = (center.x, center.y);
        let pts = [
            (
                Point::new(cx + radius, cy),
                Point::new(cx + radius, cy - k),
                Point::new(cx + radius, cy + k),
            ),
            (
                Point::new(cx, cy + radius),
                Point::new(cx + k, cy + radius),
                Point::new(cx - k, cy + radius),
            ),
            (
                Point::new(cx - radius, cy),
                Point::new(cx - radius, cy + k),
                Point::new(cx - radius, cy - k),
            ),
            (
                Point::new(cx, cy - radius),
                Point::new(cx - k, cy - radius),
                Point::new(cx + k, cy - radius),
            ),
        ];
        Self::new(
            pts.into_iter()
                .map(|(p, l, r)| ControlPoint::smooth(p, l, r))
                .collect(),
        )
    }

    pub fn validate(&self) -> RotoResult<()> {
        if self.points.is_empty() {
            return Err(RotoError::validation("bezier has no control points"));
        }
        if let Some(fp) = &self.feather_points
            && fp.len() != self.points.len()
        {
            return Err(RotoError::validation(format!(
                "feather_points has {} entries, expected {}",
                fp.len(),
                self.points.len()
            )));
        }
        for cp in self.points.iter().chain(self.feather_points.iter().flatten()) {
            cp.validate()?;
        }
        self.color.validate()?;
        self.opacity.validate()?;
        self.feather_distance.validate()?;
        self.feather_falloff.validate()?;
        self.transform.validate()?;
        self.brush.validate()
    }

    /// Whether the closed-shape fill path applies (finished, activated, at least 2 points).
    pub fn is_fillable(&self) -> bool {
        self.closed && self.activated && self.points.len() > 1
    }

    pub fn at(&self, time: f64) -> RotoResult<BezierFrame> {
        let transform = self.transform.sample(time)?;
        let cps: Vec<CpSample> = sample_all(&self.points, time)?
            .into_iter()
            .map(|cp| cp.transformed(transform))
            .collect();
        let feather_cps = match &self.feather_points {
            Some(fp) => sample_all(fp, time)?
                .into_iter()
                .map(|cp| cp.transformed(transform))
                .collect(),
            None => cps.clone(),
        };
        let falloff = self.feather_falloff.sample(time)?;
        Ok(BezierFrame {
            cps,
            feather_cps,
            color: self.color.sample(time)?,
            opacity: self.opacity.sample(time)?,
            feather_distance: self.feather_distance.sample(time)?,
            // fallOff enters as both f and 1/f in the patch controls.
            feather_falloff: if falloff > 0.0 { falloff } else { 1.0 },
            fill_rule: self.fill_rule,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/bezier.rs"]
mod tests;
