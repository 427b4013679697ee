use crate::animation::anim::Anim;
use crate::foundation::core::{Affine, Point, Rgb};
use crate::foundation::error::{RotoError, RotoResult};

/// Brush settings shared by paint strokes, smear strokes and stroked open beziers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrushParams {
    /// Brush diameter in canvas pixels.
    pub size: Anim<f64>,
    /// Dab spacing as a fraction of the brush diameter. `0` disables rendering.
    pub spacing: Anim<f64>,
    /// Fraction of the radius that is fully opaque, in `[0, 1]`.
    pub hardness: Anim<f64>,
    /// Visible portion of every stroke segment, as fractions of its point count.
    pub write_on_start: Anim<f64>,
    pub write_on_end: Anim<f64>,
    pub pressure_affects_opacity: bool,
    pub pressure_affects_size: bool,
    pub pressure_affects_hardness: bool,
    /// Additive dab compositing (`true`) or lighten-only (`false`).
    pub build_up: bool,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            size: Anim::constant(25.0),
            spacing: Anim::constant(0.1),
            hardness: Anim::constant(0.2),
            write_on_start: Anim::constant(0.0),
            write_on_end: Anim::constant(1.0),
            pressure_affects_opacity: true,
            pressure_affects_size: false,
            pressure_affects_hardness: false,
            build_up: false,
        }
    }
}

/// Brush settings sampled at one time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushFrame {
    pub size: f64,
    pub spacing: f64,
    pub hardness: f64,
    pub write_on_start: f64,
    pub write_on_end: f64,
    pub pressure_affects_opacity: bool,
    pub pressure_affects_size: bool,
    pub pressure_affects_hardness: bool,
    pub build_up: bool,
}

impl BrushParams {
    pub fn at(&self, time: f64) -> RotoResult<BrushFrame> {
        Ok(BrushFrame {
            size: self.size.sample(time)?,
            spacing: self.spacing.sample(time)?,
            hardness: self.hardness.sample(time)?.clamp(0.0, 1.0),
            write_on_start: self.write_on_start.sample(time)?.clamp(0.0, 1.0),
            write_on_end: self.write_on_end.sample(time)?.clamp(0.0, 1.0),
            pressure_affects_opacity: self.pressure_affects_opacity,
            pressure_affects_size: self.pressure_affects_size,
            pressure_affects_hardness: self.pressure_affects_hardness,
            build_up: self.build_up,
        })
    }

    pub fn validate(&self) -> RotoResult<()> {
        self.size.validate()?;
        self.spacing.validate()?;
        self.hardness.validate()?;
        self.write_on_start.validate()?;
        self.write_on_end.validate()
    }
}

/// One sampled point of a stroke, as delivered by the input device.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokePoint {
    pub pos: Point,
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

fn default_pressure() -> f64 {
    1.0
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            pressure,
        }
    }
}

/// A paint (or smear) stroke: a list of path segments recorded in canvas space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeItem {
    pub segments: Vec<Vec<StrokePoint>>,
    #[serde(default)]
    pub brush: BrushParams,
    #[serde(default = "default_color")]
    pub color: Anim<Rgb>,
    #[serde(default = "default_opacity")]
    pub opacity: Anim<f64>,
    #[serde(default = "default_transform")]
    pub transform: Anim<Affine>,
}

fn default_color() -> Anim<Rgb> {
    Anim::constant(Rgb::WHITE)
}

fn default_opacity() -> Anim<f64> {
    Anim::constant(1.0)
}

fn default_transform() -> Anim<Affine> {
    Anim::constant(Affine::IDENTITY)
}

impl StrokeItem {
    pub fn new(segments: Vec<Vec<StrokePoint>>, brush: BrushParams) -> Self {
        Self {
            segments,
            brush,
            color: default_color(),
            opacity: default_opacity(),
            transform: default_transform(),
        }
    }

    pub fn validate(&self) -> RotoResult<()> {
        if self.segments.iter().all(|s| s.is_empty()) {
            return Err(RotoError::validation("stroke has no points"));
        }
        if self
            .segments
            .iter()
            .flatten()
            .any(|p| !p.pos.is_finite() || !p.pressure.is_finite())
        {
            return Err(RotoError::validation("stroke points must be finite"));
        }
        self.brush.validate()?;
        self.color.validate()?;
        self.opacity.validate()?;
        self.transform.validate()
    }

    /// Stroke segments with the item transform applied, still in canvas space.
    pub fn segments_at(&self, time: f64) -> RotoResult<Vec<Vec<StrokePoint>>> {
        let t = self.transform.sample(time)?;
        Ok(self
            .segments
            .iter()
            .map(|seg| {
                seg.iter()
                    .map(|p| StrokePoint {
                        pos: t * p.pos,
                        pressure: p.pressure,
                    })
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/stroke.rs"]
mod tests;
