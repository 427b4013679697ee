use crate::foundation::core::Rgb;
use crate::foundation::error::RotoResult;
use crate::model::bezier::BezierShape;
use crate::model::stroke::StrokeItem;

/// Every kind of roto item the mask renderer knows how to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotoItem {
    /// Closed mask (filled with feather) or open curve (stroked).
    Bezier(BezierShape),
    /// Paint brush stroke.
    Paint(StrokeItem),
    /// Smear stroke: drags existing destination pixels along the path.
    Smear(StrokeItem),
}

impl RotoItem {
    pub fn validate(&self) -> RotoResult<()> {
        match self {
            Self::Bezier(b) => b.validate(),
            Self::Paint(s) | Self::Smear(s) => s.validate(),
        }
    }

    pub fn color_at(&self, time: f64) -> RotoResult<Rgb> {
        match self {
            Self::Bezier(b) => b.color.sample(time),
            Self::Paint(s) | Self::Smear(s) => s.color.sample(time),
        }
    }

    pub fn opacity_at(&self, time: f64) -> RotoResult<f64> {
        match self {
            Self::Bezier(b) => b.opacity.sample(time),
            Self::Paint(s) | Self::Smear(s) => s.opacity.sample(time),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bezier(b) if b.closed => "closed_bezier",
            Self::Bezier(_) => "open_bezier",
            Self::Paint(_) => "paint",
            Self::Smear(_) => "smear",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/item.rs"]
mod tests;
