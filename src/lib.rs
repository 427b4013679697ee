#![forbid(unsafe_code)]
//! Roto mask rasterization.
//!
//! Renders closed bezier shapes (with feather and motion blur), paint strokes built from brush
//! dabs, and smear strokes into multi-channel image buffers at any mip level.

pub mod animation;
pub mod foundation;
pub mod geometry;
pub mod imaging;
pub mod model;
pub mod render;

pub use animation::anim::{Anim, InterpMode, Keyframe, Keyframes, Lerp};
pub use animation::ease::Ease;
pub use foundation::core::{Affine, BezPath, Point, Rect, RectI, Rgb, Vec2};
pub use foundation::error::{RotoError, RotoResult};
pub use geometry::bezier::CpSample;
pub use geometry::polygon::FillRule;
pub use imaging::image::{BitDepth, Image, ImageData};
pub use model::bezier::{BezierFrame, BezierShape};
pub use model::control_point::ControlPoint;
pub use model::item::RotoItem;
pub use model::stroke::{BrushFrame, BrushParams, StrokeItem, StrokePoint};
pub use render::convert::{ConvertParams, image_to_surface, surface_to_image};
pub use render::mask::{
    DEFAULT_PRESSURE_LEVELS, FeatherMode, InteriorMode, MotionBlurRange, RenderOpts,
    purge_dot_pattern_cache, render_mask,
};
pub use render::pattern_cache::DotPatternCache;
pub use render::smear::render_smear;
pub use render::stroke::StrokeCarry;
pub use render::surface::{RasterSurface, SurfaceFormat};
