/// Integer rectangles, colors and kurbo re-exports.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
/// Fixed-point and mip-level helpers.
pub mod math;
