/// 8-bit raster surfaces (A8 and premultiplied ARGB32) and their compositing operators.
pub mod surface;
/// vello_cpu painter that fills paths and dabs into a surface.
pub mod backend;
/// Coons-patch meshes and their rasterization into a coverage mask.
pub mod mesh;
/// Subdivision of a closed bezier into convex pieces.
pub mod bezulate;
/// Feather band construction and interior primitives.
pub mod feather;
/// Closed bezier shapes with feather and motion blur.
pub mod shape;
/// Single brush dabs.
pub mod dab;
/// Per-pressure-level cache of dot patterns for one stroke.
pub mod pattern_cache;
/// Spacing-driven traversal of stroke segments.
pub mod stroke;
/// Smear strokes that drag destination pixels along the stroke.
pub mod smear;
/// Pixel transfer between images and raster surfaces.
pub mod convert;
/// Entry point that renders one roto item into an image.
pub mod mask;
