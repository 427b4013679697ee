/// Bezier shapes (closed masks and open curves).
pub mod bezier;
/// Animated control points.
pub mod control_point;
/// The closed set of renderable roto items.
pub mod item;
/// Paint strokes and brush parameters.
pub mod stroke;
