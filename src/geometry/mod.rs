/// Control-point sampling, de Casteljau evaluation and polygon flattening.
pub mod bezier;
/// Bounded segment intersection and epsilon-deduplicated point sets.
pub mod intersect;
/// Point-in-polygon, orientation and bounding-box helpers.
pub mod polygon;
