/// Constant or keyframed values sampled at a time.
pub mod anim;
/// Easing curves applied between keyframes.
pub mod ease;
