/// Multi-channel image buffers addressed in canvas pixel coordinates.
pub mod image;
