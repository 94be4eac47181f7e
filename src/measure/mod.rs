//! Curve distance measures.

mod frechet;

pub use frechet::{discrete_frechet_distance, discrete_frechet_distance_linear_space};
