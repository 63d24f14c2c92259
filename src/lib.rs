pub mod constants;
pub mod math_utils;
pub mod error;
pub mod interpolator;
pub mod atomic_radius;
pub mod diffusion;
pub mod crossover;
pub mod root_finder;
pub mod solver;
pub mod escape;
pub mod temperature;
pub mod corrections;
pub mod spectrum;
pub mod planet;
pub mod config;
pub mod grid;
pub mod escape_model;
