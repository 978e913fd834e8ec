// Concrete handlers shipped with the crate

pub mod audit;

pub use audit::*;
