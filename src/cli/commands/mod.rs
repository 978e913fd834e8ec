pub mod fire;
pub mod settings;
