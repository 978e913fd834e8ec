pub mod cli;
pub mod config;
pub mod handlers;
pub mod trigger;
pub mod types;

#[cfg(test)]
pub mod testing;
