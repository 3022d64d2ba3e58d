pub mod batch;
pub mod common;
pub mod compare;
mod error;
pub mod rotation;

pub use error::ConfigError;
