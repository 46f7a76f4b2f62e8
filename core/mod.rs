// Core module: endpoint configuration and types (NO I/O dependencies)
pub mod types;

pub use types::*;
