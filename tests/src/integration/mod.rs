//! Cross-crate integration flows.

pub mod fixtures;
mod registry;
mod telemetry;
