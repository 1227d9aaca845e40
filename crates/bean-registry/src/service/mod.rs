//! Service layer: descriptor parsing and the warm-up registry.

pub mod parser;
pub mod registry;

pub use parser::DescriptorParser;
pub use registry::{BeanRegistry, RegistryBuilder};
