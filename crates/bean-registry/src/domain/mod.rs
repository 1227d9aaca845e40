//! Domain layer: descriptors, markers and the component contract.

pub mod component;
pub mod descriptor;
pub mod marker;
pub mod method;
pub mod naming;

pub use component::{Component, IntoInstance};
pub use descriptor::TypeDescriptor;
pub use marker::{Category, Marker};
pub use method::{MethodDescriptor, MethodHandle, MethodTable, ParamType, Parameter};
pub use naming::derive_lookup_name;
