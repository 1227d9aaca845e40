//! The registration contract of a component type
//!
//! Rust has no runtime reflection, so everything the registry needs to know
//! about a type is generated ahead of time by [`component!`](crate::component)
//! as an implementation of [`Component`].

use std::fmt;
use std::sync::Arc;

use crate::domain::marker::Marker;
use crate::domain::method::MethodDescriptor;
use crate::domain::naming::simple_name_of;
use crate::error::InstantiationError;
use crate::proxy::Proxy;

/// A type the registry can describe, construct and intercept.
pub trait Component: Send + Sync + Sized + 'static {
    /// Capability surface callers hold, e.g. `dyn PaymentApi`.
    type Api: ?Sized + Send + Sync + 'static;

    /// Type name without module path.
    fn simple_name() -> &'static str {
        simple_name_of(Self::qualified_name())
    }

    /// Fully qualified type name.
    fn qualified_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Markers declared on the type.
    fn markers() -> &'static [Marker] {
        &[]
    }

    /// Zero-argument construction.
    fn instantiate() -> Result<Self, InstantiationError> {
        Err(InstantiationError::NoDefaultConstructor {
            type_name: Self::qualified_name(),
        })
    }

    /// Declared methods of the capability surface, in declaration order.
    fn methods() -> Vec<MethodDescriptor>;

    /// View the raw instance through its capability surface.
    fn upcast(this: Arc<Self>) -> Arc<Self::Api>;

    /// View a proxy through the capability surface.
    ///
    /// `None` means the proxy does not implement the surface, so the type
    /// cannot be intercepted.
    fn upcast_proxy(_proxy: Arc<Proxy<Self>>) -> Option<Arc<Self::Api>> {
        None
    }
}

/// Result of a zero-argument constructor.
///
/// Implemented for `T` itself (infallible constructors such as
/// `Default::default`) and for `Result<T, E>`.
pub trait IntoInstance<T: Component> {
    fn into_instance(self) -> Result<T, InstantiationError>;
}

impl<T: Component> IntoInstance<T> for T {
    fn into_instance(self) -> Result<T, InstantiationError> {
        Ok(self)
    }
}

impl<T: Component, E: fmt::Display> IntoInstance<T> for Result<T, E> {
    fn into_instance(self) -> Result<T, InstantiationError> {
        self.map_err(|e| InstantiationError::ConstructorFailed {
            type_name: T::qualified_name(),
            message: e.to_string(),
        })
    }
}
