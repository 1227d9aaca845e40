//! Interception proxies
//!
//! A `Proxy<T>` is an explicit decorator: it holds an `Arc` back-reference to
//! the raw instance and implements the same capability trait, routing every
//! method through the interceptor before delegating. The trait implementation
//! itself is generated by [`component!`](crate::component).

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::adapters::{LoggingTransactionManager, TransactionInterceptor};
use crate::domain::Component;
use crate::error::ProxyConstructionError;
use crate::ports::{Interceptor, Invocation};

/// Interception wrapper around a raw instance.
pub struct Proxy<T> {
    target: Arc<T>,
    interceptor: Arc<dyn Interceptor>,
}

impl<T: Component> Proxy<T> {
    pub fn new(target: Arc<T>, interceptor: Arc<dyn Interceptor>) -> Self {
        Self {
            target,
            interceptor,
        }
    }

    /// The wrapped raw instance.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    /// Delegate a fallible call through the interceptor.
    pub fn intercept<R, E, F>(&self, method: &'static str, call: F) -> Result<R, E>
    where
        E: fmt::Display,
        F: FnOnce(&T) -> Result<R, E>,
    {
        let invocation = Invocation::new(T::qualified_name(), method);
        self.interceptor.invoke(&invocation, || call(&self.target))
    }

    /// Delegate a call that cannot fail; only a panic takes the failure path.
    pub fn intercept_infallible<R, F>(&self, method: &'static str, call: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.intercept(method, |target| Ok::<R, Infallible>(call(target))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

/// Implemented twice for `Result`, once for everything else, so the marker
/// type is ambiguous exactly when the return type is a `Result`.
#[doc(hidden)]
pub trait InfallibleReturn<M> {}

impl<T> InfallibleReturn<()> for T {}

impl<T, E> InfallibleReturn<u8> for Result<T, E> {}

/// Fails to compile when `R` is a `Result` that `component!` could not
/// recognize syntactically, e.g. `io::Result<T>`. Called from generated code.
#[doc(hidden)]
pub fn assert_infallible_return<R: InfallibleReturn<M>, M>() {}

impl<T> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &std::any::type_name::<T>())
            .field("interceptor", &self.interceptor.name())
            .finish()
    }
}

/// Builds proxies sharing one interceptor.
#[derive(Clone)]
pub struct ProxyFactory {
    interceptor: Arc<dyn Interceptor>,
}

impl ProxyFactory {
    pub fn new(interceptor: Arc<dyn Interceptor>) -> Self {
        Self { interceptor }
    }

    /// Factory whose proxies log begin/commit/rollback.
    pub fn transactional() -> Self {
        Self::new(Arc::new(TransactionInterceptor::new(Arc::new(
            LoggingTransactionManager,
        ))))
    }

    pub fn interceptor(&self) -> &Arc<dyn Interceptor> {
        &self.interceptor
    }

    /// Wrap `real` and view the wrapper through the capability surface.
    pub fn create_proxy<T: Component>(
        &self,
        real: Arc<T>,
    ) -> Result<Arc<T::Api>, ProxyConstructionError> {
        let proxy = Arc::new(Proxy::new(real, Arc::clone(&self.interceptor)));
        T::upcast_proxy(proxy).ok_or(ProxyConstructionError::NotInterceptable {
            type_name: T::qualified_name(),
        })
    }
}

impl Default for ProxyFactory {
    fn default() -> Self {
        Self::transactional()
    }
}

impl fmt::Debug for ProxyFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyFactory")
            .field("interceptor", &self.interceptor.name())
            .finish()
    }
}
