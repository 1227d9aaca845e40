//! Descriptor Parser
//!
//! Turns a `Component` type into a `TypeDescriptor`:
//!
//! 1. derive the lookup name and qualified name
//! 2. construct the raw instance (zero-argument constructor)
//! 3. ask the decider whether the declared markers require interception
//! 4. wrap the instance in a proxy if so
//! 5. collect the method table
//! 6. tag the category

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ProxyFallback;
use crate::domain::{derive_lookup_name, Category, Component, MethodTable, TypeDescriptor};
use crate::error::RegistryError;
use crate::ports::{InterceptionDecider, TransactionalDecider};
use crate::proxy::ProxyFactory;

pub struct DescriptorParser {
    decider: Arc<dyn InterceptionDecider>,
    proxies: ProxyFactory,
    proxy_fallback: ProxyFallback,
}

impl DescriptorParser {
    pub fn new(decider: Arc<dyn InterceptionDecider>, proxies: ProxyFactory) -> Self {
        Self {
            decider,
            proxies,
            proxy_fallback: ProxyFallback::default(),
        }
    }

    pub fn with_proxy_fallback(mut self, fallback: ProxyFallback) -> Self {
        self.proxy_fallback = fallback;
        self
    }

    pub fn proxy_fallback(&self) -> ProxyFallback {
        self.proxy_fallback
    }

    /// Build the descriptor of `T`.
    ///
    /// Nothing is published on failure: a constructor error aborts the parse,
    /// as does a proxy error under [`ProxyFallback::Reject`].
    pub fn parse<T: Component>(&self, category: Category) -> Result<TypeDescriptor, RegistryError> {
        let bean = derive_lookup_name(T::simple_name());

        let raw = T::instantiate()
            .map(Arc::new)
            .map_err(|source| RegistryError::Instantiation {
                bean: bean.clone(),
                source,
            })?;

        let intercepted = if self.decider.requires_interception(T::markers()) {
            match self.proxies.create_proxy(Arc::clone(&raw)) {
                Ok(proxy) => {
                    debug!(bean = %bean, "Interception proxy created");
                    Some(proxy)
                }
                Err(e) if self.proxy_fallback == ProxyFallback::RawInstance => {
                    warn!(
                        bean = %bean,
                        "{}; registering raw instance without interception",
                        e
                    );
                    None
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            None
        };

        let methods = MethodTable::from_descriptors(T::methods());
        debug!(
            bean = %bean,
            qualified_name = T::qualified_name(),
            methods = methods.len(),
            "Type descriptor parsed"
        );

        Ok(TypeDescriptor::assemble::<T>(
            category,
            raw,
            intercepted,
            methods,
        ))
    }
}

impl Default for DescriptorParser {
    fn default() -> Self {
        Self::new(Arc::new(TransactionalDecider), ProxyFactory::default())
    }
}
