//! # Bean Registry - Warm-up Registration and Lookup
//!
//! Registration happens once, sequentially, before traffic starts. The
//! builder is then consumed into an immutable `BeanRegistry`, so concurrent
//! readers need no locking (construct-then-publish).
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut builder = RegistryBuilder::new(RegistryConfig::from_env());
//!
//! builder.register::<PaymentService>(Category::Service)?;
//! builder.register::<OrderController>(Category::Controller)?;
//!
//! let registry = builder.build()?;
//! let payments = registry.get("paymentService")?;
//! ```
//!
//! A type that fails to register is logged and left out; with
//! `fail_fast` set, `build()` refuses to publish instead.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::RegistryConfig;
use crate::domain::{Category, Component, TypeDescriptor};
use crate::error::RegistryError;
use crate::ports::TransactionalDecider;
use crate::proxy::ProxyFactory;
use crate::service::DescriptorParser;

/// Collects descriptors during warm-up.
pub struct RegistryBuilder {
    parser: DescriptorParser,
    config: RegistryConfig,
    beans: HashMap<String, TypeDescriptor>,
    failed: Vec<String>,
}

impl RegistryBuilder {
    /// Builder with the transactional decider and logging proxies.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_proxy_factory(config, ProxyFactory::default())
    }

    pub fn with_proxy_factory(config: RegistryConfig, proxies: ProxyFactory) -> Self {
        let parser = DescriptorParser::new(Arc::new(TransactionalDecider), proxies)
            .with_proxy_fallback(config.proxy_fallback);
        Self::with_parser(config, parser)
    }

    pub fn with_parser(config: RegistryConfig, parser: DescriptorParser) -> Self {
        Self {
            parser,
            config,
            beans: HashMap::new(),
            failed: Vec::new(),
        }
    }

    /// Parse and register `T`.
    ///
    /// A descriptor with the same lookup name replaces the earlier one,
    /// unless `fail_fast` is set.
    pub fn register<T: Component>(
        &mut self,
        category: Category,
    ) -> Result<&TypeDescriptor, RegistryError> {
        let descriptor = match self.parser.parse::<T>(category) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("[Registry] ✗ {} not registered: {}", T::qualified_name(), e);
                self.failed.push(T::qualified_name().to_string());
                return Err(e);
            }
        };

        let name = descriptor.lookup_name().to_string();
        info!(
            bean = %name,
            category = %category,
            intercepted = descriptor.is_intercepted(),
            "[Registry] Registering {}",
            descriptor.qualified_name()
        );

        if self.beans.contains_key(&name) {
            if self.config.fail_fast {
                warn!("[Registry] ✗ Bean {} already registered", name);
                self.failed.push(T::qualified_name().to_string());
                return Err(RegistryError::DuplicateName(name));
            }
            warn!("[Registry] Bean {} already registered, replacing", name);
        }

        self.beans.insert(name.clone(), descriptor);
        self.beans
            .get(&name)
            .ok_or(RegistryError::BeanNotFound(name))
    }

    /// Qualified names of types whose registration failed.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Publish the read-only registry.
    pub fn build(self) -> Result<BeanRegistry, RegistryError> {
        if self.config.fail_fast && !self.failed.is_empty() {
            return Err(RegistryError::Incomplete {
                failed: self.failed,
            });
        }

        let by_qualified_name = self
            .beans
            .iter()
            .map(|(name, d)| (d.qualified_name(), name.clone()))
            .collect();

        info!(
            "[Registry] Published {} beans ({} failed)",
            self.beans.len(),
            self.failed.len()
        );

        Ok(BeanRegistry {
            beans: self.beans,
            by_qualified_name,
            failed: self.failed,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

/// Immutable set of registered descriptors.
#[derive(Debug)]
pub struct BeanRegistry {
    beans: HashMap<String, TypeDescriptor>,
    by_qualified_name: HashMap<&'static str, String>,
    failed: Vec<String>,
}

impl BeanRegistry {
    /// Look a descriptor up by lookup name or qualified name.
    pub fn get(&self, name_or_qualified: &str) -> Result<&TypeDescriptor, RegistryError> {
        self.beans
            .get(name_or_qualified)
            .or_else(|| {
                self.by_qualified_name
                    .get(name_or_qualified)
                    .and_then(|name| self.beans.get(name))
            })
            .ok_or_else(|| RegistryError::BeanNotFound(name_or_qualified.to_string()))
    }

    pub fn contains(&self, name_or_qualified: &str) -> bool {
        self.get(name_or_qualified).is_ok()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &TypeDescriptor> {
        self.beans.values().filter(move |d| d.category() == category)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beans.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.beans.values()
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    /// Qualified names of types left out during warm-up.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}
