//! # Bean Registry
//!
//! Object-lifecycle registry with transactional interception.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): descriptors, no I/O
//!   - `TypeDescriptor`: lookup name, qualified name, category, instances, method table
//!   - `MethodDescriptor`: name, ordered parameter types, parameter names, handle
//!   - `Component`: what a registrable type exposes, generated by `component!`
//!
//! - **Ports Layer** (`ports/`): trait definitions
//!   - `InterceptionDecider`: markers → wrap or not
//!   - `Interceptor`: before / after-returning / after-throwing hooks
//!   - `TransactionManager`: opaque begin / commit / rollback
//!
//! - **Proxy Layer** (`proxy/`): `Proxy<T>` decorator and `ProxyFactory`
//!
//! - **Service Layer** (`service/`): `DescriptorParser`, `RegistryBuilder`, `BeanRegistry`
//!
//! - **Adapters Layer** (`adapters/`): `TransactionInterceptor`,
//!   `LoggingTransactionManager`, `TransactionJournal`
//!
//! ## Invariants
//!
//! - **Effective instance**: the proxy if one was built, else the raw instance.
//!   The proxy wraps the raw instance, never the reverse.
//! - **Bracketing**: a proxied call emits exactly `[begin, commit]` on success
//!   and `[begin, rollback]` on failure; the failure reaches the caller unchanged.
//! - **Name-only method keys**: a later method with the same name replaces the
//!   earlier one.
//!
//! ## Usage Example
//!
//! ```ignore
//! use bean_registry::{component, Category, Marker, TypeDescriptor};
//!
//! component! {
//!     PaymentService as PaymentApi {
//!         markers: [Marker::Transactional],
//!         constructor: PaymentService::default,
//!         methods {
//!             fn charge(&self, amount: u64) -> Result<String, PaymentError>;
//!         }
//!     }
//! }
//!
//! let descriptor = TypeDescriptor::parse::<PaymentService>(Category::Service)?;
//! let payments = descriptor.effective_instance::<dyn PaymentApi>().unwrap();
//! payments.charge(100)?; // begin ... commit
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
mod macros;
pub mod ports;
pub mod proxy;
pub mod service;

#[doc(hidden)]
pub use serde_json;

// Re-exports for convenience
pub use adapters::{
    LoggingTransactionManager, TransactionEvent, TransactionInterceptor, TransactionJournal,
    TransactionPhase,
};
pub use config::{ProxyFallback, RegistryConfig};
pub use domain::{
    Category, Component, Marker, MethodDescriptor, MethodHandle, MethodTable, ParamType,
    Parameter, TypeDescriptor,
};
pub use error::{InstantiationError, InvocationError, ProxyConstructionError, RegistryError};
pub use ports::{InterceptionDecider, Interceptor, Invocation, TransactionManager, TransactionalDecider};
pub use proxy::{Proxy, ProxyFactory};
pub use service::{BeanRegistry, DescriptorParser, RegistryBuilder};
