//! Type descriptors
//!
//! A `TypeDescriptor` is built once per registered type and is read-only
//! afterwards. It owns the raw instance and, when the type requires
//! interception, the proxy wrapping it.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::domain::component::Component;
use crate::domain::marker::Category;
use crate::domain::method::{MethodDescriptor, MethodTable};
use crate::domain::naming::derive_lookup_name;
use crate::error::{InvocationError, RegistryError};
use crate::service::DescriptorParser;

/// Type-erased `Arc<T::Api>`.
type ErasedApi = Box<dyn Any + Send + Sync>;

/// Metadata of one registered type plus its constructed instance(s).
pub struct TypeDescriptor {
    lookup_name: String,
    qualified_name: &'static str,
    category: Category,
    raw: Arc<dyn Any + Send + Sync>,
    raw_api: ErasedApi,
    intercepted: Option<ErasedApi>,
    methods: MethodTable,
}

impl TypeDescriptor {
    /// Parse `T` with the default decider and transactional proxy factory.
    pub fn parse<T: Component>(category: Category) -> Result<Self, RegistryError> {
        DescriptorParser::default().parse::<T>(category)
    }

    pub(crate) fn assemble<T: Component>(
        category: Category,
        raw: Arc<T>,
        intercepted: Option<Arc<T::Api>>,
        methods: MethodTable,
    ) -> Self {
        let raw_api: ErasedApi = Box::new(T::upcast(Arc::clone(&raw)));
        Self {
            lookup_name: derive_lookup_name(T::simple_name()),
            qualified_name: T::qualified_name(),
            category,
            raw,
            raw_api,
            intercepted: intercepted.map(|api| Box::new(api) as ErasedApi),
            methods,
        }
    }

    pub fn lookup_name(&self) -> &str {
        &self.lookup_name
    }

    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_intercepted(&self) -> bool {
        self.intercepted.is_some()
    }

    /// Exact match against the lookup name or the qualified name.
    pub fn matches(&self, name_or_qualified: &str) -> bool {
        self.lookup_name == name_or_qualified || self.qualified_name == name_or_qualified
    }

    /// The object callers should invoke: the proxy if present, else the raw
    /// instance, viewed through the capability surface `A`.
    ///
    /// Returns `None` when `A` is not the registered capability surface.
    pub fn effective_instance<A: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<A>> {
        self.effective_receiver().downcast_ref::<Arc<A>>().cloned()
    }

    /// Type-erased effective instance, the receiver expected by
    /// [`MethodHandle::call`](crate::domain::MethodHandle::call).
    pub fn effective_receiver(&self) -> &(dyn Any + Send + Sync) {
        self.intercepted.as_deref().unwrap_or(&*self.raw_api)
    }

    /// The unwrapped instance. Bypasses interception.
    pub fn raw_instance<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.raw).downcast::<T>().ok()
    }

    /// The proxy, if one was built. Bypasses nothing, but callers should use
    /// [`effective_instance`](Self::effective_instance).
    pub fn intercepted_instance<A: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<A>> {
        self.intercepted
            .as_deref()
            .and_then(|api| api.downcast_ref::<Arc<A>>())
            .cloned()
    }

    pub fn get_method(&self, name: &str) -> Result<&MethodDescriptor, RegistryError> {
        self.methods
            .get(name)
            .ok_or_else(|| RegistryError::MethodNotFound {
                bean: self.lookup_name.clone(),
                method: name.to_string(),
            })
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Invoke a method by name on the effective instance.
    pub fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, InvocationError> {
        let descriptor = self
            .methods
            .get(method)
            .ok_or_else(|| InvocationError::MethodNotFound(method.to_string()))?;
        descriptor.handle().call(self.effective_receiver(), args)
    }

    /// Invoke a method by name, binding arguments by parameter name.
    pub fn invoke_named(
        &self,
        method: &str,
        named: &serde_json::Map<String, Value>,
    ) -> Result<Value, InvocationError> {
        let descriptor = self
            .methods
            .get(method)
            .ok_or_else(|| InvocationError::MethodNotFound(method.to_string()))?;
        let args = descriptor.bind_named(named);
        descriptor.handle().call(self.effective_receiver(), &args)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.names().collect();
        methods.sort_unstable();
        f.debug_struct("TypeDescriptor")
            .field("lookup_name", &self.lookup_name)
            .field("qualified_name", &self.qualified_name)
            .field("category", &self.category)
            .field("intercepted", &self.is_intercepted())
            .field("methods", &methods)
            .finish()
    }
}
