//! Method descriptors and the per-type method table
//!
//! A `MethodDescriptor` records one method of a component's capability
//! surface: its name, ordered parameter types, declared parameter names and a
//! handle that invokes it on any receiver exposing that surface (the raw
//! instance or its proxy).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::InvocationError;

/// Static type of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamType {
    type_name: &'static str,
    type_id: TypeId,
}

impl ParamType {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether this parameter has type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

/// A declared parameter: name plus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub ty: ParamType,
}

impl Parameter {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::of::<T>(),
        }
    }
}

type ErasedCall = dyn Fn(&dyn Any, &[Value]) -> Result<Value, InvocationError> + Send + Sync;

/// Invocable handle bound to one method of one capability surface.
///
/// The receiver passed to [`MethodHandle::call`] must be the type-erased
/// `Arc<A>` the handle was built for.
#[derive(Clone)]
pub struct MethodHandle {
    call: Arc<ErasedCall>,
}

impl MethodHandle {
    pub fn new<A, F>(method: &'static str, f: F) -> Self
    where
        A: ?Sized + Send + Sync + 'static,
        F: Fn(&A, &[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        let call = move |receiver: &dyn Any, args: &[Value]| {
            let api = receiver
                .downcast_ref::<Arc<A>>()
                .ok_or(InvocationError::ReceiverMismatch { method })?;
            f(&**api, args)
        };
        Self {
            call: Arc::new(call),
        }
    }

    pub fn call(&self, receiver: &dyn Any, args: &[Value]) -> Result<Value, InvocationError> {
        (self.call)(receiver, args)
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MethodHandle(..)")
    }
}

/// Immutable metadata of one method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: &'static str,
    parameters: Vec<Parameter>,
    handle: MethodHandle,
}

impl MethodDescriptor {
    pub fn new(name: &'static str, parameters: Vec<Parameter>, handle: MethodHandle) -> Self {
        Self {
            name,
            parameters,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter types in declaration order.
    pub fn parameter_types(&self) -> Vec<ParamType> {
        self.parameters.iter().map(|p| p.ty).collect()
    }

    /// Declared parameter names. Order is not significant.
    pub fn parameter_names(&self) -> HashSet<&'static str> {
        self.parameters.iter().map(|p| p.name).collect()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn handle(&self) -> &MethodHandle {
        &self.handle
    }

    /// Order named arguments by declaration. Missing names bind to `null`.
    pub fn bind_named(&self, named: &serde_json::Map<String, Value>) -> Vec<Value> {
        self.parameters
            .iter()
            .map(|p| named.get(p.name).cloned().unwrap_or(Value::Null))
            .collect()
    }
}

/// Method-name to descriptor mapping of one type.
///
/// Keys are names only: when two descriptors share a name the later one
/// replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<&'static str, MethodDescriptor>,
}

impl MethodTable {
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        let mut methods = HashMap::new();
        for descriptor in descriptors {
            if let Some(previous) = methods.insert(descriptor.name, descriptor) {
                debug!(
                    method = previous.name,
                    replaced_arity = previous.arity(),
                    "Method name collision, keeping the later declaration"
                );
            }
        }
        Self { methods }
    }

    pub fn get(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.values()
    }
}

// Helpers called from `component!` expansions.

#[doc(hidden)]
pub fn check_arity(
    method: &'static str,
    args: &[Value],
    expected: usize,
) -> Result<(), InvocationError> {
    if args.len() != expected {
        return Err(InvocationError::Arity {
            method,
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

#[doc(hidden)]
pub fn decode_argument<T: DeserializeOwned>(
    method: &'static str,
    parameter: &'static str,
    value: Option<&Value>,
) -> Result<T, InvocationError> {
    let value = value.cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| InvocationError::Argument {
        method,
        parameter,
        message: e.to_string(),
    })
}

#[doc(hidden)]
pub fn encode_return<T: Serialize>(method: &'static str, value: &T) -> Result<Value, InvocationError> {
    serde_json::to_value(value).map_err(|e| InvocationError::Encode {
        method,
        message: e.to_string(),
    })
}
