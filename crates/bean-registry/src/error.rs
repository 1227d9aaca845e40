//! Error types for the bean registry

use thiserror::Error;

/// Errors raised while building or querying type descriptors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to instantiate {bean}: {source}")]
    Instantiation {
        bean: String,
        #[source]
        source: InstantiationError,
    },

    #[error("Proxy construction failed: {0}")]
    ProxyConstruction(#[from] ProxyConstructionError),

    #[error("Method not found: {bean}.{method}")]
    MethodNotFound { bean: String, method: String },

    #[error("Bean not found: {0}")]
    BeanNotFound(String),

    #[error("Bean already registered: {0}")]
    DuplicateName(String),

    #[error("Registry incomplete, failed registrations: {failed:?}")]
    Incomplete { failed: Vec<String> },
}

/// A type could not be default-constructed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("{type_name} declares no zero-argument constructor")]
    NoDefaultConstructor { type_name: &'static str },

    #[error("constructor of {type_name} failed: {message}")]
    ConstructorFailed {
        type_name: &'static str,
        message: String,
    },
}

/// An interception wrapper could not be produced for a type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyConstructionError {
    #[error("{type_name} does not expose an interceptable capability surface")]
    NotInterceptable { type_name: &'static str },
}

/// Errors from dynamic invocation through a method handle
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("{method} expects {expected} arguments, got {actual}")]
    Arity {
        method: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument `{parameter}` for {method}: {message}")]
    Argument {
        method: &'static str,
        parameter: &'static str,
        message: String,
    },

    #[error("Could not encode return value of {method}: {message}")]
    Encode {
        method: &'static str,
        message: String,
    },

    #[error("Receiver does not implement the capability surface of {method}")]
    ReceiverMismatch { method: &'static str },

    /// The delegated method itself failed; `source` is the original error.
    #[error("{method} failed: {source}")]
    Failed {
        method: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InvocationError {
    /// Wrap a failure raised by the invoked method, keeping its concrete type.
    pub fn failed<E>(method: &'static str, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed {
            method,
            source: Box::new(error),
        }
    }

    /// Borrow the original method failure as `E`, if that is what happened.
    pub fn downcast_failure<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Failed { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
