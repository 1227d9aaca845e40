//! Call interception hooks
//!
//! Every call through a [`Proxy`](crate::proxy::Proxy) runs the same state
//! machine:
//!
//! ```text
//! before ──► delegate ──┬── Ok  ──► after_returning ──► return value
//!                       ├── Err ──► after_throwing  ──► return error
//!                       └── panic ► after_throwing  ──► resume panic
//! ```
//!
//! The interceptor holds no per-call state and never substitutes a result.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use uuid::Uuid;

/// One intercepted call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    id: Uuid,
    type_name: &'static str,
    method: &'static str,
}

impl Invocation {
    pub fn new(type_name: &'static str, method: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            type_name,
            method,
        }
    }

    /// Correlation id, unique per call.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn method(&self) -> &'static str {
        self.method
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.method)
    }
}

/// Hooks run around a delegated call.
pub trait Interceptor: Send + Sync {
    /// Stable name for logs.
    fn name(&self) -> &str {
        "interceptor"
    }

    fn before(&self, invocation: &Invocation);

    fn after_returning(&self, invocation: &Invocation);

    fn after_throwing(&self, invocation: &Invocation, cause: &dyn fmt::Display);
}

impl<'a> dyn Interceptor + 'a {
    /// Run `call` bracketed by this interceptor's hooks.
    ///
    /// The result or error of `call` is returned unchanged. A panic inside
    /// `call` fires `after_throwing` and then resumes unwinding.
    pub fn invoke<R, E, F>(&self, invocation: &Invocation, call: F) -> Result<R, E>
    where
        E: fmt::Display,
        F: FnOnce() -> Result<R, E>,
    {
        self.before(invocation);
        match panic::catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(value)) => {
                self.after_returning(invocation);
                Ok(value)
            }
            Ok(Err(error)) => {
                self.after_throwing(invocation, &error);
                Err(error)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.after_throwing(invocation, &message);
                panic::resume_unwind(payload)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
