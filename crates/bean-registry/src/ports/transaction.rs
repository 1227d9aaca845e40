//! Transaction effects (Driven Port)
//!
//! Begin, commit and rollback are opaque to the registry. Adapters decide
//! what they mean: log lines, a journal, a real database session.

use std::fmt;

use crate::ports::interceptor::Invocation;

pub trait TransactionManager: Send + Sync {
    fn begin(&self, invocation: &Invocation);

    fn commit(&self, invocation: &Invocation);

    /// `cause` is the failure of the delegated call, already logged.
    fn rollback(&self, invocation: &Invocation, cause: &dyn fmt::Display);
}
