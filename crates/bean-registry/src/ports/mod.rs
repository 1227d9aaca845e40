//! Ports: the seams collaborators plug into.
//!
//! - `InterceptionDecider`: decides from declared markers whether a type is wrapped
//! - `Interceptor`: hooks run around every proxied call
//! - `TransactionManager`: opaque begin/commit/rollback effects

pub mod decider;
pub mod interceptor;
pub mod transaction;

pub use decider::{InterceptionDecider, TransactionalDecider};
pub use interceptor::{Interceptor, Invocation};
pub use transaction::TransactionManager;
