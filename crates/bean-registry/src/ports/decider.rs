//! Interception decision

use crate::domain::Marker;

/// Decides whether instances of a type must be wrapped in a proxy.
pub trait InterceptionDecider: Send + Sync {
    fn requires_interception(&self, markers: &[Marker]) -> bool;
}

/// Wraps every type declaring [`Marker::Transactional`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionalDecider;

impl InterceptionDecider for TransactionalDecider {
    fn requires_interception(&self, markers: &[Marker]) -> bool {
        markers.contains(&Marker::Transactional)
    }
}
