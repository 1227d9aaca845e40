//! Declared markers and category tags
//!
//! Both are supplied by the collaborator that scans declarations; the
//! registry only interrogates markers through an `InterceptionDecider`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A flag declared on a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Calls must be bracketed by begin/commit/rollback.
    Transactional,
    /// Any other declaration, opaque to the registry.
    Custom(&'static str),
}

/// Category tag of a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Service,
    Controller,
    Repository,
    Component,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service => write!(f, "SERVICE"),
            Self::Controller => write!(f, "CONTROLLER"),
            Self::Repository => write!(f, "REPOSITORY"),
            Self::Component => write!(f, "COMPONENT"),
        }
    }
}
