//! Transaction bracketing adapters
//!
//! - `TransactionInterceptor`: maps interceptor hooks onto a `TransactionManager`
//! - `LoggingTransactionManager`: begin/commit/rollback as log lines
//! - `TransactionJournal`: in-memory record of every effect, for auditing

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::ports::{Interceptor, Invocation, TransactionManager};

/// Brackets each proxied call in a transaction.
///
/// begin before the call, commit on success, rollback on failure. The
/// failure itself is passed back to the caller untouched.
pub struct TransactionInterceptor {
    manager: Arc<dyn TransactionManager>,
}

impl TransactionInterceptor {
    pub fn new(manager: Arc<dyn TransactionManager>) -> Self {
        Self { manager }
    }
}

impl Interceptor for TransactionInterceptor {
    fn name(&self) -> &str {
        "transaction"
    }

    fn before(&self, invocation: &Invocation) {
        self.manager.begin(invocation);
    }

    fn after_returning(&self, invocation: &Invocation) {
        self.manager.commit(invocation);
    }

    fn after_throwing(&self, invocation: &Invocation, cause: &dyn fmt::Display) {
        error!(
            tx_id = %invocation.id(),
            target = %invocation,
            "Transactional call failed: {}",
            cause
        );
        self.manager.rollback(invocation, cause);
    }
}

/// Transaction effects as structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransactionManager;

impl TransactionManager for LoggingTransactionManager {
    fn begin(&self, invocation: &Invocation) {
        info!(tx_id = %invocation.id(), target = %invocation, "[Tx] Begin transaction");
    }

    fn commit(&self, invocation: &Invocation) {
        info!(tx_id = %invocation.id(), target = %invocation, "[Tx] Commit transaction");
    }

    fn rollback(&self, invocation: &Invocation, _cause: &dyn fmt::Display) {
        info!(tx_id = %invocation.id(), target = %invocation, "[Tx] Rollback transaction");
    }
}

/// Transaction effect kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionPhase {
    Begin,
    Commit,
    Rollback,
}

/// One recorded transaction effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub tx_id: Uuid,
    /// `Type::method` of the intercepted call.
    pub target: String,
    pub phase: TransactionPhase,
    /// Failure message, rollback only.
    pub cause: Option<String>,
}

/// Records every effect in order.
#[derive(Debug, Default)]
pub struct TransactionJournal {
    events: Mutex<Vec<TransactionEvent>>,
}

impl TransactionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransactionEvent> {
        self.events.lock().clone()
    }

    /// Phases only, in recording order.
    pub fn phases(&self) -> Vec<TransactionPhase> {
        self.events.lock().iter().map(|e| e.phase).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn record(&self, invocation: &Invocation, phase: TransactionPhase, cause: Option<String>) {
        self.events.lock().push(TransactionEvent {
            tx_id: invocation.id(),
            target: invocation.to_string(),
            phase,
            cause,
        });
    }
}

impl TransactionManager for TransactionJournal {
    fn begin(&self, invocation: &Invocation) {
        self.record(invocation, TransactionPhase::Begin, None);
    }

    fn commit(&self, invocation: &Invocation) {
        self.record(invocation, TransactionPhase::Commit, None);
    }

    fn rollback(&self, invocation: &Invocation, cause: &dyn fmt::Display) {
        self.record(invocation, TransactionPhase::Rollback, Some(cause.to_string()));
    }
}
