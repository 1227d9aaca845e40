//! Adapters: concrete implementations of the ports.

pub mod transaction;

pub use transaction::{
    LoggingTransactionManager, TransactionEvent, TransactionInterceptor, TransactionJournal,
    TransactionPhase,
};
