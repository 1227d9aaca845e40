//! Shop components shared by the integration flows.

use bean_registry::{component, Marker};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// =============================================================================
// PAYMENTS (transactional service)
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },

    #[error("amount must be positive")]
    ZeroAmount,
}

pub trait PaymentApi: Send + Sync {
    fn charge(&self, amount: u64) -> Result<String, PaymentError>;
    fn balance(&self) -> u64;
    fn deposit(&self, amount: u64);
}

pub struct PaymentService {
    balance: Mutex<u64>,
}

impl PaymentService {
    pub const OPENING_BALANCE: u64 = 500;
}

impl Default for PaymentService {
    fn default() -> Self {
        Self {
            balance: Mutex::new(Self::OPENING_BALANCE),
        }
    }
}

impl PaymentApi for PaymentService {
    fn charge(&self, amount: u64) -> Result<String, PaymentError> {
        if amount == 0 {
            return Err(PaymentError::ZeroAmount);
        }
        let mut balance = self.balance.lock();
        if amount > *balance {
            return Err(PaymentError::InsufficientFunds {
                balance: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        Ok("ok".to_string())
    }

    fn balance(&self) -> u64 {
        *self.balance.lock()
    }

    fn deposit(&self, amount: u64) {
        *self.balance.lock() += amount;
    }
}

component! {
    PaymentService as PaymentApi {
        markers: [Marker::Transactional],
        constructor: PaymentService::default,
        methods {
            fn charge(&self, amount: u64) -> Result<String, PaymentError>;
            fn balance(&self) -> u64;
            fn deposit(&self, amount: u64);
        }
    }
}

// =============================================================================
// CUSTOMERS (transactional repository with structured values)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub tier: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("customer {0} not found")]
pub struct CustomerNotFound(pub u32);

pub trait CustomerApi: Send + Sync {
    fn find(&self, id: u32) -> Result<Customer, CustomerNotFound>;
    fn save(&self, customer: Customer);
    fn count(&self) -> usize;
}

#[derive(Default)]
pub struct CustomerRepository {
    rows: Mutex<HashMap<u32, Customer>>,
}

impl CustomerApi for CustomerRepository {
    fn find(&self, id: u32) -> Result<Customer, CustomerNotFound> {
        self.rows
            .lock()
            .get(&id)
            .cloned()
            .ok_or(CustomerNotFound(id))
    }

    fn save(&self, customer: Customer) {
        self.rows.lock().insert(customer.id, customer);
    }

    fn count(&self) -> usize {
        self.rows.lock().len()
    }
}

component! {
    CustomerRepository as CustomerApi {
        markers: [Marker::Transactional],
        constructor: CustomerRepository::default,
        methods {
            fn find(&self, id: u32) -> Result<Customer, CustomerNotFound>;
            fn save(&self, customer: Customer);
            fn count(&self) -> usize;
        }
    }
}

// =============================================================================
// CATALOG (plain controller, never intercepted)
// =============================================================================

pub trait CatalogApi: Send + Sync {
    fn price_of(&self, sku: String, quantity: u32) -> u64;
}

#[derive(Default)]
pub struct CatalogController;

impl CatalogApi for CatalogController {
    fn price_of(&self, sku: String, quantity: u32) -> u64 {
        let unit = if sku.starts_with("BOOK") { 12 } else { 5 };
        unit * u64::from(quantity)
    }
}

component! {
    CatalogController as CatalogApi {
        constructor: CatalogController::default,
        methods {
            fn price_of(&self, sku: String, quantity: u32) -> u64;
        }
    }
}

// =============================================================================
// MAILER (needs configuration, cannot be built by the registry)
// =============================================================================

pub trait MailApi: Send + Sync {
    fn send(&self, to: String, subject: String) -> bool;
}

pub struct SmtpMailer {
    pub host: String,
}

impl MailApi for SmtpMailer {
    fn send(&self, to: String, _subject: String) -> bool {
        !self.host.is_empty() && to.contains('@')
    }
}

component! {
    SmtpMailer as MailApi {
        methods {
            fn send(&self, to: String, subject: String) -> bool;
        }
    }
}
