//! Bank account records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A user-defined bank account; one balance bucket besides cash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankAccount {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl BankAccount {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The payment method handle for this account.
    pub fn method(&self) -> PaymentMethodId {
        PaymentMethodId::Bank(self.id)
    }
}

impl Identifiable for BankAccount {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for BankAccount {
    fn name(&self) -> &str {
        &self.name
    }
}
