//! The append-style transaction log entry and its link fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A single dated ledger entry.
///
/// A transaction may stand alone, be one leg of a transfer
/// (`transfer_id` groups exactly two legs), be the creation record of a
/// savings or loan entity (`patrimonio_id`/`patrimonio_kind`), or be a
/// repayment/payment record (`loan_id`/`liability_id`). Linked entries
/// are managed by their owning operation and are not individually
/// editable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub payment_method: PaymentMethodId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrimonio_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrimonio_kind: Option<PatrimonioKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionKind,
        payment_method: PaymentMethodId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date,
            kind,
            payment_method,
            category_id: None,
            transfer_id: None,
            patrimonio_id: None,
            patrimonio_kind: None,
            loan_id: None,
            liability_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Option<Uuid>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Amount with the entry's sign applied.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount)
    }

    pub fn is_transfer(&self) -> bool {
        self.transfer_id.is_some()
    }

    /// True when the entry is the creation or payment record of a
    /// savings/loan/liability entity.
    pub fn is_entity_linked(&self) -> bool {
        self.patrimonio_id.is_some() || self.loan_id.is_some() || self.liability_id.is_some()
    }

    /// Locked entries cannot be edited in place; they are owned by a
    /// compound operation (transfer or entity lifecycle).
    pub fn is_locked(&self) -> bool {
        self.is_transfer() || self.is_entity_linked()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}
