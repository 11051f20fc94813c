//! Net-worth entities: savings buckets, liabilities, and loans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A named savings bucket, earmarked out of liquid balance.
///
/// When `source_method` is set the asset was funded by a linked expense
/// transaction; without it the asset is a manually tracked value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_method: Option<PaymentMethodId>,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        date: NaiveDate,
        source_method: Option<PaymentMethodId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            date,
            source_method,
        }
    }
}

impl Identifiable for Asset {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Money the user owes. `amount` is the remaining balance; payments
/// decrement it, floored at zero and never exceeding `original_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub original_amount: f64,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Liability {
    pub fn new(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            original_amount: amount,
            amount,
            date,
        }
    }

    /// Applies a payment, returning the portion actually applied.
    pub fn apply_payment(&mut self, amount: f64) -> f64 {
        let applied = amount.min(self.amount).max(0.0);
        self.amount -= applied;
        applied
    }

    /// Reverses a payment, capped at the original amount.
    pub fn restore(&mut self, amount: f64) {
        self.amount = (self.amount + amount).min(self.original_amount);
    }

    /// Backfills `original_amount` for documents written before the
    /// field existed. Returns true when a fix was applied.
    pub fn normalize(&mut self) -> bool {
        if self.original_amount < self.amount {
            self.original_amount = self.amount;
            return true;
        }
        false
    }
}

impl Identifiable for Liability {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Liability {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A historical loan top-up recorded before the transaction log began.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanAddition {
    pub amount: f64,
    pub date: NaiveDate,
}

/// Money lent to a third party. `amount` is the outstanding balance;
/// repayments decrement it, floored at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loan {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub original_amount: f64,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_method: Option<PaymentMethodId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_additions: Vec<LoanAddition>,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        source_method: Option<PaymentMethodId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            original_amount: amount,
            amount,
            date,
            source_method,
            initial_additions: Vec::new(),
        }
    }

    /// Applies a received repayment, returning the portion actually applied.
    pub fn apply_repayment(&mut self, amount: f64) -> f64 {
        let applied = amount.min(self.amount).max(0.0);
        self.amount -= applied;
        applied
    }

    /// Reverses a repayment, capped at the original amount.
    pub fn restore(&mut self, amount: f64) {
        self.amount = (self.amount + amount).min(self.original_amount);
    }

    /// Backfills `original_amount` for documents from the deprecated
    /// shape. Returns true when a fix was applied.
    pub fn normalize(&mut self) -> bool {
        if self.original_amount < self.amount {
            self.original_amount = self.amount;
            return true;
        }
        false
    }
}

impl Identifiable for Loan {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Loan {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn loan_repayments_clamp_to_outstanding() {
        let mut loan = Loan::new("Alice", 200.0, date(), Some(PaymentMethodId::Cash));
        assert_eq!(loan.apply_repayment(150.0), 150.0);
        assert_eq!(loan.amount, 50.0);
        assert_eq!(loan.apply_repayment(80.0), 50.0);
        assert_eq!(loan.amount, 0.0);
    }

    #[test]
    fn restore_never_exceeds_original() {
        let mut liability = Liability::new("Taxes", 300.0, date());
        liability.apply_payment(300.0);
        liability.restore(500.0);
        assert_eq!(liability.amount, 300.0);
    }

    #[test]
    fn deprecated_shape_backfills_original_amount() {
        let json = r#"{
            "id": "5a6ddca2-33d7-4ca0-9f26-6f3bcbca9f3e",
            "name": "Old debt",
            "amount": 120.0,
            "date": "2023-11-05"
        }"#;
        let mut liability: Liability = serde_json::from_str(json).expect("legacy doc parses");
        assert!(liability.normalize());
        assert_eq!(liability.original_amount, 120.0);
        assert!(!liability.normalize());
    }
}
