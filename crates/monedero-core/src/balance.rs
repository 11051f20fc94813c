//! Per-method and total balance derivation from the transaction log.

use std::collections::BTreeMap;

use monedero_domain::{PaymentMethodId, Transaction};

/// Signed balances derived from a transaction set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances {
    pub total: f64,
    pub by_method: BTreeMap<PaymentMethodId, f64>,
}

impl Balances {
    /// Balance for one payment method; methods with no activity read as zero.
    pub fn method(&self, method: &PaymentMethodId) -> f64 {
        self.by_method.get(method).copied().unwrap_or(0.0)
    }

    /// Sum of every non-cash method.
    pub fn bank_total(&self) -> f64 {
        self.by_method
            .iter()
            .filter(|(method, _)| !method.is_cash())
            .map(|(_, balance)| balance)
            .sum()
    }
}

/// Derives balances by replaying the log in chronological order.
///
/// See also: [`crate::validation::ValidationService`], which replays the
/// same ordering to check running-balance prefixes.
pub struct BalanceService;

impl BalanceService {
    /// Computes the per-method and total balances for a transaction set.
    /// Pure function; same-day entries keep their insertion order.
    pub fn balances(transactions: &[Transaction]) -> Balances {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|txn| txn.date);

        let mut by_method: BTreeMap<PaymentMethodId, f64> = BTreeMap::new();
        for txn in ordered {
            *by_method.entry(txn.payment_method).or_insert(0.0) += txn.signed_amount();
        }
        let total = by_method.values().sum();
        Balances { total, by_method }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use monedero_domain::TransactionKind;
    use uuid::Uuid;

    fn txn(amount: f64, kind: TransactionKind, day: u32, method: PaymentMethodId) -> Transaction {
        Transaction::new(
            "entry",
            amount,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            kind,
            method,
        )
    }

    #[test]
    fn balances_sum_per_method_and_overall() {
        let bank = PaymentMethodId::Bank(Uuid::new_v4());
        let log = vec![
            txn(1000.0, TransactionKind::Income, 1, PaymentMethodId::Cash),
            txn(250.0, TransactionKind::Expense, 2, PaymentMethodId::Cash),
            txn(400.0, TransactionKind::Income, 3, bank),
        ];

        let balances = BalanceService::balances(&log);
        assert_eq!(balances.method(&PaymentMethodId::Cash), 750.0);
        assert_eq!(balances.method(&bank), 400.0);
        assert_eq!(balances.total, 1150.0);
        assert_eq!(balances.bank_total(), 400.0);
    }

    #[test]
    fn unknown_methods_read_zero() {
        let balances = BalanceService::balances(&[]);
        assert_eq!(balances.method(&PaymentMethodId::Cash), 0.0);
        assert_eq!(balances.total, 0.0);
    }
}
