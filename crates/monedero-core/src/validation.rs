//! Admission control: rejects any transaction set whose replay would
//! drive a payment method's running balance below zero.

use std::collections::BTreeMap;

use monedero_domain::{BankAccount, PaymentMethodId, Transaction};

use crate::error::{CoreError, CoreResult};

/// The single gatekeeper every mutation submits its candidate
/// transaction list to before committing.
pub struct ValidationService;

impl ValidationService {
    /// Replays the candidate list in chronological order (stable for
    /// same-day ties) accumulating a running balance per payment method,
    /// and fails on the first strictly negative prefix. A balance of
    /// exactly zero is valid.
    ///
    /// The check is indifferent to why an entry exists (transfer leg,
    /// repayment record, plain expense); only amount, kind, date, and
    /// payment method matter. Deterministic: no wall-clock access.
    pub fn check(transactions: &[Transaction], accounts: &[BankAccount]) -> CoreResult<()> {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|txn| txn.date);

        let mut running: BTreeMap<PaymentMethodId, f64> = BTreeMap::new();
        for txn in ordered {
            let balance = running.entry(txn.payment_method).or_insert(0.0);
            *balance += txn.signed_amount();
            if *balance < -f64::EPSILON {
                return Err(CoreError::Validation(format!(
                    "insufficient funds in `{}`: `{}` on {} would leave the balance at {:.2}",
                    method_label(&txn.payment_method, accounts),
                    txn.description,
                    txn.date,
                    *balance,
                )));
            }
        }
        Ok(())
    }
}

/// Display label for a payment method within validation messages.
pub fn method_label(method: &PaymentMethodId, accounts: &[BankAccount]) -> String {
    match method {
        PaymentMethodId::Cash => "Efectivo".to_string(),
        PaymentMethodId::Bank(id) => accounts
            .iter()
            .find(|account| account.id == *id)
            .map(|account| account.name.clone())
            .unwrap_or_else(|| "Cuenta eliminada".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use monedero_domain::TransactionKind;

    fn txn(amount: f64, kind: TransactionKind, day: u32) -> Transaction {
        Transaction::new(
            "entry",
            amount,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            kind,
            PaymentMethodId::Cash,
        )
    }

    #[test]
    fn accepts_a_log_that_never_dips_negative() {
        let log = vec![
            txn(1000.0, TransactionKind::Income, 1),
            txn(400.0, TransactionKind::Expense, 2),
            txn(600.0, TransactionKind::Expense, 3),
        ];
        ValidationService::check(&log, &[]).expect("zero is a valid prefix balance");
    }

    #[test]
    fn rejects_a_negative_prefix_even_when_the_final_total_is_positive() {
        // The expense lands before the covering income in date order.
        let log = vec![
            txn(100.0, TransactionKind::Income, 1),
            txn(500.0, TransactionKind::Income, 10),
            txn(300.0, TransactionKind::Expense, 5),
        ];
        let err = ValidationService::check(&log, &[]).expect_err("prefix dips below zero");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("Efectivo")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn names_the_offending_account() {
        let account = BankAccount::new("BBVA", "#3b82f6");
        let mut expense = txn(50.0, TransactionKind::Expense, 2);
        expense.payment_method = account.method();

        let err = ValidationService::check(&[expense], &[account]).expect_err("no funds");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("BBVA")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn same_day_ties_keep_insertion_order() {
        // Income inserted before the expense on the same date covers it.
        let log = vec![
            txn(200.0, TransactionKind::Income, 1),
            txn(200.0, TransactionKind::Expense, 1),
        ];
        ValidationService::check(&log, &[]).expect("stable sort keeps the income first");
    }
}
