//! Validated mutations over the transaction log: plain entries,
//! transfers, edits, and cascading deletes.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use monedero_domain::{
    PatrimonioKind, PaymentMethodId, ProfileData, Transaction, TransactionKind,
};

use crate::{
    category_service::CategoryService,
    error::{CoreError, CoreResult},
    validation::{method_label, ValidationService},
};

/// Input for a plain income/expense entry.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub payment_method: PaymentMethodId,
    pub category_id: Option<Uuid>,
}

/// Compound operations over the log. Every operation builds a candidate
/// state, submits its transaction list to [`ValidationService`], and only
/// then replaces the profile data, so a rejection leaves state untouched.
pub struct TransactionService;

impl TransactionService {
    /// Appends a plain income or expense entry.
    ///
    /// Expenses with no explicit category fall back to the general
    /// category when one exists, and may not predate the first income.
    pub fn add(data: &mut ProfileData, input: NewTransaction) -> CoreResult<Uuid> {
        ensure_positive(input.amount)?;

        let mut category_id = input.category_id;
        if input.kind == TransactionKind::Expense && category_id.is_none() {
            category_id = CategoryService::general(data).map(|c| c.id);
        }

        if input.kind == TransactionKind::Expense {
            if let Some(first_income) = Self::first_income_date(&data.transactions) {
                if input.date < first_income {
                    return Err(CoreError::InvalidOperation(
                        "No puedes registrar un gasto en una fecha anterior a tu primer ingreso"
                            .into(),
                    ));
                }
            }
        }

        let txn = Transaction::new(
            input.description,
            input.amount,
            input.date,
            input.kind,
            input.payment_method,
        )
        .with_category(category_id);
        let id = txn.id;

        let mut candidate = data.clone();
        candidate.transactions.push(txn);
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(transaction = %id, kind = %input.kind, "transaction committed");
        *data = candidate;
        Ok(id)
    }

    /// Moves funds between two payment methods as a linked pair of
    /// entries sharing one transfer id. Returns the transfer id.
    pub fn add_transfer(
        data: &mut ProfileData,
        from: PaymentMethodId,
        to: PaymentMethodId,
        amount: f64,
        date: NaiveDate,
    ) -> CoreResult<Uuid> {
        ensure_positive(amount)?;
        if from == to {
            return Err(CoreError::InvalidOperation(
                "El origen y el destino de la transferencia deben ser distintos".into(),
            ));
        }

        let transfer_id = Uuid::new_v4();
        let description = format!(
            "Transferencia: {} → {}",
            method_label(&from, &data.bank_accounts),
            method_label(&to, &data.bank_accounts),
        );

        let mut outgoing = Transaction::new(
            description.clone(),
            amount,
            date,
            TransactionKind::Expense,
            from,
        );
        outgoing.transfer_id = Some(transfer_id);
        let mut incoming =
            Transaction::new(description, amount, date, TransactionKind::Income, to);
        incoming.transfer_id = Some(transfer_id);

        let mut candidate = data.clone();
        candidate.transactions.push(outgoing);
        candidate.transactions.push(incoming);
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(transfer = %transfer_id, amount, "transfer committed");
        *data = candidate;
        Ok(transfer_id)
    }

    /// Rewrites description and amount of an unlinked entry in place.
    pub fn update(
        data: &mut ProfileData,
        id: Uuid,
        description: impl Into<String>,
        amount: f64,
    ) -> CoreResult<()> {
        ensure_positive(amount)?;
        let existing = data
            .transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if existing.is_locked() {
            return Err(CoreError::InvalidOperation(
                "Las transacciones vinculadas a transferencias o movimientos de patrimonio no se pueden editar"
                    .into(),
            ));
        }

        let mut candidate = data.clone();
        let txn = candidate
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.description = description.into();
        txn.amount = amount;
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        *data = candidate;
        Ok(())
    }

    /// Deletes an entry together with everything it is linked to: the
    /// paired transfer leg and, for entity creation records, the entity
    /// itself. Repayment/payment records restore the entity's remaining
    /// amount so its bounds keep holding.
    pub fn remove(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        let target = data
            .transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))?
            .clone();

        let mut remove_ids = vec![id];
        if let Some(transfer_id) = target.transfer_id {
            remove_ids.extend(
                data.transactions
                    .iter()
                    .filter(|t| t.transfer_id == Some(transfer_id) && t.id != id)
                    .map(|t| t.id),
            );
        }

        let mut candidate = data.clone();
        match (target.patrimonio_id, target.patrimonio_kind) {
            (Some(entity_id), Some(PatrimonioKind::Asset)) => {
                candidate.assets.retain(|a| a.id != entity_id);
            }
            (Some(entity_id), Some(PatrimonioKind::Loan)) => {
                candidate.loans.retain(|l| l.id != entity_id);
            }
            (Some(entity_id), Some(PatrimonioKind::Liability)) => {
                candidate.liabilities.retain(|l| l.id != entity_id);
            }
            _ => {}
        }
        if let Some(loan_id) = target.loan_id {
            if let Some(loan) = candidate.loans.iter_mut().find(|l| l.id == loan_id) {
                loan.restore(target.amount);
            }
        }
        if let Some(liability_id) = target.liability_id {
            if let Some(liability) = candidate
                .liabilities
                .iter_mut()
                .find(|l| l.id == liability_id)
            {
                liability.restore(target.amount);
            }
        }

        candidate
            .transactions
            .retain(|t| !remove_ids.contains(&t.id));
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(transaction = %id, removed = remove_ids.len(), "transactions removed");
        *data = candidate;
        Ok(())
    }

    /// Date of the chronologically first income entry, if any.
    pub fn first_income_date(transactions: &[Transaction]) -> Option<NaiveDate> {
        transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.date)
            .min()
    }
}

fn ensure_positive(amount: f64) -> CoreResult<()> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidOperation(
            "El importe debe ser mayor que cero".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monedero_domain::BankAccount;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn income(amount: f64, day: u32) -> NewTransaction {
        NewTransaction {
            description: "Salary".into(),
            amount,
            date: date(day),
            kind: TransactionKind::Income,
            payment_method: PaymentMethodId::Cash,
            category_id: None,
        }
    }

    fn expense(amount: f64, day: u32) -> NewTransaction {
        NewTransaction {
            description: "Rent".into(),
            amount,
            date: date(day),
            kind: TransactionKind::Expense,
            payment_method: PaymentMethodId::Cash,
            category_id: None,
        }
    }

    #[test]
    fn add_rejects_overdraft_and_leaves_state_unchanged() {
        let mut data = ProfileData::default();
        TransactionService::add(&mut data, income(1000.0, 1)).expect("income accepted");

        let err = TransactionService::add(&mut data, expense(1200.0, 2))
            .expect_err("overdraft must be rejected");
        assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");
        assert_eq!(data.transactions.len(), 1);
    }

    #[test]
    fn add_rejects_expense_before_first_income() {
        let mut data = ProfileData::default();
        TransactionService::add(&mut data, income(1000.0, 10)).expect("income accepted");

        let err = TransactionService::add(&mut data, expense(50.0, 5))
            .expect_err("expense predates first income");
        assert!(matches!(err, CoreError::InvalidOperation(_)), "got {err:?}");
        assert_eq!(data.transactions.len(), 1);
    }

    #[test]
    fn transfer_creates_a_linked_pair() {
        let mut data = ProfileData::default();
        let account = BankAccount::new("BBVA", "#3b82f6");
        let bank = account.method();
        data.bank_accounts.push(account);
        TransactionService::add(&mut data, income(500.0, 1)).expect("income accepted");

        let transfer_id = TransactionService::add_transfer(
            &mut data,
            PaymentMethodId::Cash,
            bank,
            300.0,
            date(2),
        )
        .expect("transfer accepted");

        let legs: Vec<_> = data
            .transactions
            .iter()
            .filter(|t| t.transfer_id == Some(transfer_id))
            .collect();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].amount, legs[1].amount);
        assert_ne!(legs[0].kind, legs[1].kind);
        assert_ne!(legs[0].payment_method, legs[1].payment_method);
        assert_eq!(legs[0].date, legs[1].date);
    }

    #[test]
    fn transfer_rejects_same_endpoint() {
        let mut data = ProfileData::default();
        TransactionService::add(&mut data, income(500.0, 1)).expect("income accepted");
        let err = TransactionService::add_transfer(
            &mut data,
            PaymentMethodId::Cash,
            PaymentMethodId::Cash,
            100.0,
            date(2),
        )
        .expect_err("same endpoint");
        assert!(matches!(err, CoreError::InvalidOperation(_)), "got {err:?}");
    }

    #[test]
    fn removing_one_leg_removes_the_pair() {
        let mut data = ProfileData::default();
        let account = BankAccount::new("BBVA", "#3b82f6");
        let bank = account.method();
        data.bank_accounts.push(account);
        TransactionService::add(&mut data, income(500.0, 1)).expect("income accepted");
        let transfer_id = TransactionService::add_transfer(
            &mut data,
            PaymentMethodId::Cash,
            bank,
            300.0,
            date(2),
        )
        .expect("transfer accepted");

        let leg_id = data
            .transactions
            .iter()
            .find(|t| t.transfer_id == Some(transfer_id))
            .map(|t| t.id)
            .expect("leg exists");
        TransactionService::remove(&mut data, leg_id).expect("delete cascades");

        assert!(data.transactions.iter().all(|t| t.transfer_id.is_none()));
        assert_eq!(data.transactions.len(), 1);
    }

    #[test]
    fn update_refuses_locked_entries() {
        let mut data = ProfileData::default();
        TransactionService::add(&mut data, income(500.0, 1)).expect("income accepted");
        let transfer_id = TransactionService::add_transfer(
            &mut data,
            PaymentMethodId::Cash,
            PaymentMethodId::Bank(Uuid::new_v4()),
            100.0,
            date(2),
        )
        .expect("transfer accepted");
        let leg_id = data
            .transactions
            .iter()
            .find(|t| t.transfer_id == Some(transfer_id))
            .map(|t| t.id)
            .unwrap();

        let err = TransactionService::update(&mut data, leg_id, "edited", 40.0)
            .expect_err("locked entry");
        assert!(matches!(err, CoreError::InvalidOperation(_)), "got {err:?}");
    }

    #[test]
    fn update_rewrites_description_and_amount() {
        let mut data = ProfileData::default();
        let id = TransactionService::add(&mut data, income(500.0, 1)).expect("income accepted");
        TransactionService::update(&mut data, id, "Bonus", 750.0).expect("update accepted");

        let txn = data.transaction(id).expect("entry exists");
        assert_eq!(txn.description, "Bonus");
        assert_eq!(txn.amount, 750.0);
    }
}
