//! Lifecycle of net-worth entities: savings buckets, loans to third
//! parties, and liabilities, together with their linked ledger entries.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use monedero_domain::{
    Asset, Liability, Loan, PatrimonioKind, PaymentMethodId, ProfileData, Transaction,
    TransactionKind,
};

use crate::{
    balance::BalanceService,
    category_service::CategoryService,
    error::{CoreError, CoreResult},
    validation::ValidationService,
};

/// One line of a batch loan repayment.
#[derive(Debug, Clone)]
pub struct LoanPayment {
    pub loan_id: Uuid,
    pub amount: f64,
}

/// Compound operations over the patrimonio collections. Creation of a
/// funded entity debits its source account through a linked expense
/// entry; deletions cascade over every linked entry; batch payments are
/// validated as one candidate, never item by item.
pub struct PatrimonioService;

impl PatrimonioService {
    /// Creates a savings bucket. With a source method the funds move out
    /// of liquid balance through a linked expense entry tagged with the
    /// savings category; without one the asset is purely bookkeeping.
    pub fn create_asset(
        data: &mut ProfileData,
        name: impl Into<String>,
        value: f64,
        date: NaiveDate,
        source: Option<PaymentMethodId>,
    ) -> CoreResult<Uuid> {
        ensure_positive(value)?;
        let name = name.into();

        let mut candidate = data.clone();
        let asset = Asset::new(name.clone(), value, date, source);
        let asset_id = asset.id;

        if let Some(source) = source {
            ensure_funds(data, &source, value)?;
            let mut txn = Transaction::new(
                format!("Ahorro: {}", name),
                value,
                date,
                TransactionKind::Expense,
                source,
            )
            .with_category(CategoryService::savings(data).map(|c| c.id));
            txn.patrimonio_id = Some(asset_id);
            txn.patrimonio_kind = Some(PatrimonioKind::Asset);
            candidate.transactions.push(txn);
        }
        candidate.assets.push(asset);
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(asset = %asset_id, value, "asset created");
        *data = candidate;
        Ok(asset_id)
    }

    /// Lends money to a third party. With a source method the principal
    /// leaves the account through a linked expense entry.
    pub fn create_loan(
        data: &mut ProfileData,
        name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        source: Option<PaymentMethodId>,
    ) -> CoreResult<Uuid> {
        ensure_positive(amount)?;
        let name = name.into();

        let mut candidate = data.clone();
        let loan = Loan::new(name.clone(), amount, date, source);
        let loan_id = loan.id;

        if let Some(source) = source {
            ensure_funds(data, &source, amount)?;
            let mut txn = Transaction::new(
                format!("Préstamo a {}", name),
                amount,
                date,
                TransactionKind::Expense,
                source,
            );
            txn.patrimonio_id = Some(loan_id);
            txn.patrimonio_kind = Some(PatrimonioKind::Loan);
            candidate.transactions.push(txn);
        }
        candidate.loans.push(loan);
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(loan = %loan_id, amount, "loan created");
        *data = candidate;
        Ok(loan_id)
    }

    /// Records a debt. Pure bookkeeping: no funds move at creation.
    pub fn create_liability(
        data: &mut ProfileData,
        name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> CoreResult<Uuid> {
        ensure_positive(amount)?;
        let liability = Liability::new(name, amount, date);
        let id = liability.id;
        data.liabilities.push(liability);
        Ok(id)
    }

    /// Registers received repayments for one or more loans in a single
    /// atomic batch: each line credits `destination` through a linked
    /// income entry and decrements the loan's outstanding amount,
    /// clamped to what remains.
    pub fn receive_loan_payments(
        data: &mut ProfileData,
        payments: &[LoanPayment],
        destination: PaymentMethodId,
        date: NaiveDate,
    ) -> CoreResult<()> {
        if payments.is_empty() {
            return Err(CoreError::InvalidOperation(
                "Debes seleccionar al menos un préstamo".into(),
            ));
        }

        let mut candidate = data.clone();
        for payment in payments {
            let loan = candidate
                .loans
                .iter_mut()
                .find(|l| l.id == payment.loan_id)
                .ok_or_else(|| {
                    CoreError::InvalidOperation("Préstamo no encontrado".into())
                })?;
            let applied = loan.apply_repayment(payment.amount);
            if applied <= 0.0 {
                return Err(CoreError::InvalidOperation(format!(
                    "El préstamo `{}` no tiene importe pendiente que recibir",
                    loan.name
                )));
            }
            let mut txn = Transaction::new(
                format!("Pago de préstamo: {}", loan.name),
                applied,
                date,
                TransactionKind::Income,
                destination,
            );
            txn.loan_id = Some(loan.id);
            candidate.transactions.push(txn);
        }
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(count = payments.len(), "loan repayments committed");
        *data = candidate;
        Ok(())
    }

    /// Pays off the full remaining amount of the selected liabilities in
    /// a single atomic batch debiting `source`.
    pub fn pay_liabilities(
        data: &mut ProfileData,
        ids: &[Uuid],
        source: PaymentMethodId,
        date: NaiveDate,
    ) -> CoreResult<()> {
        if ids.is_empty() {
            return Err(CoreError::InvalidOperation(
                "Debes seleccionar al menos una deuda para pagar".into(),
            ));
        }

        let mut candidate = data.clone();
        for id in ids {
            let liability = candidate
                .liabilities
                .iter_mut()
                .find(|l| l.id == *id)
                .ok_or_else(|| CoreError::InvalidOperation("Deuda no encontrada".into()))?;
            let remaining = liability.amount;
            let applied = liability.apply_payment(remaining);
            if applied <= 0.0 {
                return Err(CoreError::InvalidOperation(format!(
                    "La deuda `{}` ya está liquidada",
                    liability.name
                )));
            }
            let mut txn = Transaction::new(
                format!("Pago de deuda: {}", liability.name),
                applied,
                date,
                TransactionKind::Expense,
                source,
            );
            txn.liability_id = Some(liability.id);
            candidate.transactions.push(txn);
        }
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(count = ids.len(), "liability payments committed");
        *data = candidate;
        Ok(())
    }

    /// Removes a savings bucket and its creation entry.
    pub fn remove_asset(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        Self::remove_entity(data, id, PatrimonioKind::Asset)
    }

    /// Removes a loan, its creation entry, and every repayment entry.
    pub fn remove_loan(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        Self::remove_entity(data, id, PatrimonioKind::Loan)
    }

    /// Removes a liability and every payment entry.
    pub fn remove_liability(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        Self::remove_entity(data, id, PatrimonioKind::Liability)
    }

    fn remove_entity(data: &mut ProfileData, id: Uuid, kind: PatrimonioKind) -> CoreResult<()> {
        let mut candidate = data.clone();
        let found = match kind {
            PatrimonioKind::Asset => {
                let before = candidate.assets.len();
                candidate.assets.retain(|a| a.id != id);
                candidate.assets.len() != before
            }
            PatrimonioKind::Loan => {
                let before = candidate.loans.len();
                candidate.loans.retain(|l| l.id != id);
                candidate.loans.len() != before
            }
            PatrimonioKind::Liability => {
                let before = candidate.liabilities.len();
                candidate.liabilities.retain(|l| l.id != id);
                candidate.liabilities.len() != before
            }
        };
        if !found {
            let label = match kind {
                PatrimonioKind::Asset => "Ahorro no encontrado",
                PatrimonioKind::Loan => "Préstamo no encontrado",
                PatrimonioKind::Liability => "Deuda no encontrada",
            };
            return Err(CoreError::InvalidOperation(label.into()));
        }

        candidate.transactions.retain(|t| {
            t.patrimonio_id != Some(id) && t.loan_id != Some(id) && t.liability_id != Some(id)
        });
        ValidationService::check(&candidate.transactions, &candidate.bank_accounts)?;

        debug!(entity = %id, %kind, "entity removed with linked entries");
        *data = candidate;
        Ok(())
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

fn ensure_funds(data: &ProfileData, source: &PaymentMethodId, amount: f64) -> CoreResult<()> {
    let available = BalanceService::balances(&data.transactions).method(source);
    if available < amount {
        return Err(CoreError::InvalidOperation(
            "Fondos insuficientes en la cuenta de origen".into(),
        ));
    }
    Ok(())
}
