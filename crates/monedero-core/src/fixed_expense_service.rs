//! Recurring-expense templates and their paid-this-month status.

use chrono::Datelike;
use uuid::Uuid;

use monedero_domain::{FixedExpense, ProfileData, TransactionKind};

use crate::{
    error::{CoreError, CoreResult},
    time::Clock,
};

/// Paid/unpaid status of one template for the current month.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseStatus {
    pub fixed_expense_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub paid: bool,
}

/// Manages [`FixedExpense`] templates. Templates have no balance impact
/// of their own; they only pre-fill expense entries.
pub struct FixedExpenseService;

impl FixedExpenseService {
    pub fn add(
        data: &mut ProfileData,
        name: impl Into<String>,
        amount: f64,
        category_id: Option<Uuid>,
    ) -> CoreResult<Uuid> {
        if amount <= 0.0 {
            return Err(CoreError::InvalidOperation(
                "El importe debe ser mayor que cero".into(),
            ));
        }
        let expense = FixedExpense::new(name, amount, category_id);
        let id = expense.id;
        data.fixed_expenses.push(expense);
        Ok(id)
    }

    pub fn remove(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        let before = data.fixed_expenses.len();
        data.fixed_expenses.retain(|expense| expense.id != id);
        if data.fixed_expenses.len() == before {
            return Err(CoreError::InvalidOperation(
                "Gasto fijo no encontrado".into(),
            ));
        }
        Ok(())
    }

    pub fn list(data: &ProfileData) -> Vec<&FixedExpense> {
        data.fixed_expenses.iter().collect()
    }

    /// Matches each template against this month's expense entries by
    /// description equality.
    pub fn paid_this_month(data: &ProfileData, clock: &dyn Clock) -> Vec<FixedExpenseStatus> {
        let today = clock.today();
        data.fixed_expenses
            .iter()
            .map(|expense| {
                let paid = data.transactions.iter().any(|t| {
                    t.kind == TransactionKind::Expense
                        && t.date.year() == today.year()
                        && t.date.month() == today.month()
                        && t.description == expense.name
                });
                FixedExpenseStatus {
                    fixed_expense_id: expense.id,
                    name: expense.name.clone(),
                    amount: expense.amount,
                    paid,
                }
            })
            .collect()
    }
}
