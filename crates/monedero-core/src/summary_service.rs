//! Read-side projections: monthly and lifetime rollups, net worth.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use monedero_domain::{ProfileData, TransactionKind};

use crate::{balance::BalanceService, category_service::CategoryService, time::Clock};

/// Income/expense totals for the current calendar month, with
/// cash/bank splits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub income: f64,
    pub expenses: f64,
    pub income_cash: f64,
    pub income_bank: f64,
    pub expenses_cash: f64,
    pub expenses_bank: f64,
}

/// All-time income/expense totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LifetimeSummary {
    pub total_income: f64,
    pub total_expenses: f64,
}

/// Net-worth breakdown. `net_worth` counts liquid balance and savings
/// against liabilities; `net_worth_with_loans` additionally counts money
/// currently lent out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetWorth {
    pub liquid: f64,
    pub assets: f64,
    pub liabilities: f64,
    pub loans: f64,
    pub net_worth: f64,
    pub net_worth_with_loans: f64,
}

/// Pure aggregations over a profile's ledger, recomputed on every read.
///
/// Transfer legs never count as income or spending, and savings-tagged
/// expenses never count as spending: moving money between buckets is
/// not activity.
pub struct SummaryService;

impl SummaryService {
    /// Totals for the calendar month containing `clock.today()`.
    pub fn monthly(data: &ProfileData, clock: &dyn Clock) -> MonthlySummary {
        let today = clock.today();
        let savings_category = CategoryService::savings(data).map(|c| c.id);

        let mut summary = MonthlySummary::default();
        for txn in &data.transactions {
            if txn.is_transfer() {
                continue;
            }
            if txn.date.year() != today.year() || txn.date.month() != today.month() {
                continue;
            }
            match txn.kind {
                TransactionKind::Income => {
                    summary.income += txn.amount;
                    if txn.payment_method.is_cash() {
                        summary.income_cash += txn.amount;
                    } else {
                        summary.income_bank += txn.amount;
                    }
                }
                TransactionKind::Expense => {
                    if txn.category_id.is_some() && txn.category_id == savings_category {
                        continue;
                    }
                    summary.expenses += txn.amount;
                    if txn.payment_method.is_cash() {
                        summary.expenses_cash += txn.amount;
                    } else {
                        summary.expenses_bank += txn.amount;
                    }
                }
            }
        }
        summary
    }

    /// All-time totals with the same exclusions as [`Self::monthly`].
    pub fn lifetime(data: &ProfileData) -> LifetimeSummary {
        let savings_category = CategoryService::savings(data).map(|c| c.id);

        let mut summary = LifetimeSummary::default();
        for txn in &data.transactions {
            if txn.is_transfer() {
                continue;
            }
            match txn.kind {
                TransactionKind::Income => summary.total_income += txn.amount,
                TransactionKind::Expense => {
                    if txn.category_id.is_some() && txn.category_id == savings_category {
                        continue;
                    }
                    summary.total_expenses += txn.amount;
                }
            }
        }
        summary
    }

    /// Net-worth breakdown over the current state.
    pub fn net_worth(data: &ProfileData) -> NetWorth {
        let liquid = BalanceService::balances(&data.transactions).total;
        let assets: f64 = data.assets.iter().map(|a| a.value).sum();
        let liabilities: f64 = data.liabilities.iter().map(|l| l.amount).sum();
        let loans: f64 = data.loans.iter().map(|l| l.amount).sum();
        let net_worth = liquid + assets - liabilities;
        NetWorth {
            liquid,
            assets,
            liabilities,
            loans,
            net_worth,
            net_worth_with_loans: net_worth + loans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use monedero_domain::{
        Category, CategoryRole, PaymentMethodId, Transaction,
    };
    use uuid::Uuid;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn march() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap())
    }

    fn txn(
        amount: f64,
        kind: TransactionKind,
        year: i32,
        month: u32,
        day: u32,
        method: PaymentMethodId,
    ) -> Transaction {
        Transaction::new(
            "entry",
            amount,
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            kind,
            method,
        )
    }

    #[test]
    fn monthly_splits_by_method_and_window() {
        let bank = PaymentMethodId::Bank(Uuid::new_v4());
        let mut data = ProfileData::default();
        data.transactions.push(txn(
            1000.0,
            TransactionKind::Income,
            2024,
            3,
            1,
            PaymentMethodId::Cash,
        ));
        data.transactions
            .push(txn(400.0, TransactionKind::Income, 2024, 3, 5, bank));
        data.transactions.push(txn(
            150.0,
            TransactionKind::Expense,
            2024,
            3,
            10,
            PaymentMethodId::Cash,
        ));
        // Previous month stays out of the monthly window.
        data.transactions.push(txn(
            999.0,
            TransactionKind::Income,
            2024,
            2,
            1,
            PaymentMethodId::Cash,
        ));

        let summary = SummaryService::monthly(&data, &march());
        assert_eq!(summary.income, 1400.0);
        assert_eq!(summary.income_cash, 1000.0);
        assert_eq!(summary.income_bank, 400.0);
        assert_eq!(summary.expenses, 150.0);
        assert_eq!(summary.expenses_cash, 150.0);
    }

    #[test]
    fn transfers_never_count_as_activity() {
        let mut data = ProfileData::default();
        data.transactions.push(txn(
            500.0,
            TransactionKind::Income,
            2024,
            3,
            1,
            PaymentMethodId::Cash,
        ));
        let transfer_id = Uuid::new_v4();
        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            let mut leg = txn(200.0, kind, 2024, 3, 2, PaymentMethodId::Cash);
            leg.transfer_id = Some(transfer_id);
            data.transactions.push(leg);
        }

        let monthly = SummaryService::monthly(&data, &march());
        assert_eq!(monthly.income, 500.0);
        assert_eq!(monthly.expenses, 0.0);
        let lifetime = SummaryService::lifetime(&data);
        assert_eq!(lifetime.total_income, 500.0);
        assert_eq!(lifetime.total_expenses, 0.0);
    }

    #[test]
    fn savings_tagged_expenses_are_not_spending() {
        let mut data = ProfileData::default();
        let savings = Category::new("Ahorro", "Tag", "#14b8a6").with_role(CategoryRole::Savings);
        let savings_id = savings.id;
        data.categories.push(savings);
        data.transactions.push(txn(
            500.0,
            TransactionKind::Income,
            2024,
            3,
            1,
            PaymentMethodId::Cash,
        ));
        data.transactions.push(
            txn(
                200.0,
                TransactionKind::Expense,
                2024,
                3,
                2,
                PaymentMethodId::Cash,
            )
            .with_category(Some(savings_id)),
        );

        assert_eq!(SummaryService::monthly(&data, &march()).expenses, 0.0);
        assert_eq!(SummaryService::lifetime(&data).total_expenses, 0.0);
    }

    #[test]
    fn net_worth_combines_all_buckets() {
        let mut data = ProfileData::default();
        data.transactions.push(txn(
            1000.0,
            TransactionKind::Income,
            2024,
            3,
            1,
            PaymentMethodId::Cash,
        ));
        data.assets.push(monedero_domain::Asset::new(
            "Emergencias",
            300.0,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            None,
        ));
        data.liabilities.push(monedero_domain::Liability::new(
            "Coche",
            400.0,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        ));
        data.loans.push(monedero_domain::Loan::new(
            "Alice",
            250.0,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            None,
        ));

        let net = SummaryService::net_worth(&data);
        assert_eq!(net.liquid, 1000.0);
        assert_eq!(net.net_worth, 900.0);
        assert_eq!(net.net_worth_with_loans, 1150.0);
    }

    #[test]
    fn projections_are_idempotent() {
        let mut data = ProfileData::default();
        data.transactions.push(txn(
            500.0,
            TransactionKind::Income,
            2024,
            3,
            1,
            PaymentMethodId::Cash,
        ));
        let clock = march();
        assert_eq!(
            SummaryService::monthly(&data, &clock),
            SummaryService::monthly(&data, &clock)
        );
        assert_eq!(SummaryService::lifetime(&data), SummaryService::lifetime(&data));
        assert_eq!(SummaryService::net_worth(&data), SummaryService::net_worth(&data));
    }
}
