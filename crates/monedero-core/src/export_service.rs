//! Serialization of a profile for external export collaborators.
//!
//! The core only produces the payloads (sectioned CSV, whole-state
//! JSON); download/file mechanics belong to the caller.

use monedero_domain::{PersistedState, Profile, TransactionKind};

use crate::{
    balance::BalanceService,
    error::{CoreError, CoreResult},
    summary_service::SummaryService,
    time::Clock,
    validation::method_label,
};

/// Builds export payloads from the current state.
pub struct ExportService;

impl ExportService {
    /// Sectioned CSV snapshot of one profile: header info, balances,
    /// monthly and lifetime rollups, accounts, fixed expenses, and the
    /// transaction log newest-first. Field text is accent-stripped for
    /// spreadsheet compatibility.
    pub fn profile_csv(profile: &Profile, clock: &dyn Clock) -> CoreResult<String> {
        let data = &profile.data;
        let balances = BalanceService::balances(&data.transactions);
        let monthly = SummaryService::monthly(data, clock);
        let lifetime = SummaryService::lifetime(data);

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record([strip_accents("Informacion del Pais")])?;
        writer.write_record([
            strip_accents("Nombre del Pais"),
            strip_accents(&profile.name),
        ])?;
        writer.write_record([
            "Fecha de Exportacion".to_string(),
            clock.today().to_string(),
        ])?;

        writer.write_record(["Saldo Actual".to_string()])?;
        writer.write_record(["Saldo Total".to_string(), money(balances.total)])?;
        writer.write_record([
            "Saldo en Efectivo".to_string(),
            money(balances.method(&monedero_domain::PaymentMethodId::Cash)),
        ])?;
        writer.write_record([
            "Saldo en Banco".to_string(),
            money(balances.bank_total()),
        ])?;

        writer.write_record(["Resumen Mensual".to_string()])?;
        writer.write_record(["Ingresos (Este Mes)".to_string(), money(monthly.income)])?;
        writer.write_record(["Gastos (Este Mes)".to_string(), money(monthly.expenses)])?;

        writer.write_record(["Resumen Global".to_string()])?;
        writer.write_record([
            "Ingresos (Total)".to_string(),
            money(lifetime.total_income),
        ])?;
        writer.write_record([
            "Gastos (Total)".to_string(),
            money(lifetime.total_expenses),
        ])?;

        writer.write_record(["Cuentas Bancarias".to_string()])?;
        writer.write_record(["Nombre".to_string(), "Saldo Actual".to_string()])?;
        for account in &data.bank_accounts {
            writer.write_record([
                strip_accents(&account.name),
                money(balances.method(&account.method())),
            ])?;
        }

        writer.write_record(["Gastos Fijos".to_string()])?;
        writer.write_record(["Nombre".to_string(), "Cantidad".to_string()])?;
        for expense in &data.fixed_expenses {
            writer.write_record([strip_accents(&expense.name), money(expense.amount)])?;
        }

        writer.write_record(["Transacciones".to_string()])?;
        writer.write_record([
            "Fecha".to_string(),
            "Descripcion".to_string(),
            "Cantidad".to_string(),
            "Tipo".to_string(),
            "Metodo de Pago".to_string(),
        ])?;
        let mut ordered: Vec<_> = data.transactions.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        for txn in ordered {
            let kind = match txn.kind {
                TransactionKind::Income => "Ingreso",
                TransactionKind::Expense => "Gasto",
            };
            writer.write_record([
                txn.date.to_string(),
                strip_accents(&txn.description),
                money(txn.amount),
                kind.to_string(),
                strip_accents(&method_label(&txn.payment_method, &data.bank_accounts)),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| CoreError::Serde(err.to_string()))
    }

    /// Pretty JSON of the whole persisted document; the backup payload
    /// [`crate::profile_store::ProfileStore::import_state`] accepts.
    pub fn state_json(state: &PersistedState) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(state)?)
    }
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Maps the accented characters common in the supported locales to
/// their ASCII counterparts.
fn strip_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}
