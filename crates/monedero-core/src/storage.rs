//! Persistence abstraction the profile store writes through, plus a
//! dangling-reference sweep over loaded documents.

use std::{collections::HashSet, path::PathBuf};

use monedero_domain::{PaymentMethodId, PersistedState};

use crate::error::CoreResult;

/// Describes a persisted backup artifact of the whole state document.
#[derive(Debug, Clone)]
pub struct StateBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing the whole
/// profile set and its backups. `load_state` returns `None` on first
/// run; `save_state` is called after every committed mutation.
pub trait StateStorage: Send + Sync {
    fn load_state(&self) -> CoreResult<Option<PersistedState>>;
    fn save_state(&self, state: &PersistedState) -> CoreResult<()>;
    fn backup_state(&self, state: &PersistedState, note: Option<&str>)
        -> CoreResult<StateBackupInfo>;
    fn list_backups(&self) -> CoreResult<Vec<StateBackupInfo>>;
    fn restore_backup(&self, backup: &StateBackupInfo) -> CoreResult<PersistedState>;
}

/// Detects dangling references and other anomalies within a loaded
/// document. Diagnostic only; the loader never rejects on these.
pub fn state_warnings(state: &PersistedState) -> Vec<String> {
    let mut warnings = Vec::new();

    for profile in &state.profiles {
        let data = &profile.data;
        let account_ids: HashSet<_> = data.bank_accounts.iter().map(|a| a.id).collect();
        let category_ids: HashSet<_> = data.categories.iter().map(|c| c.id).collect();
        let asset_ids: HashSet<_> = data.assets.iter().map(|a| a.id).collect();
        let loan_ids: HashSet<_> = data.loans.iter().map(|l| l.id).collect();
        let liability_ids: HashSet<_> = data.liabilities.iter().map(|l| l.id).collect();

        for txn in &data.transactions {
            if let PaymentMethodId::Bank(id) = txn.payment_method {
                if !account_ids.contains(&id) {
                    warnings.push(format!(
                        "profile `{}`: transaction {} references unknown account {}",
                        profile.name, txn.id, id
                    ));
                }
            }
            if let Some(category) = txn.category_id {
                if !category_ids.contains(&category) {
                    warnings.push(format!(
                        "profile `{}`: transaction {} references missing category {}",
                        profile.name, txn.id, category
                    ));
                }
            }
            if let Some(entity) = txn.patrimonio_id {
                let known = asset_ids.contains(&entity)
                    || loan_ids.contains(&entity)
                    || liability_ids.contains(&entity);
                if !known {
                    warnings.push(format!(
                        "profile `{}`: transaction {} references missing patrimonio record {}",
                        profile.name, txn.id, entity
                    ));
                }
            }
            if let Some(loan) = txn.loan_id {
                if !loan_ids.contains(&loan) {
                    warnings.push(format!(
                        "profile `{}`: transaction {} references missing loan {}",
                        profile.name, txn.id, loan
                    ));
                }
            }
            if let Some(liability) = txn.liability_id {
                if !liability_ids.contains(&liability) {
                    warnings.push(format!(
                        "profile `{}`: transaction {} references missing liability {}",
                        profile.name, txn.id, liability
                    ));
                }
            }
        }
    }
    warnings
}
