//! Country profiles, their owned ledger data, and the persisted document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    account::BankAccount,
    category::{Category, CategoryRole},
    common::*,
    fixed_expense::FixedExpense,
    patrimonio::{Asset, Liability, Loan},
    transaction::Transaction,
};

/// Everything a profile owns. Collections introduced by later schema
/// versions are serde-defaulted so older documents load with empty sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl ProfileData {
    /// Applies schema backfills after deserialization: tags reserved
    /// categories that predate role markers and repairs deprecated
    /// liability/loan shapes. Returns the number of fixes applied.
    pub fn normalize(&mut self) -> usize {
        let mut fixes = 0;

        for role in [CategoryRole::General, CategoryRole::Savings] {
            if self.categories.iter().any(|c| c.role == role) {
                continue;
            }
            if let Some(category) = self
                .categories
                .iter_mut()
                .find(|c| CategoryRole::from_reserved_name(&c.name) == role)
            {
                category.role = role;
                fixes += 1;
            }
        }

        for liability in &mut self.liabilities {
            if liability.normalize() {
                fixes += 1;
            }
        }
        for loan in &mut self.loans {
            if loan.normalize() {
                fixes += 1;
            }
        }
        fixes
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

/// One isolated financial workspace with its own currency and ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub country_code: String,
    pub currency: String,
    pub data: ProfileData,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        currency: impl Into<String>,
        data: ProfileData,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            country_code: country_code.into(),
            currency: currency.into(),
            data,
        }
    }
}

impl Identifiable for Profile {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The whole persisted document: every profile, the active selection,
/// and the UI theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub active_profile_id: Option<Uuid>,
    #[serde(default)]
    pub theme: Theme,
}

impl PersistedState {
    /// Normalizes every profile and drops an active selection that no
    /// longer resolves. Returns the number of fixes applied.
    pub fn normalize(&mut self) -> usize {
        let mut fixes = 0;
        for profile in &mut self.profiles {
            fixes += profile.data.normalize();
        }
        if let Some(active) = self.active_profile_id {
            if !self.profiles.iter().any(|p| p.id == active) {
                self.active_profile_id = None;
                fixes += 1;
            }
        }
        fixes
    }

    pub fn profile(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profile_mut(&mut self, id: Uuid) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == id)
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_profile_id.and_then(|id| self.profile(id))
    }
}
