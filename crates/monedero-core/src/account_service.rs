//! Validated mutations for bank accounts.

use uuid::Uuid;

use monedero_domain::{BankAccount, PaymentMethodId, ProfileData};

use crate::error::{CoreError, CoreResult};

/// Provides validated mutations for [`BankAccount`] entities.
pub struct AccountService;

impl AccountService {
    /// Adds a new account after validating name uniqueness.
    pub fn add(
        data: &mut ProfileData,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> CoreResult<Uuid> {
        let name = name.into();
        Self::validate_name(data, None, &name)?;
        let account = BankAccount::new(name, color);
        let id = account.id;
        data.bank_accounts.push(account);
        Ok(id)
    }

    /// Renames or recolors an existing account.
    pub fn update(
        data: &mut ProfileData,
        id: Uuid,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> CoreResult<()> {
        let name = name.into();
        Self::validate_name(data, Some(id), &name)?;
        let account = data
            .bank_accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::InvalidOperation("Cuenta no encontrada".into()))?;
        account.name = name;
        account.color = color.into();
        Ok(())
    }

    /// Removes an account when no transaction references it.
    pub fn remove(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        let method = PaymentMethodId::Bank(id);
        if data.transactions.iter().any(|t| t.payment_method == method) {
            return Err(CoreError::InvalidOperation(
                "No puedes eliminar un banco con transacciones asociadas".into(),
            ));
        }
        let before = data.bank_accounts.len();
        data.bank_accounts.retain(|account| account.id != id);
        if data.bank_accounts.len() == before {
            return Err(CoreError::InvalidOperation("Cuenta no encontrada".into()));
        }
        Ok(())
    }

    /// Returns a snapshot of the accounts currently tracked.
    pub fn list(data: &ProfileData) -> Vec<&BankAccount> {
        data.bank_accounts.iter().collect()
    }

    fn validate_name(data: &ProfileData, exclude: Option<Uuid>, candidate: &str) -> CoreResult<()> {
        let normalized = candidate.trim().to_lowercase();
        let duplicate = data.bank_accounts.iter().any(|account| {
            let name = account.name.trim().to_lowercase();
            name == normalized && (exclude != Some(account.id))
        });
        if duplicate {
            Err(CoreError::InvalidOperation(format!(
                "La cuenta `{}` ya existe",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
