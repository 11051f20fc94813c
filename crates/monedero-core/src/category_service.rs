//! Validated mutations and role lookups for categories.

use uuid::Uuid;

use monedero_domain::{Category, CategoryRole, ProfileData};

use crate::error::{CoreError, CoreResult};

/// Provides validated operations for [`Category`] entities.
///
/// The reserved general/savings categories are found through their role
/// tag, so renaming them keeps the fallback and summary-exclusion
/// behavior intact.
pub struct CategoryService;

impl CategoryService {
    /// Adds a new category. A reserved name claims its role only while
    /// no other category holds it.
    pub fn add(
        data: &mut ProfileData,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> CoreResult<Uuid> {
        let name = name.into();
        Self::validate_name(data, None, &name)?;
        let mut category = Category::new(name, icon, color);
        if category.role != CategoryRole::None
            && data.categories.iter().any(|c| c.role == category.role)
        {
            category.role = CategoryRole::None;
        }
        let id = category.id;
        data.categories.push(category);
        Ok(id)
    }

    /// Renames a category. The role tag travels with the category.
    pub fn rename(data: &mut ProfileData, id: Uuid, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        Self::validate_name(data, Some(id), &name)?;
        let category = data
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::InvalidOperation("Categoría no encontrada".into()))?;
        category.name = name;
        Ok(())
    }

    /// Removes a category when no transaction references it.
    pub fn remove(data: &mut ProfileData, id: Uuid) -> CoreResult<()> {
        if data.transactions.iter().any(|t| t.category_id == Some(id)) {
            return Err(CoreError::InvalidOperation(
                "No puedes eliminar una categoría que está siendo utilizada por algún gasto registrado"
                    .into(),
            ));
        }
        let before = data.categories.len();
        data.categories.retain(|category| category.id != id);
        if data.categories.len() == before {
            return Err(CoreError::InvalidOperation(
                "Categoría no encontrada".into(),
            ));
        }
        Ok(())
    }

    /// Returns a snapshot of all categories.
    pub fn list(data: &ProfileData) -> Vec<&Category> {
        data.categories.iter().collect()
    }

    /// The implicit fallback for uncategorised expenses.
    pub fn general(data: &ProfileData) -> Option<&Category> {
        data.categories
            .iter()
            .find(|c| c.role == CategoryRole::General)
    }

    /// The savings tag excluded from spending summaries.
    pub fn savings(data: &ProfileData) -> Option<&Category> {
        data.categories
            .iter()
            .find(|c| c.role == CategoryRole::Savings)
    }

    fn validate_name(data: &ProfileData, exclude: Option<Uuid>, candidate: &str) -> CoreResult<()> {
        let normalized = candidate.trim().to_lowercase();
        let duplicate = data.categories.iter().any(|category| {
            let name = category.name.trim().to_lowercase();
            name == normalized && (exclude != Some(category.id))
        });
        if duplicate {
            Err(CoreError::InvalidOperation(format!(
                "La categoría `{}` ya existe",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
