//! Expense categories and reserved category roles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Categorises expense activity for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub role: CategoryRole,
}

impl Category {
    /// Creates a category, assigning a reserved role when the name is
    /// one of the conventional reserved names.
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        let name = name.into();
        let role = CategoryRole::from_reserved_name(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            icon: icon.into(),
            color: color.into(),
            role,
        }
    }

    pub fn with_role(mut self, role: CategoryRole) -> Self {
        self.role = role;
        self
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Marks the two reserved categories: the implicit fallback for
/// uncategorised expenses and the savings tag excluded from spending
/// summaries. The role survives renames; name matching is only the
/// migration path for documents written before roles existed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryRole {
    General,
    Savings,
    #[default]
    None,
}

impl CategoryRole {
    /// Maps the conventional lower-cased reserved names to a role.
    pub fn from_reserved_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "general" => CategoryRole::General,
            "ahorro" => CategoryRole::Savings,
            _ => CategoryRole::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_get_roles_on_creation() {
        assert_eq!(
            Category::new("General", "Tag", "#64748b").role,
            CategoryRole::General
        );
        assert_eq!(
            Category::new("Ahorro", "Tag", "#14b8a6").role,
            CategoryRole::Savings
        );
        assert_eq!(
            Category::new("Comida", "Food", "#008f39").role,
            CategoryRole::None
        );
    }

    #[test]
    fn role_defaults_to_none_on_old_documents() {
        let json = r##"{
            "id": "27b9f7de-49b3-4f3b-a0cb-14f29eafc416",
            "name": "Transporte",
            "icon": "Transport",
            "color": "#3b82f6"
        }"##;
        let category: Category = serde_json::from_str(json).expect("category parses");
        assert_eq!(category.role, CategoryRole::None);
    }
}
