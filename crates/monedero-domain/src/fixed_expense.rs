//! Recurring-expense templates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Template used to pre-fill a recurring expense. A template counts as
/// "paid this month" when a current-month expense matches it by
/// description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedExpense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: f64, category_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category_id,
        }
    }
}

impl Identifiable for FixedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FixedExpense {
    fn name(&self) -> &str {
        &self.name
    }
}
