//! Shared traits and primitives for ledger entities.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Token the cash payment method serializes to. Kept stable for
/// compatibility with documents produced by earlier releases.
pub const CASH_METHOD_TOKEN: &str = "efectivo";

/// Exposes a stable identifier for entities stored in a profile.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Identifies the unit balances are tracked against: the cash sentinel
/// or one specific bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMethodId {
    Cash,
    Bank(Uuid),
}

impl PaymentMethodId {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethodId::Cash)
    }

    pub fn bank_id(&self) -> Option<Uuid> {
        match self {
            PaymentMethodId::Cash => None,
            PaymentMethodId::Bank(id) => Some(*id),
        }
    }
}

impl fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethodId::Cash => f.write_str(CASH_METHOD_TOKEN),
            PaymentMethodId::Bank(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for PaymentMethodId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(CASH_METHOD_TOKEN) {
            return Ok(PaymentMethodId::Cash);
        }
        Uuid::parse_str(trimmed)
            .map(PaymentMethodId::Bank)
            .map_err(|_| format!("`{}` is not a payment method id", value))
    }
}

impl Serialize for PaymentMethodId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PaymentMethodId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies the entry's sign to an amount: income adds, expense subtracts.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Net-worth domain a transaction or record belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatrimonioKind {
    Asset,
    Loan,
    Liability,
}

impl fmt::Display for PatrimonioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatrimonioKind::Asset => "Asset",
            PatrimonioKind::Loan => "Loan",
            PatrimonioKind::Liability => "Liability",
        };
        f.write_str(label)
    }
}

/// UI color scheme stored alongside the profile set.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Theme::from_value).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_round_trips_through_strings() {
        let cash: PaymentMethodId = CASH_METHOD_TOKEN.parse().expect("cash token parses");
        assert!(cash.is_cash());
        assert_eq!(cash.to_string(), CASH_METHOD_TOKEN);

        let id = Uuid::new_v4();
        let bank: PaymentMethodId = id.to_string().parse().expect("uuid parses");
        assert_eq!(bank.bank_id(), Some(id));
    }

    #[test]
    fn payment_method_rejects_garbage() {
        let err = "not-a-method".parse::<PaymentMethodId>().expect_err("must fail");
        assert!(err.contains("not-a-method"), "unexpected error: {err}");
    }

    #[test]
    fn theme_tolerates_unknown_values() {
        assert_eq!(Theme::from_value("light"), Theme::Light);
        assert_eq!(Theme::from_value("midnight"), Theme::Dark);
    }
}
