use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        category::Category,
        common::{Amounted, Displayable, Identifiable},
    },
    errors::{FormField, ValidationError, ValidationReason},
};

/// Largest accepted amount in whole currency units. Keeps every realistic
/// ledger sum inside `Decimal` range.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Amounts are stored as JSON numbers; values within these limits read back
/// exactly.
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// Checks that `amount` is positive, bounded and has at most two decimals.
pub fn check_amount(amount: Decimal) -> Result<(), ValidationReason> {
    if amount <= Decimal::ZERO {
        Err(ValidationReason::NotPositive)
    } else if amount > Decimal::from(MAX_AMOUNT_UNITS) {
        Err(ValidationReason::TooLarge)
    } else if amount.normalize().scale() > MAX_FRACTION_DIGITS {
        Err(ValidationReason::TooPrecise)
    } else {
        Ok(())
    }
}

/// Opaque identifier assigned to a transaction when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh identifier; never repeats, even within the same instant.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of money flow. Amounts are always stored unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "" => Err(ValidationReason::Blank),
            _ => Err(ValidationReason::Unrecognized(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded income or expense. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Stamps `input` with a fresh id and the current time.
    pub fn new(input: NewTransaction) -> Self {
        Self::with_created_at(input, Utc::now())
    }

    pub fn with_created_at(input: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::generate(),
            title: input.title,
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            date: input.date,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{} / {}]", self.title, self.kind, self.category)
    }
}

/// Caller-supplied fields for a transaction that has not been recorded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            kind,
            category,
            date,
        }
    }

    /// Builds an input from a floating-point amount, rejecting NaN and infinities.
    pub fn from_f64_amount(
        title: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::new(
                FormField::Amount,
                ValidationReason::NotFinite,
            ));
        }
        if amount.abs() > MAX_AMOUNT_UNITS as f64 {
            return Err(ValidationError::new(
                FormField::Amount,
                ValidationReason::TooLarge,
            ));
        }
        let amount = Decimal::from_f64(amount).ok_or_else(|| {
            ValidationError::new(
                FormField::Amount,
                ValidationReason::NotANumber(amount.to_string()),
            )
        })?;
        Ok(Self::new(title, amount, kind, category, date))
    }

    /// Checks the invariants a stored transaction must hold and trims the title.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::new(FormField::Title, ValidationReason::Blank));
        }
        if title.len() != self.title.len() {
            self.title = title.to_string();
        }
        check_amount(self.amount)
            .map_err(|reason| ValidationError::new(FormField::Amount, reason))?;
        Ok(self)
    }
}

/// Raw form input, exactly as a presentation layer collects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub title: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub date: String,
}

impl TransactionForm {
    /// Parses every field, reporting the first field that fails.
    pub fn parse(&self) -> Result<NewTransaction, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::new(FormField::Title, ValidationReason::Blank));
        }

        let raw_amount = self.amount.trim();
        if raw_amount.is_empty() {
            return Err(ValidationError::new(FormField::Amount, ValidationReason::Blank));
        }
        let amount = Decimal::from_str(raw_amount)
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .map_err(|_| {
                ValidationError::new(
                    FormField::Amount,
                    ValidationReason::NotANumber(raw_amount.to_string()),
                )
            })?;

        let kind = self
            .kind
            .parse::<TransactionKind>()
            .map_err(|reason| ValidationError::new(FormField::Kind, reason))?;

        if self.category.trim().is_empty() {
            return Err(ValidationError::new(
                FormField::Category,
                ValidationReason::Blank,
            ));
        }
        let category = self.category.parse::<Category>().unwrap_or_default();

        let raw_date = self.date.trim();
        if raw_date.is_empty() {
            return Err(ValidationError::new(FormField::Date, ValidationReason::Blank));
        }
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            ValidationError::new(
                FormField::Date,
                ValidationReason::InvalidDate(raw_date.to_string()),
            )
        })?;

        NewTransaction::new(title, amount, kind, category, date).validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TransactionForm {
        TransactionForm {
            title: "  Groceries ".into(),
            amount: "42.10".into(),
            kind: "expense".into(),
            category: "food".into(),
            date: "2024-03-05".into(),
        }
    }

    #[test]
    fn parses_complete_form() {
        let input = form().parse().expect("valid form");
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.amount, Decimal::new(4210, 2));
        assert_eq!(input.kind, TransactionKind::Expense);
        assert_eq!(input.category, Category::Food);
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let mut raw = form();
        raw.amount = "twelve".into();
        let err = raw.parse().expect_err("amount is not numeric");
        assert_eq!(err.field, FormField::Amount);
        assert!(matches!(err.reason, ValidationReason::NotANumber(_)));
    }

    #[test]
    fn rejects_blank_title_and_unknown_kind() {
        let mut raw = form();
        raw.title = "   ".into();
        assert_eq!(raw.parse().unwrap_err().field, FormField::Title);

        let mut raw = form();
        raw.kind = "transfer".into();
        let err = raw.parse().unwrap_err();
        assert_eq!(err.field, FormField::Kind);
        assert_eq!(err.reason, ValidationReason::Unrecognized("transfer".into()));
    }

    #[test]
    fn amount_limits_match_what_storage_reads_back() {
        assert_eq!(check_amount(Decimal::new(1, 2)), Ok(()));
        assert_eq!(check_amount(Decimal::new(12_500, 3)), Ok(()));
        assert_eq!(check_amount(Decimal::from(MAX_AMOUNT_UNITS)), Ok(()));
        assert_eq!(
            check_amount(Decimal::from(MAX_AMOUNT_UNITS) + Decimal::new(1, 2)),
            Err(ValidationReason::TooLarge)
        );
        assert_eq!(check_amount(Decimal::new(1, 3)), Err(ValidationReason::TooPrecise));
        assert_eq!(check_amount(Decimal::ZERO), Err(ValidationReason::NotPositive));
    }

    #[test]
    fn rejects_over_precise_form_amount() {
        let mut raw = form();
        raw.amount = "1234567890.123456789".into();
        let err = raw.parse().unwrap_err();
        assert_eq!(err.field, FormField::Amount);
        assert_eq!(err.reason, ValidationReason::TooPrecise);
    }

    #[test]
    fn rejects_malformed_date() {
        let mut raw = form();
        raw.date = "05/03/2024".into();
        assert_eq!(raw.parse().unwrap_err().field, FormField::Date);
    }

    #[test]
    fn rejects_non_finite_float_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = NewTransaction::from_f64_amount(
            "Bad",
            f64::NAN,
            TransactionKind::Income,
            Category::Salary,
            date,
        )
        .unwrap_err();
        assert_eq!(err.reason, ValidationReason::NotFinite);

        let err = NewTransaction::from_f64_amount(
            "Huge",
            1e30,
            TransactionKind::Income,
            Category::Salary,
            date,
        )
        .unwrap_err();
        assert_eq!(err.reason, ValidationReason::TooLarge);

        let ok = NewTransaction::from_f64_amount(
            "Coffee",
            0.01,
            TransactionKind::Expense,
            Category::Food,
            date,
        )
        .unwrap();
        assert_eq!(ok.amount, Decimal::from_f64(0.01).unwrap());
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let input = NewTransaction::new(
            "Salary",
            Decimal::new(1500, 0),
            TransactionKind::Income,
            Category::Salary,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let txn = Transaction::new(input);
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], "salary");
        assert_eq!(value["date"], "2024-03-01");
        assert!(value["amount"].is_number());
        assert!(value["timestamp"].is_string());
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn signed_amount_follows_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expense = Transaction::new(NewTransaction::new(
            "Rent",
            Decimal::new(900, 0),
            TransactionKind::Expense,
            Category::Rent,
            date,
        ));
        assert_eq!(expense.signed_amount(), Decimal::new(-900, 0));
        assert!(expense.is_expense());
        assert_eq!(expense.display_label(), "Rent [expense / rent]");
    }
}
