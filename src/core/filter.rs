//! Current view filter selection and its application to the transaction list.

use std::str::FromStr;

use crate::domain::{Category, MonthKey, Transaction, TransactionKind};

/// Either the identity filter or a single required value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selector::All => None,
            Selector::Only(value) => Some(value),
        }
    }
}

/// Accepts `all` (or an empty string) for the identity filter, else parses `T`.
impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            trimmed.parse().map(Selector::Only)
        }
    }
}

impl<T> From<T> for Selector<T> {
    fn from(value: T) -> Self {
        Selector::Only(value)
    }
}

/// Three independent selectors. Not persisted; starts as all-identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub kind: Selector<TransactionKind>,
    pub category: Selector<Category>,
    pub month: Selector<MonthKey>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites only the selectors present in `patch`.
    pub fn update(&mut self, patch: FilterPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(month) = patch.month {
            self.month = month;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `transaction` belongs in the general list.
    ///
    /// The month selector does not take part here; it only scopes the
    /// monthly statistics.
    pub fn admits(&self, transaction: &Transaction) -> bool {
        self.kind.matches(&transaction.kind) && self.category.matches(&transaction.category)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        apply(transactions, self)
    }
}

/// Keeps the transactions admitted by the type and category selectors, in order.
pub fn apply<'a>(transactions: &'a [Transaction], filter: &FilterState) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.admits(transaction))
        .collect()
}

/// Partial filter update; `None` leaves a selector unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub kind: Option<Selector<TransactionKind>>,
    pub category: Option<Selector<Category>>,
    pub month: Option<Selector<MonthKey>>,
}

impl FilterPatch {
    pub fn kind(mut self, kind: impl Into<Selector<TransactionKind>>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn category(mut self, category: impl Into<Selector<Category>>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn month(mut self, month: impl Into<Selector<MonthKey>>) -> Self {
        self.month = Some(month.into());
        self
    }
}
