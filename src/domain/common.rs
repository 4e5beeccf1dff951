//! Shared traits for ledger entities.

use rust_decimal::Decimal;

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// Supplies a common contract for retrieving unsigned monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
