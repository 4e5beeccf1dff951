//! The transaction ledger and its change notifications.

pub mod events;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use events::{EventBus, LedgerEvent, SubscriptionId};
pub use ledger::Ledger;
