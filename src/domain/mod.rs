pub mod category;
pub mod common;
pub mod month;
pub mod transaction;

pub use category::Category;
pub use common::{Amounted, Displayable, Identifiable};
pub use month::MonthKey;
pub use transaction::{
    NewTransaction, Transaction, TransactionForm, TransactionId, TransactionKind,
};
