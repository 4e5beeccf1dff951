//! Derived views, filtering and the tracker facade.

pub mod filter;
pub mod services;
pub mod tracker;

pub use filter::{FilterPatch, FilterState, Selector};
pub use tracker::Tracker;
