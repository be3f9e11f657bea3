//! Domain types for the bankagg client.
//!
//! The remote banking API returns different JSON shapes depending on
//! which endpoint variant happened to answer. Everything here normalizes
//! those raw payloads into the record shapes the rest of the workspace
//! works with.

pub mod account;
pub mod identity;
pub mod raw;
pub mod transaction;

pub use account::AccountRecord;
pub use identity::{Identity, Role};
pub use transaction::TransactionRecord;
