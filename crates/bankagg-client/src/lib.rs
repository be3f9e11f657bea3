//! Client core for the bankagg account-aggregation tool.
//!
//! The remote banking API's routing scheme is only partially known, so
//! account and transaction lookup walk an ordered list of candidate
//! endpoint shapes and take the first answer, caching the first
//! discovered account id for later fast-path loads. Deposits and
//! withdrawals go to fixed, unambiguous endpoints and reconcile display
//! state by re-resolving from the source of truth.

pub mod accounts;
pub mod actions;
pub mod admin;
pub mod auth;
pub mod error;
pub mod gateway;
pub mod transactions;

#[cfg(test)]
pub(crate) mod testing;

pub use accounts::AccountResolver;
pub use actions::{ActionKind, ActionSubmitter, SubmitOutcome};
pub use admin::UserSummary;
pub use auth::{login, logout, IdentityPolicy, StaticTestMapping};
pub use error::{ClientError, ClientResult};
pub use gateway::{Gateway, HttpGateway};
pub use transactions::{DateRange, TransactionResolver};
