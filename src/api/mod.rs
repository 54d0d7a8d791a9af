//! The client for the remote finance REST API.
//!
//! All account data (balance, transactions) is owned by the API server; this
//! module is the only place the client talks to it. Handlers call
//! [ApiClient] with the [SessionToken] extracted from the session cookie and
//! render whatever comes back.

mod client;
mod models;

pub use client::ApiClient;
pub use models::{Balance, SessionToken, Transaction, TransactionKind, TransactionPayload};
