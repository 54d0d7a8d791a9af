//! Fetches the account data that backs the dashboard.
//!
//! A refresh reads the balance and the transaction list concurrently and
//! commits both or neither. Every mutation elsewhere in the app redirects
//! back to the dashboard, so this is re-run after each create, update, and
//! delete, keeping the rendered state a verbatim snapshot of the server.

use crate::{
    Error,
    api::{ApiClient, Balance, SessionToken, Transaction},
};

/// Everything the dashboard renders, taken from a single refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    /// The balance at the time of the refresh.
    pub balance: Balance,

    /// All transactions, in the order the server returned them.
    pub transactions: Vec<Transaction>,
}

/// Fetch the balance and transaction list concurrently.
///
/// Both requests must succeed for a snapshot to be produced; a failure in
/// either leaves the caller with no partial data to render.
///
/// # Errors
///
/// Returns [Error::Unauthorized] if the API rejected the token. The caller
/// is expected to clear the session and return the user to the log-in page;
/// this is the only place in the app where a stale token forces a log out.
/// Any other failure returns [Error::Sync] (or [Error::Network] when no
/// response was received at all).
pub async fn fetch_snapshot(
    api: &ApiClient,
    token: &SessionToken,
) -> Result<AccountSnapshot, Error> {
    let (balance, transactions) = tokio::try_join!(api.balance(token), api.transactions(token))?;

    Ok(AccountSnapshot {
        balance,
        transactions,
    })
}
