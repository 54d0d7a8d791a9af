//! Cofrinho is a web client for a personal-finance REST API: users register,
//! log in, check their balance, and record incoming and outgoing transactions.
//!
//! This library serves HTML pages directly. It holds no data of its own;
//! every page is rendered from fresh responses of the remote API, and the
//! only client-side state is the bearer token kept in a private cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod api;
mod app_state;
mod auth;
mod dashboard;
mod endpoints;
mod html;
mod logging;
mod navigation;
mod not_found;
mod privacy_policy;
mod routing;
mod sync;
mod transaction;

pub use api::{ApiClient, SessionToken};
pub use app_state::AppState;
pub use logging::logging_middleware;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur while talking to the finance API.
///
/// Every variant is rendered at the view boundary, next to the form or page
/// that triggered the request. [Error::Unauthorized] is the one variant with
/// a cross-cutting effect: when the dashboard refresh receives it, the
/// session cookie is cleared and the client returns to the log-in page.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The API rejected the log-in credentials.
    #[error("{0}")]
    Authentication(String),

    /// The API rejected the registration request, e.g. the email address is
    /// already taken.
    #[error("{0}")]
    Registration(String),

    /// The balance or transaction-list fetch returned a non-success status.
    ///
    /// Neither cached value is replaced when this occurs.
    #[error("could not load account data: {0}")]
    Sync(String),

    /// The API reported that the bearer token is no longer valid.
    #[error("the session is no longer valid")]
    Unauthorized,

    /// A transaction create, update, or delete was rejected.
    #[error("{0}")]
    TransactionWrite(String),

    /// The request never produced an HTTP response, e.g. the API host is
    /// unreachable.
    #[error("could not reach the finance API: {0}")]
    Network(String),
}
