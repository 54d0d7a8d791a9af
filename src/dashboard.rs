//! This file defines the dashboard route and its handler.
//!
//! The dashboard is the only page behind the log in. Rendering it performs
//! a full refresh: the balance and transaction list are fetched from the
//! API concurrently and the page shows exactly that snapshot. Every
//! mutation in the app redirects back here, which is what keeps the
//! rendered state in step with the server.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{ApiClient, SessionToken, Transaction, TransactionKind},
    auth::clear_session_cookie,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    sync::{AccountSnapshot, fetch_snapshot},
    transaction::create_transaction_form,
};

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Incoming => "text-green-700 dark:text-green-300",
        TransactionKind::Outgoing => "text-red-700 dark:text-red-300",
    }
}

fn balance_card(snapshot: &AccountSnapshot) -> Markup {
    let balance = snapshot.balance;

    html! {
        section class="rounded bg-white dark:bg-gray-800 shadow p-6 w-full max-w-md text-center"
        {
            h2 class="text-xl font-bold" { "Current Balance" }

            p class="text-3xl font-semibold my-2" { (format_currency(balance.current)) }

            @if let (Some(total_incoming), Some(total_outgoing)) =
                (balance.total_incoming, balance.total_outgoing)
            {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Incoming " (format_currency(total_incoming))
                    " | Outgoing " (format_currency(total_outgoing))
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let edit_route = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_route = format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class={ (TABLE_CELL_STYLE) " text-right " (amount_class(transaction.kind)) }
            {
                (format_currency(transaction.amount))
            }

            td class=(TABLE_CELL_STYLE) { (transaction.kind.label()) }

            td class=(TABLE_CELL_STYLE) { (transaction.date) }

            td class=(TABLE_CELL_STYLE)
            {
                a href=(edit_route) class=(LINK_STYLE) { "Edit" }
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_route)
                    hx-confirm="Delete this transaction?"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn transaction_table(transactions: &[Transaction]) -> Markup {
    html! {
        section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden w-full lg:max-w-3xl"
        {
            h2 class="text-xl font-bold px-6 pt-4" { "Transactions" }

            @if transactions.is_empty() {
                p class="px-6 py-4 text-gray-500 dark:text-gray-400" { "No transactions yet." }
            } @else {
                table class="w-full my-2 text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class="px-6 py-3" { "Description" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class="px-6 py-3" { "Type" }
                            th scope="col" class="px-6 py-3" { "Date" }
                            th scope="col" class="px-6 py-3" {}
                            th scope="col" class="px-6 py-3" {}
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    }
}

fn dashboard_view(snapshot: &AccountSnapshot) -> Markup {
    let nav_bar = NavBar.into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="space-y-6 w-full flex flex-col items-center"
            {
                (balance_card(snapshot))

                (transaction_table(&snapshot.transactions))

                section class="w-full max-w-md"
                {
                    (create_transaction_form())
                }
            }
        }
    };

    base("Dashboard", &content)
}

fn dashboard_error_view(message: &str) -> Markup {
    let nav_bar = NavBar.into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            p class="text-red-500 text-base" { (message) }
        }
    };

    base("Dashboard", &content)
}

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<DashboardState> for Key {
    fn from_ref(state: &DashboardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display a page with the account balance, the transaction list, and the
/// form for adding a transaction.
///
/// If the API rejects the session token the session cookie is cleared and
/// the client is redirected to the log-in page. This is the only place a
/// log out happens without the user asking for one.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(token): Extension<SessionToken>,
    jar: PrivateCookieJar,
) -> Response {
    match fetch_snapshot(&state.api, &token).await {
        Ok(snapshot) => dashboard_view(&snapshot).into_response(),
        Err(Error::Unauthorized) => {
            tracing::info!("The API rejected the session token. Logging out.");
            let jar = clear_session_cookie(jar);

            (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not refresh account data: {error}");
            dashboard_error_view(&error.to_string()).into_response()
        }
    }
}
