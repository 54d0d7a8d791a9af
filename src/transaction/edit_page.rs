//! Defines the route handler for the page for editing an existing
//! transaction.
//!
//! The form is prefilled from the API's single-transaction read so that the
//! user edits exactly what the server has, not what happened to be on the
//! last rendered dashboard.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    api::{ApiClient, SessionToken, Transaction},
    endpoints,
    html::{FORM_CONTAINER_STYLE, LINK_STYLE, base},
    navigation::NavBar,
    transaction::form::edit_transaction_form,
};

fn edit_transaction_view(transaction: &Transaction) -> Markup {
    let nav_bar = NavBar.into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (edit_transaction_form(transaction))

            p class="mt-4"
            {
                a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Back to dashboard" }
            }
        }
    };

    base("Edit Transaction", &content)
}

fn edit_transaction_error_view(message: &str) -> Markup {
    let nav_bar = NavBar.into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            p class="text-red-500 text-base" { (message) }

            p class="mt-4"
            {
                a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Back to dashboard" }
            }
        }
    };

    base("Edit Transaction", &content)
}

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Renders the page for editing a transaction, prefilled from the API.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(token): Extension<SessionToken>,
    Path(transaction_id): Path<i64>,
) -> Response {
    match state.api.transaction(&token, transaction_id).await {
        Ok(transaction) => edit_transaction_view(&transaction).into_response(),
        Err(error) => {
            tracing::error!("Could not load transaction {transaction_id} for editing: {error}");
            edit_transaction_error_view(&error.to_string()).into_response()
        }
    }
}
