//! The endpoint for updating an existing transaction.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::{ApiClient, SessionToken},
    endpoints,
    html::{Alert, render_alert},
    transaction::form::TransactionFormData,
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for updating a transaction.
///
/// On success the client is redirected to the dashboard, which re-fetches
/// the balance and transaction list and leaves the editor back in create
/// mode. On failure an alert is rendered and the form is left untouched.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(token): Extension<SessionToken>,
    Path(transaction_id): Path<i64>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => {
            return render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error("Could not update transaction", &message),
            );
        }
    };

    match state
        .api
        .update_transaction(&token, transaction_id, &payload)
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not update transaction", &error.to_string()),
            )
        }
    }
}
