//! The endpoint for recording a new transaction.

use axum::{
    Extension,
    extract::{FromRef, State},
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

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for creating a transaction.
///
/// On success the client is redirected to the dashboard, which re-fetches
/// the balance and transaction list. On failure an alert is rendered and
/// the form is left untouched so the user can correct it.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(token): Extension<SessionToken>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => {
            return render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error("Could not add transaction", &message),
            );
        }
    };

    match state.api.create_transaction(&token, &payload).await {
        Ok(_) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not add transaction", &error.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod create_transaction_tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use crate::{
        api::{ApiClient, SessionToken, TransactionKind},
        endpoints,
        transaction::form::TransactionFormData,
    };

    use super::{CreateTransactionState, create_transaction_endpoint};

    fn test_form() -> TransactionFormData {
        TransactionFormData {
            description: "Coffee".to_owned(),
            amount: 4.5,
            kind: TransactionKind::Outgoing,
        }
    }

    #[tokio::test]
    async fn create_posts_payload_and_redirects_to_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transacoes/"))
            .and(body_json(json!({"descricao": "Coffee", "valor": 4.5, "tipo": "outgoing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9, "descricao": "Coffee", "valor": 4.5, "tipo": "outgoing", "data": "2025-01-01",
            })))
            .expect(1)
            .mount(&server)
            .await;
        let state = CreateTransactionState {
            api: ApiClient::new(server.uri()),
        };

        let response = create_transaction_endpoint(
            State(state),
            Extension(SessionToken::new("secret-token")),
            Form(test_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::DASHBOARD_VIEW
        );
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_without_calling_the_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transacoes/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let state = CreateTransactionState {
            api: ApiClient::new(server.uri()),
        };
        let form = TransactionFormData {
            amount: -4.5,
            ..test_form()
        };

        let response = create_transaction_endpoint(
            State(state),
            Extension(SessionToken::new("secret-token")),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn api_rejection_renders_alert() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transacoes/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let state = CreateTransactionState {
            api: ApiClient::new(server.uri()),
        };

        let response = create_transaction_endpoint(
            State(state),
            Extension(SessionToken::new("secret-token")),
            Form(test_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("Could not add transaction"));
    }
}
