//! The endpoint for deleting a transaction.
//!
//! Deletion does not go through the form: the dashboard row has a delete
//! button with an `hx-confirm` prompt that calls this endpoint directly.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::{ApiClient, SessionToken},
    endpoints,
    html::{Alert, render_alert},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The deleted row is not removed locally; on success the client is
/// redirected to the dashboard, which re-fetches the balance and the
/// transaction list.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(token): Extension<SessionToken>,
    Path(transaction_id): Path<i64>,
) -> Response {
    match state.api.delete_transaction(&token, transaction_id).await {
        Ok(()) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not delete transaction", &error.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod delete_transaction_tests {
    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_htmx::HX_REDIRECT;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use crate::{
        api::{ApiClient, SessionToken},
        endpoints,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    #[tokio::test]
    async fn delete_hits_api_and_redirects_to_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/transacoes/3"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"mensagem": "Transação deletada com sucesso"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let state = DeleteTransactionState {
            api: ApiClient::new(server.uri()),
        };

        let response = delete_transaction_endpoint(
            State(state),
            Extension(SessionToken::new("secret-token")),
            Path(3),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::DASHBOARD_VIEW
        );
    }

    #[tokio::test]
    async fn api_failure_renders_alert() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/transacoes/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let state = DeleteTransactionState {
            api: ApiClient::new(server.uri()),
        };

        let response = delete_transaction_endpoint(
            State(state),
            Extension(SessionToken::new("secret-token")),
            Path(3),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("Could not delete transaction"));
    }
}
