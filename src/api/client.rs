//! The HTTP client for the finance API.
//!
//! Each method maps one API operation to the error taxonomy in
//! [crate::Error]. Responses are never retried and requests are never given
//! a deadline; a call either resolves, fails, or stays pending.

use serde::Deserialize;

use crate::{
    Error,
    api::models::{Balance, SessionToken, Transaction, TransactionPayload},
};

/// The paths of the remote finance API.
mod paths {
    pub const LOG_IN: &str = "/login";
    pub const REGISTER: &str = "/api/registrar";
    pub const BALANCE: &str = "/saldo";
    pub const TRANSACTIONS: &str = "/transacoes/";

    /// The path for a single transaction.
    pub fn transaction(id: i64) -> String {
        format!("/transacoes/{id}")
    }
}

/// Shown when the API rejects a log in without a message of its own.
pub(crate) const DEFAULT_LOG_IN_ERROR: &str = "Incorrect email or password";
/// Shown when the API rejects a registration without a message of its own.
pub(crate) const DEFAULT_REGISTER_ERROR: &str = "Failed to register";

/// A client for the finance API.
///
/// Cheap to clone: the underlying connection pool is shared between clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the API at `base_url`,
    /// e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange an email and password for a bearer token.
    ///
    /// The API expects form-encoded OAuth2-style fields, with the email sent
    /// as `username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Authentication] with the server's `detail` message
    /// (or [DEFAULT_LOG_IN_ERROR]) when the API responds with a non-success
    /// status.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<SessionToken, Error> {
        let response = self
            .http
            .post(self.url(paths::LOG_IN))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(
                error_detail(response, DEFAULT_LOG_IN_ERROR).await,
            ));
        }

        let body: TokenResponse = response.json().await?;

        Ok(SessionToken::new(body.access_token))
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns [Error::Registration] with the server's `detail` message (or
    /// [DEFAULT_REGISTER_ERROR]) when the API responds with a non-success
    /// status, e.g. for a duplicate email or a password the server considers
    /// too weak.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), Error> {
        let response = self
            .http
            .post(self.url(paths::REGISTER))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Registration(
                error_detail(response, DEFAULT_REGISTER_ERROR).await,
            ));
        }

        Ok(())
    }

    /// Fetch the account balance.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthorized] if the token was rejected, otherwise
    /// [Error::Sync] for any non-success status.
    pub async fn balance(&self, token: &SessionToken) -> Result<Balance, Error> {
        let response = self
            .http
            .get(self.url(paths::BALANCE))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let response = check_fetch_status(response)?;

        Ok(response.json().await?)
    }

    /// Fetch all transactions, in the order the server returns them.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthorized] if the token was rejected, otherwise
    /// [Error::Sync] for any non-success status.
    pub async fn transactions(&self, token: &SessionToken) -> Result<Vec<Transaction>, Error> {
        let response = self
            .http
            .get(self.url(paths::TRANSACTIONS))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let response = check_fetch_status(response)?;

        Ok(response.json().await?)
    }

    /// Fetch a single transaction, used to prefill the edit form.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthorized] if the token was rejected, otherwise
    /// [Error::Sync] for any non-success status.
    pub async fn transaction(&self, token: &SessionToken, id: i64) -> Result<Transaction, Error> {
        let response = self
            .http
            .get(self.url(&paths::transaction(id)))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let response = check_fetch_status(response)?;

        Ok(response.json().await?)
    }

    /// Record a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::TransactionWrite] when the API responds with a
    /// non-success status.
    pub async fn create_transaction(
        &self,
        token: &SessionToken,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .post(self.url(paths::TRANSACTIONS))
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::TransactionWrite(
                error_detail(response, "Failed to add transaction.").await,
            ));
        }

        Ok(response.json().await?)
    }

    /// Replace the transaction with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TransactionWrite] when the API responds with a
    /// non-success status.
    pub async fn update_transaction(
        &self,
        token: &SessionToken,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let response = self
            .http
            .put(self.url(&paths::transaction(id)))
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::TransactionWrite(
                error_detail(response, "Failed to update transaction.").await,
            ));
        }

        Ok(response.json().await?)
    }

    /// Delete the transaction with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TransactionWrite] when the API responds with a
    /// non-success status.
    pub async fn delete_transaction(&self, token: &SessionToken, id: i64) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.url(&paths::transaction(id)))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::TransactionWrite(
                error_detail(response, "Failed to delete transaction.").await,
            ));
        }

        Ok(())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Network(error.without_url().to_string())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// The error body the API sends alongside non-success statuses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

fn check_fetch_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        Err(Error::Unauthorized)
    } else if !status.is_success() {
        Err(Error::Sync(format!("the API returned HTTP {status}")))
    } else {
        Ok(response)
    }
}

async fn error_detail(response: reqwest::Response, default_message: &str) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| default_message.to_owned())
}

#[cfg(test)]
mod api_client_tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, body_string_contains, header, method, path},
    };

    use crate::{
        Error,
        api::models::{SessionToken, TransactionKind, TransactionPayload},
    };

    use super::{ApiClient, DEFAULT_LOG_IN_ERROR};

    fn test_token() -> SessionToken {
        SessionToken::new("secret-token")
    }

    #[tokio::test]
    async fn log_in_sends_form_encoded_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=u%40x.com"))
            .and(body_string_contains("password=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc123",
                "token_type": "bearer",
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let token = client.log_in("u@x.com", "hunter2").await.unwrap();

        assert_eq!(token.as_str(), "abc123");
    }

    #[tokio::test]
    async fn log_in_surfaces_server_detail_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Incorrect email or password"})),
            )
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let error = client.log_in("u@x.com", "bad").await.unwrap_err();

        assert_eq!(
            error,
            Error::Authentication("Incorrect email or password".to_owned())
        );
    }

    #[tokio::test]
    async fn log_in_falls_back_to_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let error = client.log_in("u@x.com", "hunter2").await.unwrap_err();

        assert_eq!(error, Error::Authentication(DEFAULT_LOG_IN_ERROR.to_owned()));
    }

    #[tokio::test]
    async fn register_posts_json_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/registrar"))
            .and(body_json(json!({"email": "u@x.com", "password": "hunter2"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 1, "email": "u@x.com"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        client.register("u@x.com", "hunter2").await.unwrap();
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_email_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/registrar"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered."})),
            )
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let error = client.register("u@x.com", "hunter2").await.unwrap_err();

        assert_eq!(
            error,
            Error::Registration("Email already registered.".to_owned())
        );
    }

    #[tokio::test]
    async fn balance_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/saldo"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saldo": 150.5})))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let balance = client.balance(&test_token()).await.unwrap();

        assert_eq!(balance.current, 150.5);
    }

    #[tokio::test]
    async fn balance_maps_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/saldo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let error = client.balance(&test_token()).await.unwrap_err();

        assert_eq!(error, Error::Unauthorized);
    }

    #[tokio::test]
    async fn transactions_deserializes_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transacoes/"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "descricao": "Coffee", "valor": 4.5, "tipo": "outgoing", "data": "2025-01-01"},
            ])))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let transactions = client.transactions(&test_token()).await.unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "Coffee");
        assert_eq!(transactions[0].kind, TransactionKind::Outgoing);
    }

    #[tokio::test]
    async fn create_transaction_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transacoes/"))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_json(json!({"descricao": "Coffee", "valor": 4.5, "tipo": "outgoing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9, "descricao": "Coffee", "valor": 4.5, "tipo": "outgoing", "data": "2025-01-01",
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());
        let payload = TransactionPayload {
            description: "Coffee".to_owned(),
            amount: 4.5,
            kind: TransactionKind::Outgoing,
        };

        let created = client
            .create_transaction(&test_token(), &payload)
            .await
            .unwrap();

        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn create_transaction_maps_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transacoes/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());
        let payload = TransactionPayload {
            description: "Coffee".to_owned(),
            amount: 4.5,
            kind: TransactionKind::Outgoing,
        };

        let error = client
            .create_transaction(&test_token(), &payload)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            Error::TransactionWrite("Failed to add transaction.".to_owned())
        );
    }

    #[tokio::test]
    async fn update_transaction_puts_to_transaction_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/transacoes/7"))
            .and(body_json(json!({"descricao": "Rent", "valor": 1200.0, "tipo": "outgoing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "descricao": "Rent", "valor": 1200.0, "tipo": "outgoing", "data": "2025-01-01",
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());
        let payload = TransactionPayload {
            description: "Rent".to_owned(),
            amount: 1200.0,
            kind: TransactionKind::Outgoing,
        };

        let updated = client
            .update_transaction(&test_token(), 7, &payload)
            .await
            .unwrap();

        assert_eq!(updated.id, 7);
    }

    #[tokio::test]
    async fn delete_transaction_hits_transaction_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/transacoes/3"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"mensagem": "deleted"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        client.delete_transaction(&test_token(), 3).await.unwrap();
    }

    #[tokio::test]
    async fn delete_transaction_maps_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/transacoes/3"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri());

        let error = client
            .delete_transaction(&test_token(), 3)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            Error::TransactionWrite("Failed to delete transaction.".to_owned())
        );
    }
}
