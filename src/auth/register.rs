//! The registration page for creating a new account with the finance API.

use std::time::Duration;

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    api::ApiClient,
    auth::session_token,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, email_input, loading_spinner, log_in_register, password_input},
};

/// Shown once the API confirms the account was created, while the redirect
/// below is pending.
const REGISTER_SUCCESS_MESSAGE: &str = "Account created. Taking you to the log-in page...";

/// How long the success message stays on screen before the client is sent to
/// the log-in page.
const LOG_IN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

fn registration_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email))
            (password_input(None))

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Register"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in"
                }
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                a
                    href=(endpoints::PRIVACY_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Privacy policy"
                }
            }
        }
    }
}

fn registration_success() -> Markup {
    html! {
        p class="text-green-600 dark:text-green-400 text-base" { (REGISTER_SUCCESS_MESSAGE) }

        script {
            (PreEscaped(format!(
                "setTimeout(function () {{ window.location = \"{}\"; }}, {});",
                endpoints::LOG_IN_VIEW,
                LOG_IN_REDIRECT_DELAY.as_millis()
            )))
        }
    }
}

/// Display the registration page, or the dashboard if a session already
/// exists.
pub async fn get_register_page(jar: PrivateCookieJar) -> Response {
    if session_token(&jar).is_some() {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    let registration_form = registration_form("", None);
    let content = log_in_register("Create a new account", &registration_form);
    base("Register", &content).into_response()
}

/// The state needed for creating a new account.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The client for the remote finance API.
    pub api: ApiClient,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// The raw data entered by the user in the registration form.
///
/// Password rules (length, required characters) are enforced by the API, not
/// here; a rejection comes back as a message next to the form.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    /// Email for the new account.
    pub email: String,

    /// Password for the new account.
    pub password: String,
}

/// Handler for registration requests via the POST method.
///
/// On success a confirmation message replaces the form and the client is
/// sent to the log-in page after [LOG_IN_REDIRECT_DELAY]. On failure the
/// form is returned with the API's error message.
pub async fn post_register(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    match state
        .api
        .register(&user_data.email, &user_data.password)
        .await
    {
        Ok(()) => registration_success().into_response(),
        Err(Error::Registration(message)) => {
            registration_form(&user_data.email, Some(&message)).into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while registering: {error}");
            registration_form(&user_data.email, Some(&error.to_string())).into_response()
        }
    }
}
