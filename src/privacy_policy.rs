//! The privacy policy page, reachable without logging in.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    auth::session_token,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
};

fn privacy_policy_view() -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="max-w-2xl space-y-4"
            {
                h1 class="text-3xl font-bold" { "Privacy Policy" }

                h2 class="text-xl font-bold" { "1. Information Collection" }
                p
                {
                    "We collect the following information when you register for our service:"
                }
                ul class="list-disc list-inside space-y-1"
                {
                    li
                    {
                        strong { "Email address: " }
                        "used solely to identify your account and allow the log-in process."
                    }
                    li
                    {
                        strong { "Password: " }
                        "your password is run through a hashing algorithm before being "
                        "stored. We never store your password in plain text; only the "
                        "hash, an irreversible cryptographic representation, is kept."
                    }
                }

                h2 class="text-xl font-bold" { "2. Use of Information" }
                p { "Your information is used exclusively to:" }
                ul class="list-disc list-inside space-y-1"
                {
                    li { "Authenticate your access to the platform." }
                    li { "Associate the financial transactions you create with your account." }
                }

                h2 class="text-xl font-bold" { "3. Data Sharing" }
                p
                {
                    strong
                    {
                        "We do not share your email, password, or financial data with anyone."
                    }
                    " All information is stored securely and treated as confidential."
                }

                p { (link(endpoints::LOG_IN_VIEW, "Back to log in")) }
            }
        }
    };

    base("Privacy Policy", &content)
}

/// Display the privacy policy, or the dashboard if a session already exists.
pub async fn get_privacy_policy_page(jar: PrivateCookieJar) -> Response {
    if session_token(&jar).is_some() {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    privacy_policy_view().into_response()
}
