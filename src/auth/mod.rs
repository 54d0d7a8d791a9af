//! Session handling: the cookie that stores the bearer token, the middleware
//! that guards authenticated routes, and the log-in, registration, and
//! log-out handlers.

mod cookie;
mod guard;
mod log_in;
mod log_out;
mod register;

pub(crate) use cookie::{clear_session_cookie, session_token, set_session_cookie};
pub(crate) use guard::{AuthState, auth_guard, auth_guard_hx};
pub(crate) use log_in::{get_log_in_page, post_log_in};
pub(crate) use log_out::get_log_out;
pub(crate) use register::{get_register_page, post_register};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
