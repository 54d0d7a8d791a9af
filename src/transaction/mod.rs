//! The transaction editor: the shared form, the create/update/delete
//! endpoints that forward to the finance API, and the edit page.

mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;

pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use edit_endpoint::edit_transaction_endpoint;
pub(crate) use edit_page::get_edit_transaction_page;
pub(crate) use form::create_transaction_form;
