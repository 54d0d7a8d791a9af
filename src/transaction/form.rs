//! The transaction form, shared between the dashboard's create form and the
//! edit page.
//!
//! The form has two modes. Create is the default and posts a new
//! transaction; Edit is entered when a transaction is supplied to prefill
//! the fields and puts to that transaction's id. Submitting either mode
//! lands back on the dashboard, which re-fetches all account data, so a
//! successful edit leaves the app with an empty create form again.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::{Transaction, TransactionKind, TransactionPayload},
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

pub struct TransactionFormDefaults<'a> {
    pub description: Option<&'a str>,
    pub amount: Option<f64>,
    pub kind: TransactionKind,
}

impl Default for TransactionFormDefaults<'_> {
    fn default() -> Self {
        Self {
            description: None,
            amount: None,
            kind: TransactionKind::Outgoing,
        }
    }
}

impl<'a> From<&'a Transaction> for TransactionFormDefaults<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            description: Some(&transaction.description),
            amount: Some(transaction.amount),
            kind: transaction.kind,
        }
    }
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.abs()));

    html! {
        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="kind"
                class=(FORM_LABEL_STYLE)
            {
                "Type"
            }

            select
                name="kind"
                id="kind"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for kind in [TransactionKind::Outgoing, TransactionKind::Incoming] {
                    @if kind == defaults.kind {
                        option value=(kind.as_str()) selected { (kind.label()) }
                    } @else {
                        option value=(kind.as_str()) { (kind.label()) }
                    }
                }
            }
        }
    }
}

/// The create-mode form embedded in the dashboard.
pub fn create_transaction_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Add New Transaction" }

            (transaction_form_fields(&TransactionFormDefaults::default()))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " Add Transaction"
            }
        }
    }
}

/// The edit-mode form, prefilled from `transaction`.
pub fn edit_transaction_form(transaction: &Transaction) -> Markup {
    let update_route = format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        form
            hx-put=(update_route)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Edit Transaction" }

            (transaction_form_fields(&TransactionFormDefaults::from(transaction)))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " Save Changes"
            }
        }
    }
}

/// The raw data submitted from the transaction form.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionFormData {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl TransactionFormData {
    /// Validate the form data and convert it into an API payload.
    ///
    /// The description must be non-empty after trimming and the amount a
    /// finite, non-negative number. Amounts are rounded to two decimal
    /// places, the precision the form's number input advertises.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for display next to the form.
    pub fn into_payload(self) -> Result<TransactionPayload, String> {
        let description = self.description.trim();

        if description.is_empty() {
            return Err("Description cannot be empty.".to_owned());
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err("Amount must be a non-negative number.".to_owned());
        }

        let amount = (self.amount * 100.0).round() / 100.0;

        Ok(TransactionPayload {
            description: description.to_owned(),
            amount,
            kind: self.kind,
        })
    }
}


#[cfg(test)]
mod form_data_tests {
    use crate::api::TransactionKind;

    use super::TransactionFormData;

    fn form(description: &str, amount: f64) -> TransactionFormData {
        TransactionFormData {
            description: description.to_owned(),
            amount,
            kind: TransactionKind::Outgoing,
        }
    }

    #[test]
    fn rejects_blank_description() {
        assert!(form("   ", 1.0).into_payload().is_err());
    }

    #[test]
    fn rejects_negative_amount() {
        assert!(form("Coffee", -4.5).into_payload().is_err());
    }

    #[test]
    fn rejects_non_finite_amount() {
        assert!(form("Coffee", f64::NAN).into_payload().is_err());
        assert!(form("Coffee", f64::INFINITY).into_payload().is_err());
    }

    #[test]
    fn rounds_amount_to_two_decimal_places() {
        let payload = form("Coffee", 4.567).into_payload().unwrap();

        assert_eq!(payload.amount, 4.57);
    }

    #[test]
    fn trims_description() {
        let payload = form("  Coffee  ", 4.5).into_payload().unwrap();

        assert_eq!(payload.description, "Coffee");
    }

    #[test]
    fn form_data_deserializes_from_url_encoded_fields() {
        let form: TransactionFormData =
            serde_urlencoded::from_str("description=Coffee&amount=4.50&kind=incoming").unwrap();

        assert_eq!(form.description, "Coffee");
        assert_eq!(form.amount, 4.5);
        assert_eq!(form.kind, TransactionKind::Incoming);
    }
}
