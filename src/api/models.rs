//! The wire models of the finance API.
//!
//! Field names on the wire are the API's Portuguese names (`descricao`,
//! `valor`, `tipo`, `data`); the structs expose them under English names via
//! serde renames.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

/// The opaque bearer token returned by a successful log in.
///
/// The token is sent with every authenticated API request. It is never
/// inspected client side; the server alone decides whether it is still
/// valid. `Debug` prints a placeholder so request logging cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string received from the API.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token for use in an `Authorization: Bearer` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(********)")
    }
}

/// The account balance as reported by `GET /saldo`.
///
/// `saldo` is always present. The running totals are reported by the full
/// server implementation but not required, so they deserialize to `None`
/// when absent and the dashboard omits that row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// The current balance: total incoming minus total outgoing.
    #[serde(rename = "saldo")]
    pub current: f64,

    /// Total of all incoming transactions, if the server reports it.
    #[serde(rename = "total_entradas", default)]
    pub total_incoming: Option<f64>,

    /// Total of all outgoing transactions, if the server reports it.
    #[serde(rename = "total_saidas", default)]
    pub total_outgoing: Option<f64>,
}

/// Whether a transaction adds money to the account or removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Incoming,

    /// Money going out. New transactions default to this.
    #[default]
    Outgoing,
}

impl TransactionKind {
    /// The wire value, which doubles as the form select value.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Incoming => "incoming",
            TransactionKind::Outgoing => "outgoing",
        }
    }

    /// The label shown in the transaction form and table.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Incoming => "Incoming",
            TransactionKind::Outgoing => "Outgoing",
        }
    }
}

/// A single recorded monetary event, as returned by the API.
///
/// The client never constructs these; every `Transaction` in memory was
/// deserialized from a server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The server-assigned identifier.
    pub id: i64,

    /// A text description of what the transaction was for.
    #[serde(rename = "descricao")]
    pub description: String,

    /// The amount of money moved, always a non-negative magnitude.
    #[serde(rename = "valor")]
    pub amount: f64,

    /// Whether the money came in or went out.
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,

    /// When the transaction was recorded, server time.
    #[serde(rename = "data", with = "wire_date")]
    pub date: Date,
}

/// The body of a transaction create or update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// A text description of what the transaction is for.
    #[serde(rename = "descricao")]
    pub description: String,

    /// The amount of money moved, a non-negative magnitude.
    #[serde(rename = "valor")]
    pub amount: f64,

    /// Whether the money comes in or goes out.
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
}

/// Serde helpers for the `data` field.
///
/// The server timestamps transactions with a full datetime such as
/// `2025-01-01T12:30:00`, but only the calendar date is meaningful to the
/// client, and some deployments report the bare date. Both forms parse.
mod wire_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(DATE_FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = raw.split('T').next().unwrap_or(&raw);

        Date::parse(date_part, DATE_FORMAT).map_err(de::Error::custom)
    }
}
