use serde::{Deserialize, Serialize};

/// A user's balance within one guild, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    /// Leaderboard rank; only present when the server computed one.
    #[serde(default)]
    pub rank: Option<i64>,
    pub user_id: String,
    pub cash: i64,
    pub bank: i64,
    pub total: i64,
}

/// Amount accepted by the balance write endpoints. The API takes either a
/// JSON number or a numeric string (including "Infinity").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Amount {
    Int(i64),
    Raw(String),
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Raw(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Raw(value)
    }
}

/// Relative adjustment applied by [`crate::Client::edit_user_balance`].
/// Omitted fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditBalance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Amount>,
    /// Reason shown in the guild's audit log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Absolute assignment applied by [`crate::Client::set_user_balance`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetBalance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Amount>,
    /// Reason shown in the guild's audit log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
