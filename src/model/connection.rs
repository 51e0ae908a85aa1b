//! Connection and account models
//!
//! A [`Connection`] is one linked institution (a Plaid item) and owns the
//! accounts fetched through it. Accounts carry two identifiers:
//!
//! * `id` - the backend record id, the only value accepted by mutation calls
//! * `account_id` - the Plaid account id, the value used to match accounts
//!
//! The two are unrelated and must both be kept. [`AccountRef`] is the single
//! place where the pair travels together; local matching always goes through
//! [`AccountKey`].

use crate::constants::{DEFAULT_CURRENCY, UNKNOWN_INSTITUTION, UNNAMED_ACCOUNT};
use crate::model::ids::{AccountKey, AccountRecordId, ConnectionId, UserId};
use chrono::{DateTime, NaiveDateTime, Utc};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Deserializer, Serialize};

/// A linked bank connection with its accounts
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct Connection {
    /// Connection identifier, target of delete calls
    pub id: ConnectionId,
    /// Display name of the institution, when the backend knows it
    #[serde(default)]
    pub institution_name: Option<String>,
    /// Plaid item identifier
    #[serde(default)]
    pub item_id: Option<String>,
    /// Owner of the connection
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// When the connection was created
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Accounts reachable through this connection, in server order
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub accounts: Vec<Account>,
}

impl Connection {
    /// Returns the institution name, or a default label when it is missing or blank
    #[must_use]
    pub fn institution_label(&self) -> &str {
        match self.institution_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_INSTITUTION,
        }
    }

    /// Number of accounts under this connection
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Finds an account of this connection by its Plaid account id
    #[must_use]
    pub fn account(&self, key: &AccountKey) -> Option<&Account> {
        self.accounts.iter().find(|account| &account.account_id == key)
    }
}

/// A bank account nested under a connection
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct Account {
    /// Backend record id, used for mutation calls
    pub id: AccountRecordId,
    /// Plaid account id, used for matching
    pub account_id: AccountKey,
    /// Name reported by the institution
    #[serde(default)]
    pub name: Option<String>,
    /// User-chosen nickname
    #[serde(default)]
    pub nickname: Option<String>,
    /// Account type (depository, credit, ...)
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    /// Account subtype (checking, savings, ...)
    #[serde(default)]
    pub subtype: Option<String>,
    /// Current balance in `currency`
    #[serde(default)]
    pub balance_current: Option<f64>,
    /// ISO currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Connection this account belongs to, as reported by the backend
    #[serde(default)]
    pub plaid_user_id: Option<ConnectionId>,
}

impl Account {
    /// Name to show for this account
    ///
    /// The nickname wins when it is present and non-empty, otherwise the
    /// institution name of the account is used.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => self.name.as_deref().unwrap_or(UNNAMED_ACCOUNT),
        }
    }

    /// Currency code, defaulting to USD
    #[must_use]
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Account type with the subtype in parentheses when present
    #[must_use]
    pub fn type_label(&self) -> String {
        let account_type = self.account_type.as_deref().unwrap_or("-");
        match self.subtype.as_deref() {
            Some(subtype) if !subtype.is_empty() => format!("{account_type} ({subtype})"),
            _ => account_type.to_string(),
        }
    }

    /// Balance formatted with two decimals followed by the currency code
    #[must_use]
    pub fn balance_label(&self) -> String {
        match self.balance_current {
            Some(balance) => format!("{balance:.2} {}", self.currency()),
            None => format!("- {}", self.currency()),
        }
    }

    /// Returns the identifier pair needed to update this account
    #[must_use]
    pub fn to_ref(&self) -> AccountRef {
        AccountRef {
            id: self.id.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

/// Identifies an account on both sides of the API boundary
///
/// `id` addresses the remote record, `account_id` matches local entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRef {
    /// Backend record id, sent to the server
    pub id: AccountRecordId,
    /// Plaid account id, used for local reconciliation
    pub account_id: AccountKey,
}

/// Writes `nickname` into every account whose `account_id` equals `key`
///
/// Scans all connections, since the same Plaid account may be reachable
/// through more than one of them. Returns the number of accounts changed.
pub fn reconcile_nickname(connections: &mut [Connection], key: &AccountKey, nickname: &str) -> usize {
    let mut updated = 0;
    for account in connections
        .iter_mut()
        .flat_map(|connection| connection.accounts.iter_mut())
        .filter(|account| &account.account_id == key)
    {
        account.nickname = Some(nickname.to_string());
        updated += 1;
    }
    updated
}

fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps and naive ISO timestamps (read as UTC)
fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
