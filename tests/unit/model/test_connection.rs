use crate::common::{account, connection};
use chrono::{TimeZone, Utc};
use finance_client::prelude::*;
use serde_json::json;

#[test]
fn test_connection_deserialization_full() {
    let value = json!({
        "id": 12,
        "institution_name": "Chase",
        "item_id": "item-abc",
        "user_id": 42,
        "created_at": "2024-03-01T10:15:00Z",
        "accounts": [{
            "id": 7,
            "account_id": "plaid-acc-1",
            "name": "Plaid Checking",
            "nickname": null,
            "type": "depository",
            "subtype": "checking",
            "balance_current": 110.0,
            "currency": "USD",
            "plaid_user_id": 12
        }]
    });

    let connection: Connection = serde_json::from_value(value).unwrap();

    assert_eq!(connection.id, ConnectionId::from("12"));
    assert_eq!(connection.user_id, Some(UserId::from(42)));
    assert_eq!(
        connection.created_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap())
    );
    let account = &connection.accounts[0];
    assert_eq!(account.id, AccountRecordId::from(7));
    assert_eq!(account.account_id, AccountKey::from("plaid-acc-1"));
    assert_eq!(account.account_type.as_deref(), Some("depository"));
    assert_eq!(account.plaid_user_id, Some(ConnectionId::from("12")));
}

#[test]
fn test_connection_deserialization_minimal() {
    let connection: Connection =
        serde_json::from_value(json!({"id": "c1", "accounts": null})).unwrap();

    assert!(connection.accounts.is_empty());
    assert_eq!(connection.institution_label(), "Unknown Institution");
    assert!(connection.created_at.is_none());
}

#[test]
fn test_reconcile_touches_only_matching_accounts() {
    let mut connections = vec![
        connection(
            "c1",
            "Chase",
            vec![account(1, "shared", "Checking"), account(2, "acc-2", "Savings")],
        ),
        connection("c2", "Ally", vec![account(3, "shared", "Checking")]),
    ];
    let untouched = connections[0].accounts[1].clone();

    let updated = reconcile_nickname(&mut connections, &AccountKey::from("shared"), "Bills");

    assert_eq!(updated, 2);
    assert_eq!(connections[0].accounts[0].nickname.as_deref(), Some("Bills"));
    assert_eq!(connections[1].accounts[0].nickname.as_deref(), Some("Bills"));
    assert_eq!(connections[0].accounts[1], untouched);
}

#[test]
fn test_reconcile_matches_account_id_not_record_id() {
    let mut connections = vec![connection("c1", "Chase", vec![account(5, "acc-9", "Checking")])];

    let updated = reconcile_nickname(&mut connections, &AccountKey::from("5"), "Bills");

    assert_eq!(updated, 0);
    assert!(connections[0].accounts[0].nickname.is_none());
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut once = vec![connection("c1", "Chase", vec![account(1, "acc-1", "Checking")])];
    reconcile_nickname(&mut once, &AccountKey::from("acc-1"), "Bills");
    let mut twice = once.clone();
    reconcile_nickname(&mut twice, &AccountKey::from("acc-1"), "Bills");

    assert_eq!(once, twice);
}

#[test]
fn test_account_lookup_by_key() {
    let connection = connection("c1", "Chase", vec![account(1, "acc-1", "Checking")]);
    assert!(connection.account(&AccountKey::from("acc-1")).is_some());
    assert!(connection.account(&AccountKey::from("acc-2")).is_none());
    assert_eq!(connection.account_count(), 1);
}

#[test]
fn test_account_ref_carries_both_ids() {
    let account = account(8, "plaid-8", "Checking");
    let account_ref = account.to_ref();
    assert_eq!(account_ref.id.as_str(), "8");
    assert_eq!(account_ref.account_id.as_str(), "plaid-8");
}
