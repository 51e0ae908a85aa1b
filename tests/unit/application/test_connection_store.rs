use crate::common::{MockAccountService, RecordingObserver, account, connection, ctx};
use finance_client::prelude::*;
use reqwest::StatusCode;

fn sample() -> Vec<Connection> {
    vec![
        connection(
            "c1",
            "Chase",
            vec![account(1, "acc-1", "Checking"), account(2, "acc-2", "Savings")],
        ),
        connection("c2", "Wells Fargo", vec![account(3, "acc-3", "Credit Card")]),
    ]
}

fn store_with(service: &Arc<MockAccountService>) -> (Arc<ConnectionStore>, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let store = Arc::new(ConnectionStore::new(service.clone()).with_observer(observer.clone()));
    (store, observer)
}

#[tokio::test]
async fn test_load_replaces_connections_with_server_list() {
    let service = MockAccountService::new(sample());
    let (store, observer) = store_with(&service);

    let outcome = store.load(&ctx()).await;

    assert!(matches!(outcome, LoadOutcome::Loaded { connections: 2 }));
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.connections, sample());
    assert_eq!(snapshot.load_state, LoadState::Loaded);
    assert!(snapshot.error.is_none());
    assert!(snapshot.loaded_at.is_some());
    assert_eq!(observer.seen(), vec![true]);
}

#[tokio::test]
async fn test_load_drops_connections_missing_from_server() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    service.set_server(vec![connection("c2", "Wells Fargo", vec![])]);
    store.load(&ctx()).await;

    let connections = store.connections().await;
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].id, ConnectionId::from("c2"));
    assert!(connections[0].accounts.is_empty());
}

#[tokio::test]
async fn test_empty_list_notifies_observer_without_error() {
    let service = MockAccountService::new(Vec::new());
    let (store, observer) = store_with(&service);

    let outcome = store.load(&ctx()).await;

    assert!(matches!(outcome, LoadOutcome::Loaded { connections: 0 }));
    assert!(store.error().await.is_none());
    assert_eq!(observer.seen(), vec![false]);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_connections() {
    let service = MockAccountService::new(sample());
    let (store, observer) = store_with(&service);
    store.load(&ctx()).await;

    service.script_load(Err(StatusCode::INTERNAL_SERVER_ERROR));
    let outcome = store.load(&ctx()).await;

    assert!(matches!(outcome, LoadOutcome::Failed(AppError::Http { .. })));
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.connections, sample());
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Failed to fetch connections: http error 500: Internal Server Error")
    );
    assert!(matches!(snapshot.load_state, LoadState::Error(_)));
    // only the successful load is reported
    assert_eq!(observer.seen(), vec![true]);
}

#[tokio::test]
async fn test_successful_load_clears_previous_error() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    service.script_load(Err(StatusCode::BAD_GATEWAY));
    store.load(&ctx()).await;
    assert!(store.error().await.is_some());

    store.load(&ctx()).await;

    assert!(store.error().await.is_none());
    assert_eq!(store.load_state().await, LoadState::Loaded);
}

#[tokio::test]
async fn test_load_resolves_user_id_when_missing() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    let ctx = SessionContext::new("test-token").unwrap();

    store.load(&ctx).await;

    assert_eq!(service.calls(), vec!["get_user_id", "get_connections 42"]);
}

#[tokio::test]
async fn test_identity_failure_aborts_load() {
    let service = MockAccountService::new(sample());
    service.fail_user_id(StatusCode::UNAUTHORIZED);
    let (store, observer) = store_with(&service);
    let ctx = SessionContext::new("test-token").unwrap();

    let outcome = store.load(&ctx).await;

    assert!(matches!(outcome, LoadOutcome::Failed(AppError::Identity(_))));
    assert_eq!(service.count("get_connections"), 0);
    let error = store.error().await.unwrap();
    assert!(error.starts_with("Failed to fetch connections: identity resolution failed"));
    assert!(observer.seen().is_empty());
}

#[tokio::test]
async fn test_latest_issued_load_wins_when_responses_arrive_out_of_order() {
    let service = MockAccountService::new(Vec::new());
    let release_a = service.script_gated_load(Ok(vec![connection("a", "First", vec![])]));
    service.script_load(Ok(vec![connection("b", "Second", vec![])]));
    let (store, _) = store_with(&service);

    let store_a = store.clone();
    let load_a = tokio::spawn(async move { store_a.load(&ctx()).await });
    service.wait_for("get_connections", 1).await;

    let outcome_b = store.load(&ctx()).await;
    assert!(outcome_b.is_loaded());

    release_a.send(()).unwrap();
    let outcome_a = load_a.await.unwrap();
    assert!(matches!(outcome_a, LoadOutcome::Superseded));

    let connections = store.connections().await;
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].id, ConnectionId::from("b"));
    assert_eq!(store.load_state().await, LoadState::Loaded);
}

#[tokio::test]
async fn test_stale_failure_does_not_set_error() {
    let service = MockAccountService::new(Vec::new());
    let release_a = service.script_gated_load(Err(StatusCode::INTERNAL_SERVER_ERROR));
    service.script_load(Ok(sample()));
    let (store, _) = store_with(&service);

    let store_a = store.clone();
    let load_a = tokio::spawn(async move { store_a.load(&ctx()).await });
    service.wait_for("get_connections", 1).await;
    store.load(&ctx()).await;

    release_a.send(()).unwrap();
    assert!(matches!(load_a.await.unwrap(), LoadOutcome::Superseded));
    assert!(store.error().await.is_none());
    assert_eq!(store.connections().await, sample());
}

#[tokio::test]
async fn test_release_discards_in_flight_load() {
    let service = MockAccountService::new(Vec::new());
    let release_load = service.script_gated_load(Ok(sample()));
    let (store, observer) = store_with(&service);

    let pending = store.clone();
    let load = tokio::spawn(async move { pending.load(&ctx()).await });
    service.wait_for("get_connections", 1).await;

    store.release();
    release_load.send(()).unwrap();

    assert!(matches!(load.await.unwrap(), LoadOutcome::Released));
    assert!(store.connections().await.is_empty());
    assert!(observer.seen().is_empty());
    assert!(matches!(store.load(&ctx()).await, LoadOutcome::Released));
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    store.request_delete(ConnectionId::from("c1")).await;
    assert_eq!(
        store.snapshot().await.delete,
        DeleteState::PendingConfirmation(ConnectionId::from("c1"))
    );
    assert!(store.cancel_delete().await);
    assert!(!store.cancel_delete().await);

    assert_eq!(store.snapshot().await.delete, DeleteState::Idle);
    assert_eq!(service.count("delete_connection"), 0);
    assert_eq!(store.connections().await.len(), 2);
}

#[tokio::test]
async fn test_confirm_without_pending_delete_is_rejected() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);

    let outcome = store.confirm_delete(&ctx()).await;

    assert!(matches!(outcome, DeleteOutcome::NothingPending));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_reloads_connections() {
    let service = MockAccountService::new(sample());
    let (store, observer) = store_with(&service);
    store.load(&ctx()).await;

    store.request_delete(ConnectionId::from("c1")).await;
    let outcome = store.confirm_delete(&ctx()).await;

    match outcome {
        DeleteOutcome::Deleted { reload } => {
            assert!(matches!(reload, LoadOutcome::Loaded { connections: 1 }))
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }
    assert_eq!(
        service.calls(),
        vec![
            "get_connections 42",
            "delete_connection c1",
            "get_connections 42"
        ]
    );
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.delete, DeleteState::Idle);
    assert_eq!(snapshot.connections.len(), 1);
    assert_eq!(snapshot.connections[0].id, ConnectionId::from("c2"));
    assert_eq!(observer.seen(), vec![true, true]);
}

#[tokio::test]
async fn test_deleting_last_connection_reports_absence() {
    let service = MockAccountService::new(vec![connection("c1", "Chase", vec![])]);
    let (store, observer) = store_with(&service);
    store.load(&ctx()).await;

    store.request_delete(ConnectionId::from("c1")).await;
    store.confirm_delete(&ctx()).await;

    assert!(!store.snapshot().await.has_connections());
    assert_eq!(observer.seen(), vec![true, false]);
}

#[tokio::test]
async fn test_failed_delete_keeps_connection_and_sets_error() {
    let service = MockAccountService::new(sample());
    service.fail_delete(StatusCode::INTERNAL_SERVER_ERROR);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    store.request_delete(ConnectionId::from("c1")).await;
    let outcome = store.confirm_delete(&ctx()).await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    let snapshot = store.snapshot().await;
    assert!(snapshot.connections.iter().any(|c| c.id == ConnectionId::from("c1")));
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Failed to delete connection: http error 500: Internal Server Error")
    );
    assert_eq!(snapshot.delete, DeleteState::Idle);
    assert_eq!(service.count("get_connections"), 1);
}

#[tokio::test]
async fn test_clear_error_dismisses_message() {
    let service = MockAccountService::new(sample());
    service.fail_delete(StatusCode::NOT_FOUND);
    let (store, _) = store_with(&service);

    store.request_delete(ConnectionId::from("c9")).await;
    store.confirm_delete(&ctx()).await;
    assert!(store.error().await.is_some());

    store.clear_error().await;
    assert!(store.error().await.is_none());
}

#[tokio::test]
async fn test_nickname_update_targets_record_id_and_matches_account_id() {
    let shared = account(10, "shared", "Joint Checking");
    let mut other_copy = account(11, "shared", "Joint Checking");
    other_copy.nickname = Some("Old".to_string());
    let service = MockAccountService::new(vec![
        connection("c1", "Chase", vec![shared.clone(), account(1, "acc-1", "Savings")]),
        connection("c2", "Chase Business", vec![other_copy]),
    ]);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    let outcome = store
        .update_nickname(&ctx(), &shared.to_ref(), "Household")
        .await;

    assert!(matches!(outcome, NicknameOutcome::Updated { reconciled: 2 }));
    assert_eq!(service.count("update_account_nickname 10 Household"), 1);
    let connections = store.connections().await;
    assert_eq!(connections[0].accounts[0].display_name(), "Household");
    assert_eq!(connections[0].accounts[1].nickname, None);
    assert_eq!(connections[1].accounts[0].display_name(), "Household");
    // no reload after a nickname change
    assert_eq!(service.count("get_connections"), 1);
}

#[tokio::test]
async fn test_nickname_update_is_idempotent() {
    let target = account(1, "acc-1", "Checking");
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    store.update_nickname(&ctx(), &target.to_ref(), "Bills").await;
    let once = store.connections().await;
    store.update_nickname(&ctx(), &target.to_ref(), "Bills").await;

    assert_eq!(store.connections().await, once);
}

#[tokio::test]
async fn test_empty_nickname_falls_back_to_name() {
    let mut target = account(1, "acc-1", "Checking");
    target.nickname = Some("Bills".to_string());
    let service = MockAccountService::new(vec![connection("c1", "Chase", vec![target.clone()])]);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    let outcome = store.update_nickname(&ctx(), &target.to_ref(), "").await;

    assert!(outcome.is_updated());
    let account = store.connections().await[0].accounts[0].clone();
    assert_eq!(account.nickname.as_deref(), Some(""));
    assert_eq!(account.display_name(), "Checking");
}

#[tokio::test]
async fn test_failed_nickname_update_leaves_accounts_untouched() {
    let target = account(1, "acc-1", "Checking");
    let service = MockAccountService::new(sample());
    service.fail_nickname(StatusCode::UNPROCESSABLE_ENTITY);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    let outcome = store.update_nickname(&ctx(), &target.to_ref(), "Bills").await;

    assert!(matches!(outcome, NicknameOutcome::Failed(_)));
    assert_eq!(store.connections().await, sample());
    assert!(
        store
            .error()
            .await
            .unwrap()
            .starts_with("Failed to update nickname: http error 422")
    );
}

#[tokio::test]
async fn test_save_edit_closes_editor_on_success() {
    let mut target = account(1, "acc-1", "Checking");
    target.nickname = Some("Bills".to_string());
    let service = MockAccountService::new(vec![connection("c1", "Chase", vec![target.clone()])]);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    store.begin_edit(&target).await;
    let edit = store.snapshot().await.edit.unwrap();
    assert_eq!(edit.input, "Bills");
    assert_eq!(edit.account, target.to_ref());
    assert!(!edit.saving);

    assert!(store.set_edit_input("Rent").await);
    let outcome = store.save_edit(&ctx()).await;

    assert!(outcome.is_updated());
    let snapshot = store.snapshot().await;
    assert!(snapshot.edit.is_none());
    assert_eq!(snapshot.connections[0].accounts[0].display_name(), "Rent");
}

#[tokio::test]
async fn test_save_edit_failure_keeps_typed_text() {
    let target = account(1, "acc-1", "Checking");
    let service = MockAccountService::new(sample());
    service.fail_nickname(StatusCode::INTERNAL_SERVER_ERROR);
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;

    store.begin_edit(&target).await;
    store.set_edit_input("Groceries").await;
    let outcome = store.save_edit(&ctx()).await;

    assert!(matches!(outcome, NicknameOutcome::Failed(_)));
    let edit = store.snapshot().await.edit.unwrap();
    assert_eq!(edit.input, "Groceries");
    assert!(!edit.saving);
    assert!(store.error().await.is_some());
}

#[tokio::test]
async fn test_save_edit_without_editor_is_rejected() {
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);

    let outcome = store.save_edit(&ctx()).await;

    assert!(matches!(
        outcome,
        NicknameOutcome::Rejected(AppError::InvalidState(_))
    ));
    assert!(!store.set_edit_input("ignored").await);
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_running_save_blocks_second_save_and_cancel() {
    let target = account(1, "acc-1", "Checking");
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;
    let release_save = service.gate_nickname();

    store.begin_edit(&target).await;
    store.set_edit_input("Bills").await;
    let saving = store.clone();
    let save = tokio::spawn(async move { saving.save_edit(&ctx()).await });
    service.wait_for("update_account_nickname", 1).await;

    assert!(store.snapshot().await.edit.unwrap().saving);
    assert!(matches!(
        store.save_edit(&ctx()).await,
        NicknameOutcome::Rejected(_)
    ));
    assert!(!store.cancel_edit().await);

    release_save.send(()).unwrap();
    assert!(save.await.unwrap().is_updated());
    assert!(store.snapshot().await.edit.is_none());
    assert_eq!(service.count("update_account_nickname"), 1);
}

#[tokio::test]
async fn test_late_save_does_not_close_newer_edit() {
    let first = account(1, "acc-1", "Checking");
    let second = account(2, "acc-2", "Savings");
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);
    store.load(&ctx()).await;
    let release_save = service.gate_nickname();

    store.begin_edit(&first).await;
    let saving = store.clone();
    let save = tokio::spawn(async move { saving.save_edit(&ctx()).await });
    service.wait_for("update_account_nickname", 1).await;

    store.begin_edit(&second).await;
    release_save.send(()).unwrap();
    assert!(save.await.unwrap().is_updated());

    let edit = store.snapshot().await.edit.unwrap();
    assert_eq!(edit.account, second.to_ref());
    assert!(!edit.saving);
}

#[tokio::test]
async fn test_cancel_edit_discards_input() {
    let target = account(1, "acc-1", "Checking");
    let service = MockAccountService::new(sample());
    let (store, _) = store_with(&service);

    store.begin_edit(&target).await;
    store.set_edit_input("Typed").await;
    assert!(store.cancel_edit().await);
    assert!(store.snapshot().await.edit.is_none());
    assert!(!store.cancel_edit().await);
    assert_eq!(service.count("update_account_nickname"), 0);
}
