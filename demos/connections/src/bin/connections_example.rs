use finance_client::prelude::*;
use finance_client::utils::config::env_value;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger();

    let cfg = Config::new();
    info!("Loaded config → {}", cfg.rest_api.base_url);

    let ctx = SessionContext::from_env()?;
    let client = Arc::new(Client::new(cfg)?);

    let observer = Arc::new(|present: bool| info!("Connections present: {}", present));
    let store = Arc::new(ConnectionStore::new(client).with_observer(observer));

    match store.load(&ctx).await {
        LoadOutcome::Loaded { connections } => info!("✅ Loaded {} connections", connections),
        LoadOutcome::Failed(e) => {
            error!("Load failed: {e}");
            return Err(e.into());
        }
        other => warn!("Load did not apply: {:?}", other),
    }

    let snapshot = store.snapshot().await;
    let mut view = ConnectionsView::new();
    for connection in &snapshot.connections {
        view.toggle_expanded(&connection.id);
    }
    println!("{}", view.render(&snapshot, true));

    // Optional nickname change: FINANCE_ACCOUNT_ID=<plaid account id> FINANCE_NICKNAME=<text>
    let account_key = env_value("FINANCE_ACCOUNT_ID");
    let nickname = env_value("FINANCE_NICKNAME");
    if let (Some(account_key), Some(nickname)) = (account_key, nickname) {
        let key = AccountKey::from(account_key);
        let account = snapshot
            .connections
            .iter()
            .find_map(|connection| connection.account(&key))
            .cloned();
        match account {
            Some(account) => {
                store.begin_edit(&account).await;
                store.set_edit_input(nickname).await;
                match store.save_edit(&ctx).await {
                    NicknameOutcome::Updated { reconciled } => {
                        info!("✅ Nickname saved on {} accounts", reconciled)
                    }
                    other => error!("Nickname not saved: {:?}", other),
                }
                println!("{}", view.render(&store.snapshot().await, true));
            }
            None => warn!("Account {} not found", key),
        }
    }

    store.release();
    Ok(())
}
