use finance_client::prelude::*;
use finance_client::utils::config::env_value;
use std::error::Error;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logger();

    let cfg = Config::new();
    let ctx = SessionContext::from_env()?;
    let client = Arc::new(Client::new(cfg)?);

    let signal = Arc::new(RefreshSignal::new(false));
    let store = Arc::new(ConnectionStore::new(client.clone()));
    let listener = store.attach(ctx.clone(), signal.subscribe());
    let flow = LinkFlow::new(client, signal.clone());

    let link_token = flow.create_link_token(&ctx).await?;
    info!("Open Plaid Link with token: {}", link_token);

    // The public token comes back from Plaid Link once the user finishes it
    let Some(public_token) = env_value("FINANCE_PUBLIC_TOKEN") else {
        info!("Set FINANCE_PUBLIC_TOKEN to complete the link");
        store.release();
        listener.await?;
        return Ok(());
    };

    let exchange = flow.complete(&ctx, &public_token).await?;
    info!("✅ Linked item {}", exchange.item_id);

    // Give the refresh listener time to reload
    tokio::time::sleep(Duration::from_secs(2)).await;
    let view = ConnectionsView::new();
    println!(
        "{}",
        view.render(&store.snapshot().await, signal.current().connected)
    );

    store.release();
    listener.await?;
    Ok(())
}
