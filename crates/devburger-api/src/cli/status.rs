//! `dburg status` -- catalog, order, and session counts.
//!
//! Session counts are per process: the webhook server holds its sessions in
//! memory, so a standalone `status` invocation reports only its own.

use devburger_core::ledger::OrderLedger;

use crate::state::AppState;

pub async fn run(state: &AppState, json: bool) -> anyhow::Result<()> {
    let products = state.catalog.count().await?;
    let orders = state.ledger.count_orders().await?;
    let sessions = state.orchestrator.sessions().len();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "products": products,
                "orders": orders,
                "active_sessions": sessions,
                "model": state.config.model,
                "data_dir": state.data_dir.display().to_string(),
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {} DevBurger status", console::style("🍔").bold());
    println!();
    println!("  Products:        {products}");
    println!("  Orders:          {orders}");
    println!("  Active sessions: {sessions} (this process)");
    println!("  Model:           {}", state.config.model);
    println!("  Data dir:        {}", state.data_dir.display());
    println!();
    Ok(())
}
