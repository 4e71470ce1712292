//! `dburg seed` -- create the schema and populate the canonical menu.
//!
//! The schema itself is created by migrations when the pool opens; this
//! command only inserts the menu, and only when the catalog is empty, so
//! re-running it never duplicates products.

use crate::state::AppState;

pub async fn run(state: &AppState, json: bool) -> anyhow::Result<()> {
    let inserted = state.catalog.seed_default_menu().await?;
    let total = state.catalog.count().await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "inserted": inserted,
                "total_products": total,
            }))?
        );
        return Ok(());
    }

    if inserted == 0 {
        println!(
            "  {} Catalog already populated ({total} products).",
            console::style("✓").green()
        );
    } else {
        println!(
            "  {} Seeded {inserted} products into the catalog.",
            console::style("✓").green()
        );
    }
    Ok(())
}
