//! `dburg menu` -- print the current catalog.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use devburger_core::catalog::CatalogRepository;

use crate::state::AppState;

pub async fn run(state: &AppState, json: bool) -> anyhow::Result<()> {
    let items = state.catalog.get_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!(
            "  {} The catalog is empty. Run {} first.",
            console::style("!").yellow(),
            console::style("dburg seed").cyan()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(["Name", "Price", "Category", "Description"]);
    for item in &items {
        table.add_row([
            item.name.clone(),
            format!("R$ {:.2}", item.price),
            item.category.clone(),
            item.description.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
