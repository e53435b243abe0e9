use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let ledger = super::open(dir);
    let campaigns = ledger.campaigns().map_err(|e| e.to_string())?;

    if campaigns.is_empty() {
        println!("  No campaigns found. Create one with: cr init <id>");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name"]);
    for campaign in &campaigns {
        table.add_row(vec![&campaign.id, &campaign.name]);
    }

    println!("{table}");
    println!();
    println!("  {} campaigns", campaigns.len());

    Ok(())
}
