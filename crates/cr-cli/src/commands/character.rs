use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path, campaign_id: &str, char_id: &str) -> Result<(), String> {
    let ledger = super::open(dir);
    let ch = ledger
        .character(campaign_id, char_id)
        .map_err(|e| e.to_string())?;

    println!("  {} [{}]", ch.name.bold(), ch.id.dimmed());
    println!();
    println!("  gold: {}", ch.gold);
    println!("  hp:   {}", ch.hp);
    println!("  xp:   {}", ch.xp);

    if !ch.inventory.is_empty() {
        println!();
        println!("  {}", "Inventory".bold());
        for stack in &ch.inventory {
            println!("    {} x{}", stack.name, stack.quantity);
        }
    }

    if !ch.notes.is_empty() {
        println!();
        println!("  {}", "Notes".bold());
        for note in &ch.notes {
            println!("    - {note}");
        }
    }

    Ok(())
}
