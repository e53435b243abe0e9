use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cr_core::QuestStatus;

pub fn run(dir: &Path, campaign_id: &str) -> Result<(), String> {
    let ledger = super::open(dir);
    let campaign = ledger.campaign(campaign_id).map_err(|e| e.to_string())?;

    println!("  {} [{}]", campaign.name.bold(), campaign.id.dimmed());
    print!("  day {}", campaign.day);
    if let Some(location) = &campaign.location {
        print!(" — {location}");
    }
    println!();
    println!();

    if campaign.characters.is_empty() {
        println!("  No characters.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["ID", "Name", "Gold", "HP", "XP", "Items"]);
        for ch in &campaign.characters {
            let items: Vec<String> = ch
                .inventory
                .iter()
                .map(|s| format!("{} x{}", s.name, s.quantity))
                .collect();
            table.add_row(vec![
                ch.id.clone(),
                ch.name.clone(),
                ch.gold.to_string(),
                ch.hp.to_string(),
                ch.xp.to_string(),
                if items.is_empty() {
                    "—".to_string()
                } else {
                    items.join(", ")
                },
            ]);
        }
        println!("{table}");
    }

    if !campaign.quests.is_empty() {
        println!();
        println!("  {}", "Quests".bold());
        for quest in &campaign.quests {
            let status = match quest.status {
                QuestStatus::Active => quest.status.to_string().yellow(),
                QuestStatus::Completed => quest.status.to_string().green(),
                QuestStatus::Failed => quest.status.to_string().red(),
            };
            println!("    [{status}] {} ({})", quest.title, quest.id.dimmed());
            if let Some(notes) = &quest.notes {
                println!("          {}", notes.dimmed());
            }
        }
    }

    if !campaign.factions.is_empty() {
        println!();
        println!("  {}", "Factions".bold());
        for faction in &campaign.factions {
            println!("    {} {:+}", faction.name, faction.reputation);
        }
    }

    if !campaign.notes.is_empty() {
        println!();
        println!("  {}", "Notes".bold());
        for note in &campaign.notes {
            println!("    - {note}");
        }
    }

    Ok(())
}
