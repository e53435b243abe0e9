use std::path::Path;

use cr_core::{Campaign, Character};

pub fn run(dir: &Path, id: &str, name: Option<&str>) -> Result<(), String> {
    let ledger = super::open(dir);

    let mut campaign = Campaign::new(id, name.unwrap_or(id));
    // A starter character so the first session can start rolling right away.
    // Edit the campaign document to rename or add party members.
    let mut hero = Character::new("hero", "An Unnamed Hero", 10);
    hero.gold = 10;
    campaign.characters.push(hero);

    ledger
        .create_campaign(&campaign)
        .map_err(|e| e.to_string())?;

    println!("Created campaign '{}' ({})", campaign.name, campaign.id);
    println!();
    println!("Get started:");
    println!("  cr show {id}                      # View the campaign");
    println!("  cr gold {id} hero 25              # Hand out some gold");
    println!("  cr quest {id} q1 -t \"First Steps\" # Open a quest");
    println!("  cr log                            # Review the journal");

    Ok(())
}
