use std::path::Path;

use cr_store::TodoNote;

pub fn run(
    dir: &Path,
    summary: &str,
    details: Option<&str>,
    tags: Vec<String>,
    campaign_id: Option<&str>,
) -> Result<(), String> {
    if summary.trim().is_empty() {
        return Err("summary must not be empty".to_string());
    }

    let ledger = super::open(dir);
    let mut note = TodoNote::new(summary);
    note.details = details.map(str::to_string);
    note.tags = tags;
    note.campaign_id = campaign_id.map(str::to_string);

    ledger.todo(note).map_err(|e| e.to_string())?;
    println!("TODO recorded.");
    Ok(())
}
