use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use cr_core::MutationKind;
use cr_store::{LogEntry, LogKind, LogPayload};

pub fn run(dir: &Path, limit: usize, todos_only: bool) -> Result<(), String> {
    let ledger = super::open(dir);
    let kind = todos_only.then_some(LogKind::Todo);
    let entries = ledger.recent_log(limit, kind).map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!("  Journal is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Type", "Campaign", "Details"]);
    for entry in &entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            type_label(entry).to_string(),
            entry.payload.campaign_id().unwrap_or("—").to_string(),
            describe(entry),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} entries, newest first", entries.len());

    Ok(())
}

fn type_label(entry: &LogEntry) -> &'static str {
    match entry.kind() {
        LogKind::Mutation => "mutation",
        LogKind::Todo => "todo",
    }
}

/// One-line human summary of a journal entry.
fn describe(entry: &LogEntry) -> String {
    match &entry.payload {
        LogPayload::Mutation(request) => {
            let target = request.char_id.as_deref();
            let mut line = match &request.kind {
                MutationKind::GoldDelta { amount } => {
                    format!("gold {amount:+} for {}", target.unwrap_or("?"))
                }
                MutationKind::HpDelta { amount } => {
                    format!("hp {amount:+} for {}", target.unwrap_or("?"))
                }
                MutationKind::XpDelta { amount } => {
                    format!("xp +{amount} for {}", target.unwrap_or("?"))
                }
                MutationKind::InventoryAdd { item, quantity } => {
                    format!("add {quantity} {item} to {}", target.unwrap_or("?"))
                }
                MutationKind::InventoryRemove { item, quantity } => {
                    format!("remove {quantity} {item} from {}", target.unwrap_or("?"))
                }
                MutationKind::QuestUpsert {
                    quest_id, status, ..
                } => match status {
                    Some(status) => format!("quest {quest_id} -> {status}"),
                    None => format!("quest {quest_id} updated"),
                },
                MutationKind::AdvanceDay { days } => format!("{days} day(s) pass"),
                MutationKind::SetDay { day } => format!("day set to {day}"),
                MutationKind::SetLocation { location } => {
                    format!("party moves to {location}")
                }
                MutationKind::NoteAppend { text } => match target {
                    Some(id) => format!("note on {id}: {text}"),
                    None => format!("note: {text}"),
                },
                MutationKind::FactionRepDelta {
                    faction_id, amount, ..
                } => format!("reputation {amount:+} with {faction_id}"),
                MutationKind::WorldFlagSet { key, value } => format!("flag {key} = {value}"),
            };
            if let Some(reason) = &request.reason {
                line.push_str(&format!(" ({reason})"));
            }
            line
        }
        LogPayload::Todo(note) => {
            if note.tags.is_empty() {
                note.summary.clone()
            } else {
                format!("{} [{}]", note.summary, note.tags.join(", "))
            }
        }
    }
}
