use std::path::Path;

use cr_core::{MutationKind, MutationRequest};

pub fn run(dir: &Path, request: MutationRequest) -> Result<(), String> {
    let ledger = super::open(dir);
    let kind = request.kind.name();
    let campaign_id = request.campaign_id.clone();
    let char_id = request.char_id.clone();
    let day_related = matches!(
        request.kind,
        MutationKind::AdvanceDay { .. } | MutationKind::SetDay { .. }
    );

    let campaign = ledger.mutate(request).map_err(|e| e.to_string())?;

    println!("Applied {kind} to campaign '{campaign_id}'.");
    if let Some(id) = &char_id
        && let Some(ch) = campaign.character(id)
    {
        println!(
            "  {}: gold {}, hp {}, xp {}",
            ch.name, ch.gold, ch.hp, ch.xp
        );
    }
    if day_related {
        println!("  Day is now {}.", campaign.day);
    }

    Ok(())
}
