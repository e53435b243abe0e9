//! CLI frontend for the Chronist campaign ledger.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use cr_core::{MutationKind, MutationRequest, QuestStatus};

#[derive(Parser)]
#[command(
    name = "cr",
    about = "Chronist — an audited ledger for tabletop-RPG campaigns",
    version,
    propagate_version = true
)]
struct Cli {
    /// Ledger root directory (campaign documents and journal)
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new campaign with a starter character
    Init {
        /// Campaign identifier (stable, path-safe)
        id: String,

        /// Display name (default: the identifier)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all campaigns
    List,

    /// Show a full campaign document
    Show {
        /// Campaign identifier
        campaign: String,
    },

    /// Show a single character
    Character {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,
    },

    /// Change a character's gold
    Gold {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,

        /// Signed amount (resulting gold must stay >= 0)
        amount: i64,

        /// Why this change happened
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Damage or heal a character
    Hp {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,

        /// Signed amount (resulting hp must stay within [0, max])
        amount: i32,

        /// Why this change happened
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Award experience to a character
    Xp {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,

        /// Amount (never negative)
        amount: i64,

        /// Why this change happened
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Add or remove inventory items
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Create a quest or update an existing one
    Quest {
        /// Campaign identifier
        campaign: String,

        /// Quest identifier (created on first reference)
        quest: String,

        /// Quest title
        #[arg(short, long)]
        title: Option<String>,

        /// Quest status: active, completed, failed
        #[arg(short, long)]
        status: Option<String>,

        /// Description or progress notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Advance the in-world day counter
    Day {
        /// Campaign identifier
        campaign: String,

        /// Days to advance (default: 1)
        #[arg(default_value = "1")]
        days: u64,

        /// Set the day counter to an absolute value instead
        #[arg(long, conflicts_with = "days")]
        set: Option<u64>,
    },

    /// Set the party's current location
    Location {
        /// Campaign identifier
        campaign: String,

        /// Where the party is now
        location: String,
    },

    /// Append a note to the campaign or a character
    Note {
        /// Campaign identifier
        campaign: String,

        /// Note text
        text: String,

        /// Attach to this character instead of the campaign
        #[arg(short, long)]
        character: Option<String>,
    },

    /// Shift the party's reputation with a faction
    Faction {
        /// Campaign identifier
        campaign: String,

        /// Faction identifier (created on first reference)
        faction: String,

        /// Signed reputation change
        amount: i64,

        /// Display name for a newly created faction
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Set a freeform world-state flag
    Flag {
        /// Campaign identifier
        campaign: String,

        /// Flag key
        key: String,

        /// Flag value, parsed as JSON (bare words become strings)
        value: String,
    },

    /// Show recent journal entries
    Log {
        /// How many entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show TODO notes
        #[arg(long)]
        todos: bool,
    },

    /// Record a development TODO in the journal
    Todo {
        /// One-line summary
        summary: String,

        /// Longer description
        #[arg(long)]
        details: Option<String>,

        /// Freeform tag (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Campaign this TODO concerns
        #[arg(short, long)]
        campaign: Option<String>,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// Add items, merging stacks by name
    Add {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,

        /// Item name
        item: String,

        /// How many to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Why this change happened
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Remove items; removing a full stack drops the entry
    Remove {
        /// Campaign identifier
        campaign: String,

        /// Character identifier
        character: String,

        /// Item name
        item: String,

        /// How many to remove
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Why this change happened
        #[arg(short, long)]
        reason: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir;

    let result = match cli.command {
        Commands::Init { id, name } => commands::init::run(&dir, &id, name.as_deref()),
        Commands::List => commands::list::run(&dir),
        Commands::Show { campaign } => commands::show::run(&dir, &campaign),
        Commands::Character {
            campaign,
            character,
        } => commands::character::run(&dir, &campaign, &character),
        Commands::Gold {
            campaign,
            character,
            amount,
            reason,
        } => commands::mutate::run(
            &dir,
            character_request(
                campaign,
                character,
                MutationKind::GoldDelta { amount },
                reason,
            ),
        ),
        Commands::Hp {
            campaign,
            character,
            amount,
            reason,
        } => commands::mutate::run(
            &dir,
            character_request(
                campaign,
                character,
                MutationKind::HpDelta { amount },
                reason,
            ),
        ),
        Commands::Xp {
            campaign,
            character,
            amount,
            reason,
        } => commands::mutate::run(
            &dir,
            character_request(
                campaign,
                character,
                MutationKind::XpDelta { amount },
                reason,
            ),
        ),
        Commands::Item { command } => match command {
            ItemCommands::Add {
                campaign,
                character,
                item,
                quantity,
                reason,
            } => commands::mutate::run(
                &dir,
                character_request(
                    campaign,
                    character,
                    MutationKind::InventoryAdd { item, quantity },
                    reason,
                ),
            ),
            ItemCommands::Remove {
                campaign,
                character,
                item,
                quantity,
                reason,
            } => commands::mutate::run(
                &dir,
                character_request(
                    campaign,
                    character,
                    MutationKind::InventoryRemove { item, quantity },
                    reason,
                ),
            ),
        },
        Commands::Quest {
            campaign,
            quest,
            title,
            status,
            notes,
        } => parse_status(status.as_deref()).and_then(|status| {
            commands::mutate::run(
                &dir,
                MutationRequest::new(
                    campaign,
                    MutationKind::QuestUpsert {
                        quest_id: quest,
                        title,
                        status,
                        notes,
                    },
                ),
            )
        }),
        Commands::Day {
            campaign,
            days,
            set,
        } => {
            let kind = match set {
                Some(day) => MutationKind::SetDay { day },
                None => MutationKind::AdvanceDay { days },
            };
            commands::mutate::run(&dir, MutationRequest::new(campaign, kind))
        }
        Commands::Location { campaign, location } => commands::mutate::run(
            &dir,
            MutationRequest::new(campaign, MutationKind::SetLocation { location }),
        ),
        Commands::Note {
            campaign,
            text,
            character,
        } => {
            let mut request =
                MutationRequest::new(campaign, MutationKind::NoteAppend { text });
            request.char_id = character;
            commands::mutate::run(&dir, request)
        }
        Commands::Faction {
            campaign,
            faction,
            amount,
            name,
        } => commands::mutate::run(
            &dir,
            MutationRequest::new(
                campaign,
                MutationKind::FactionRepDelta {
                    faction_id: faction,
                    name,
                    amount,
                },
            ),
        ),
        Commands::Flag {
            campaign,
            key,
            value,
        } => {
            // Accept proper JSON; treat bare words as strings.
            let value = serde_json::from_str(&value)
                .unwrap_or(serde_json::Value::String(value));
            commands::mutate::run(
                &dir,
                MutationRequest::new(campaign, MutationKind::WorldFlagSet { key, value }),
            )
        }
        Commands::Log { limit, todos } => commands::log::run(&dir, limit, todos),
        Commands::Todo {
            summary,
            details,
            tag,
            campaign,
        } => commands::todo::run(&dir, &summary, details.as_deref(), tag, campaign.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn character_request(
    campaign: String,
    character: String,
    kind: MutationKind,
    reason: Option<String>,
) -> MutationRequest {
    let mut request = MutationRequest::for_character(campaign, character, kind);
    request.reason = reason;
    request
}

fn parse_status(status: Option<&str>) -> Result<Option<QuestStatus>, String> {
    match status {
        None => Ok(None),
        Some(s) => QuestStatus::parse(s)
            .map(Some)
            .ok_or_else(|| format!("unknown status '{s}', use: active, completed, failed")),
    }
}
