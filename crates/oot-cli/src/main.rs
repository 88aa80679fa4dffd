//! CLI frontend for the OOT crafting engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "oot",
    about = "OOT crafting: resolve crafting checks, roll quirks, manage party loot",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load crafting defaults from a JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a check total against a DC
    Outcome {
        /// Check total
        #[arg(allow_negative_numbers = true)]
        check: i32,

        /// Difficulty class
        #[arg(allow_negative_numbers = true)]
        dc: i32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in tables
    Tables {
        /// Which table: flaws, boons, thresholds, rarities, abilities (default: all)
        which: Option<String>,
    },

    /// Roll one crafting check and draw its quirks
    Check {
        /// Check kind: creation or enchanting
        #[arg(short, long, default_value = "creation")]
        kind: String,

        /// Item type (weapon, armor, shield, clothing, ammunition, thrownWeapon, heldItem)
        #[arg(short = 't', long)]
        item_type: Option<String>,

        /// Item rarity
        #[arg(short, long)]
        rarity: Option<String>,

        /// Difficulty class (default: rarity base DC)
        #[arg(long)]
        dc: Option<i32>,

        /// Check total; rolls d20 + modifier when absent
        #[arg(long, allow_negative_numbers = true)]
        total: Option<i32>,

        /// Modifier added to the rolled d20
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        modifier: i32,

        /// Boons the item already has
        #[arg(long, default_value = "0")]
        existing_boons: u32,

        /// Ability id (default: from config)
        #[arg(short, long)]
        ability: Option<String>,

        /// Item name shown on the report
        #[arg(long, default_value = "Item")]
        item: String,

        /// Who is rolling
        #[arg(long, default_value = "Crafter")]
        crafter: String,

        /// RNG seed for deterministic draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Fixed d20 results to use instead of the RNG (comma-separated)
        #[arg(long)]
        rolls: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Craft an item through both checks
    Craft {
        /// Base item name
        #[arg(short, long)]
        name: String,

        /// Host document category (weapon, equipment, consumable, ...)
        #[arg(long, default_value = "weapon")]
        category: String,

        /// Armor or consumable subtype (shield, light, clothing, ammo, ...)
        #[arg(long)]
        subtype: Option<String>,

        /// The item has the thrown property
        #[arg(long)]
        thrown: bool,

        /// Override the detected item type
        #[arg(short = 't', long)]
        item_type: Option<String>,

        /// Item rarity
        #[arg(short, long)]
        rarity: Option<String>,

        /// Base weight
        #[arg(long, default_value = "0")]
        weight: f64,

        /// Base price
        #[arg(long, default_value = "0")]
        price: f64,

        /// Base hit points
        #[arg(long)]
        hp: Option<u32>,

        /// Base description
        #[arg(long, default_value = "")]
        description: String,

        /// Creation check total
        #[arg(long, allow_negative_numbers = true)]
        creation: i32,

        /// Enchanting check total
        #[arg(long, allow_negative_numbers = true)]
        enchanting: i32,

        /// Creation DC (default: rarity base DC)
        #[arg(long)]
        creation_dc: Option<i32>,

        /// Enchanting DC (default: rarity base DC)
        #[arg(long)]
        enchanting_dc: Option<i32>,

        /// RNG seed for deterministic draws
        #[arg(short, long)]
        seed: Option<u64>,

        /// Fixed d20 results to use instead of the RNG (comma-separated)
        #[arg(long)]
        rolls: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage the party inventory ledger
    Inventory {
        /// Ledger file (created on first write)
        #[arg(short, long, default_value = "party-inventory.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: InventoryAction,
    },

    /// Check the built-in tables for gaps and overlaps
    Validate,
}

#[derive(Subcommand)]
enum InventoryAction {
    /// List all stacks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add an item, stacking onto a matching entry
    Add {
        /// Item name
        name: String,

        /// Host document type
        #[arg(short, long, default_value = "loot")]
        kind: String,

        /// Image path
        #[arg(long, default_value = "")]
        img: String,

        /// How many to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Who is adding the item
        #[arg(long, default_value = "GM")]
        by: String,
    },

    /// Remove a whole stack
    Remove {
        /// Stack id
        id: String,
    },

    /// Take items out of a stack
    Take {
        /// Stack id
        id: String,

        /// How many to take (default: the whole stack)
        #[arg(short, long)]
        quantity: Option<u32>,
    },
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Outcome { check, dc, json } => commands::outcome::run(check, dc, json),
        Commands::Tables { which } => commands::tables::run(which.as_deref()),
        Commands::Check {
            kind,
            item_type,
            rarity,
            dc,
            total,
            modifier,
            existing_boons,
            ability,
            item,
            crafter,
            seed,
            rolls,
            json,
        } => commands::check::run(
            &config,
            &commands::check::CheckArgs {
                kind,
                item_type,
                rarity,
                dc,
                total,
                modifier,
                existing_boons,
                ability,
                item,
                crafter,
                seed,
                rolls,
                json,
            },
        ),
        Commands::Craft {
            name,
            category,
            subtype,
            thrown,
            item_type,
            rarity,
            weight,
            price,
            hp,
            description,
            creation,
            enchanting,
            creation_dc,
            enchanting_dc,
            seed,
            rolls,
            json,
        } => commands::craft::run(
            &config,
            &commands::craft::CraftArgs {
                name,
                category,
                subtype,
                thrown,
                item_type,
                rarity,
                weight,
                price,
                hp,
                description,
                creation,
                enchanting,
                creation_dc,
                enchanting_dc,
                seed,
                rolls,
                json,
            },
        ),
        Commands::Inventory { file, action } => match action {
            InventoryAction::List { json } => commands::inventory::list(&file, json),
            InventoryAction::Add {
                name,
                kind,
                img,
                quantity,
                by,
            } => commands::inventory::add(&file, &name, &kind, &img, quantity, &by),
            InventoryAction::Remove { id } => commands::inventory::remove(&file, &id),
            InventoryAction::Take { id, quantity } => {
                commands::inventory::take(&file, &id, quantity)
            }
        },
        Commands::Validate => commands::validate::run(),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
