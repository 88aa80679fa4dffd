//! Error types for the crafting engine.

/// Errors that can occur during crafting and inventory operations.
///
/// The resolution engine itself never fails: a configuration gap, an
/// exhausted quirk pool, or a quirk that does not apply to the item type
/// are all reported as an absent result. These errors cover the stateful
/// layers built around it.
#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    /// A rarity name could not be parsed.
    #[error("unknown rarity: {0}")]
    UnknownRarity(String),

    /// An item type tag could not be parsed.
    #[error("unknown item type: {0}")]
    UnknownItemType(String),

    /// A quirk id is not in the flaw or boon catalog.
    #[error("unknown {kind} quirk: {id}")]
    UnknownQuirk {
        /// "flaw" or "boon".
        kind: String,
        /// The id that failed to resolve.
        id: String,
    },

    /// A crafting ability id is not in the ability table.
    #[error("unknown crafting ability: {0}")]
    UnknownAbility(String),

    /// A check kind could not be parsed.
    #[error("unknown check kind: {0}")]
    UnknownCheckKind(String),

    /// A fixed roll sequence contained a value outside `1..=20`.
    #[error("invalid roll sequence: {0}")]
    InvalidRolls(String),

    /// A difficulty class must be a positive integer.
    #[error("invalid DC: {0}")]
    InvalidDc(i32),

    /// A check was requested before an item was selected.
    #[error("no item selected to craft")]
    NoItemSelected,

    /// The enchanting check was requested before the creation check finished.
    #[error("the creation check has not been completed")]
    CreationIncomplete,

    /// Both checks must be completed before the item can be finished.
    #[error("both crafting checks must be completed first")]
    CraftingIncomplete,

    /// The item was destroyed by a check.
    #[error("the item was destroyed during crafting")]
    ItemDestroyed,

    /// The action is restricted to the game master.
    #[error("only the GM can {0}")]
    NotPermitted(&'static str),

    /// No flaw exists at the given position.
    #[error("no flaw at index {0}")]
    FlawNotFound(usize),

    /// A reroll did not produce a replacement; the original is kept.
    #[error("could not reroll flaw '{0}': no valid replacement found")]
    NoReplacement(String),

    /// An entry was not found in the party or actor inventory.
    #[error("item '{0}' not found in inventory")]
    ItemNotFound(String),

    /// A quantity of zero was requested, or a stack would exceed `u32::MAX`.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Reading or writing a ledger file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A ledger or config file was not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for crafting operations.
pub type CraftResult<T> = Result<T, CraftError>;
