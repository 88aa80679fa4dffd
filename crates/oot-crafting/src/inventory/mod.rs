//! Shared party inventory and per-character item lists.
//!
//! Items stack when name, kind, and image all match. Stack sizes live both
//! on the entry and in the item's `system.quantity` field so the host sees
//! the same number.

pub mod actor;
pub mod party;

pub use actor::{ActorInventory, ActorItem, transfer_from_party, transfer_to_party};
pub use party::{ChangeAction, InventoryChange, PartyInventory, PartyItem};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An item as the host stores it: identity plus an opaque system blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    /// Item name.
    pub name: String,
    /// Image path.
    #[serde(default)]
    pub img: String,
    /// Host document type (`weapon`, `equipment`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Host system data.
    #[serde(default)]
    pub system: Value,
    /// Module flags.
    #[serde(default)]
    pub flags: Value,
}

impl ItemData {
    /// An item with empty system data.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            img: img.into(),
            kind: kind.into(),
            system: Value::Object(Default::default()),
            flags: Value::Object(Default::default()),
        }
    }

    /// Stack size from `system.quantity`; missing or zero counts as one.
    pub fn quantity(&self) -> u32 {
        self.system
            .get("quantity")
            .and_then(Value::as_u64)
            .and_then(|q| u32::try_from(q).ok())
            .filter(|q| *q > 0)
            .unwrap_or(1)
    }

    /// Write `system.quantity`, turning `system` into an object if needed.
    pub fn set_quantity(&mut self, quantity: u32) {
        if !self.system.is_object() {
            self.system = Value::Object(Default::default());
        }
        if let Some(map) = self.system.as_object_mut() {
            map.insert("quantity".to_string(), Value::from(quantity));
        }
    }

    /// Builder form of [`ItemData::set_quantity`].
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.set_quantity(quantity);
        self
    }

    /// Whether two items belong in the same stack.
    pub fn stacks_with(&self, name: &str, kind: &str, img: &str) -> bool {
        self.name == name && self.kind == kind && self.img == img
    }
}
