//! The party-wide inventory ledger.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::ItemData;
use crate::error::{CraftError, CraftResult};

/// One stack in the party inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyItem {
    /// Ledger id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Image path.
    pub img: String,
    /// Host document type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Host system data; `quantity` is kept in sync with the stack size.
    pub system: Value,
    /// Module flags.
    pub flags: Value,
    /// Stack size.
    pub quantity: u32,
    /// Who first put the item in.
    pub added_by: String,
    /// When the stack was created.
    pub added_at: DateTime<Utc>,
}

impl PartyItem {
    /// The host item this stack represents, with `quantity` copies.
    pub fn to_item_data(&self, quantity: u32) -> ItemData {
        ItemData {
            name: self.name.clone(),
            img: self.img.clone(),
            kind: self.kind.clone(),
            system: self.system.clone(),
            flags: self.flags.clone(),
        }
        .with_quantity(quantity)
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        if let Some(map) = self.system.as_object_mut() {
            map.insert("quantity".to_string(), Value::from(quantity));
        }
    }
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// A new stack was created.
    Add,
    /// An existing stack changed.
    Update,
    /// A stack was removed.
    Remove,
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Notification emitted by every ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryChange {
    /// What happened.
    pub action: ChangeAction,
    /// The stack after the change (or as it was, for removals).
    pub item: PartyItem,
}

/// The party's shared items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInventory {
    #[serde(default)]
    items: Vec<PartyItem>,
}

impl PartyInventory {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger from a JSON file. A missing file is an empty ledger.
    pub fn load(path: &Path) -> CraftResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the ledger as pretty JSON.
    pub fn save(&self, path: &Path) -> CraftResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// All stacks in insertion order.
    pub fn items(&self) -> &[PartyItem] {
        &self.items
    }

    /// Look up a stack by id.
    pub fn get(&self, id: &str) -> Option<&PartyItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of stacks.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Put an item in, stacking onto a matching entry if one exists.
    ///
    /// Fails with [`CraftError::InvalidQuantity`] when the stack would
    /// overflow; the ledger is left unchanged.
    pub fn add(&mut self, data: ItemData, added_by: &str) -> CraftResult<InventoryChange> {
        let quantity = data.quantity();

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| data.stacks_with(&i.name, &i.kind, &i.img))
        {
            let total = existing
                .quantity
                .max(1)
                .checked_add(quantity)
                .ok_or(CraftError::InvalidQuantity(quantity))?;
            existing.set_quantity(total);
            tracing::info!(item = %existing.name, quantity = total, "party stack updated");
            return Ok(InventoryChange {
                action: ChangeAction::Update,
                item: existing.clone(),
            });
        }

        let mut system = data.system;
        if !system.is_object() {
            system = Value::Object(Default::default());
        }
        let mut item = PartyItem {
            id: Uuid::new_v4().simple().to_string(),
            name: data.name,
            img: data.img,
            kind: data.kind,
            system,
            flags: data.flags,
            quantity,
            added_by: added_by.to_string(),
            added_at: Utc::now(),
        };
        item.set_quantity(quantity);
        tracing::info!(item = %item.name, quantity, by = added_by, "party item added");
        self.items.push(item.clone());
        Ok(InventoryChange {
            action: ChangeAction::Add,
            item,
        })
    }

    /// Remove a whole stack.
    pub fn remove(&mut self, id: &str) -> CraftResult<InventoryChange> {
        let index = self.index_of(id)?;
        let item = self.items.remove(index);
        tracing::info!(item = %item.name, "party item removed");
        Ok(InventoryChange {
            action: ChangeAction::Remove,
            item,
        })
    }

    /// Set a stack's size. Zero is rejected; use [`PartyInventory::remove`].
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> CraftResult<InventoryChange> {
        if quantity == 0 {
            return Err(CraftError::InvalidQuantity(quantity));
        }
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        item.set_quantity(quantity);
        tracing::info!(item = %item.name, quantity, "party stack updated");
        Ok(InventoryChange {
            action: ChangeAction::Update,
            item: item.clone(),
        })
    }

    /// Take `quantity` items out of a stack, or the whole stack for `None`.
    ///
    /// Taking at least the stack size removes the entry; anything less
    /// decrements it. Returns the items taken and the ledger change.
    pub fn take(
        &mut self,
        id: &str,
        quantity: Option<u32>,
    ) -> CraftResult<(ItemData, InventoryChange)> {
        if quantity == Some(0) {
            return Err(CraftError::InvalidQuantity(0));
        }
        let index = self.index_of(id)?;
        let current = self.items[index].quantity.max(1);
        let wanted = quantity.unwrap_or(current);

        if wanted >= current {
            let change = self.remove(id)?;
            let data = change.item.to_item_data(current);
            return Ok((data, change));
        }

        let change = self.set_quantity(id, current - wanted)?;
        let data = change.item.to_item_data(wanted);
        Ok((data, change))
    }

    fn index_of(&self, id: &str) -> CraftResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CraftError::ItemNotFound(id.to_string()))
    }
}
