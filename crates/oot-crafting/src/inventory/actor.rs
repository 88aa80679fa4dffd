//! A character's own items and transfers to and from the party ledger.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InventoryChange, ItemData, PartyInventory};
use crate::error::{CraftError, CraftResult};

/// An item held by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorItem {
    /// Item id on the character.
    pub id: String,
    /// The item itself.
    #[serde(flatten)]
    pub data: ItemData,
}

/// A character's inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInventory {
    /// Character name, recorded as `added_by` on party transfers.
    pub owner: String,
    #[serde(default)]
    items: Vec<ActorItem>,
}

impl ActorInventory {
    /// An empty inventory for `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: Vec::new(),
        }
    }

    /// All items.
    pub fn items(&self) -> &[ActorItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&ActorItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Add an item, stacking onto a matching one. Returns the item's id.
    pub fn add(&mut self, data: ItemData) -> CraftResult<String> {
        let quantity = data.quantity();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.data.stacks_with(&data.name, &data.kind, &data.img))
        {
            let total = existing
                .data
                .quantity()
                .checked_add(quantity)
                .ok_or(CraftError::InvalidQuantity(quantity))?;
            existing.data.set_quantity(total);
            return Ok(existing.id.clone());
        }

        let id = Uuid::new_v4().simple().to_string();
        self.items.push(ActorItem {
            id: id.clone(),
            data: data.with_quantity(quantity),
        });
        Ok(id)
    }

    /// Take `quantity` of an item, or all of it for `None`.
    pub fn take(&mut self, id: &str, quantity: Option<u32>) -> CraftResult<ItemData> {
        if quantity == Some(0) {
            return Err(CraftError::InvalidQuantity(0));
        }
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CraftError::ItemNotFound(id.to_string()))?;
        let current = self.items[index].data.quantity();
        let wanted = quantity.unwrap_or(current);

        if wanted >= current {
            let item = self.items.remove(index);
            return Ok(item.data.with_quantity(current));
        }

        let item = &mut self.items[index];
        item.data.set_quantity(current - wanted);
        Ok(item.data.clone().with_quantity(wanted))
    }
}

/// Move items from a character into the party inventory. On failure both
/// inventories are left as they were.
pub fn transfer_to_party(
    actor: &mut ActorInventory,
    party: &mut PartyInventory,
    item_id: &str,
    quantity: Option<u32>,
) -> CraftResult<InventoryChange> {
    let before = actor.clone();
    let data = actor.take(item_id, quantity)?;
    let owner = actor.owner.clone();
    party.add(data, &owner).inspect_err(|_| *actor = before)
}

/// Move items from the party inventory to a character. Returns the party
/// ledger change and the id of the item on the character. On failure both
/// inventories are left as they were.
pub fn transfer_from_party(
    party: &mut PartyInventory,
    actor: &mut ActorInventory,
    party_item_id: &str,
    quantity: Option<u32>,
) -> CraftResult<(InventoryChange, String)> {
    let before = party.clone();
    let (data, change) = party.take(party_item_id, quantity)?;
    let moved = data.quantity();
    let name = data.name.clone();
    let id = actor.add(data).inspect_err(|_| *party = before)?;
    tracing::info!(item = %name, quantity = moved, to = %actor.owner, "moved from party");
    Ok((change, id))
}
