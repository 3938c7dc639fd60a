//! Hotbar item values and quick-access slot constants.

use crate::resource::ResourceKind;
use serde::{Deserialize, Serialize};

/// Number of quick-access slots in a player's hotbar.
pub const HOTBAR_SIZE: usize = 9;

/// Broad item categories a hotbar slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A stack of raw resource units.
    Resource,
    /// Harvesting tool.
    Tool,
    /// Combat weapon.
    Weapon,
    /// Single-use item consumed on activation.
    Consumable,
}

/// One occupied hotbar slot.
///
/// Immutable once constructed; moving an item between slots replaces
/// slot contents rather than mutating the value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotbarItem {
    /// Stable item identifier (resource key or item registry key).
    pub item_id: String,
    /// Category of the item.
    pub kind: ItemKind,
    /// Stack size carried in the slot. Always positive.
    pub amount: u32,
    /// Human-readable name shown by the client.
    pub display_name: String,
    /// Icon key resolved by the presentation layer.
    pub icon: String,
}

impl HotbarItem {
    /// Construct an arbitrary hotbar item.
    pub fn new(
        item_id: impl Into<String>,
        kind: ItemKind,
        amount: u32,
        display_name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            amount,
            display_name: display_name.into(),
            icon: icon.into(),
        }
    }

    /// Build a resource stack item from its static metadata.
    pub fn from_resource(kind: ResourceKind, amount: u32) -> Self {
        let meta = kind.metadata();
        Self {
            item_id: kind.as_key().to_string(),
            kind: ItemKind::Resource,
            amount,
            display_name: meta.display_name.to_string(),
            icon: meta.icon.to_string(),
        }
    }

    /// Resource kind carried by this item, if it is a resource stack.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        if self.kind != ItemKind::Resource {
            return None;
        }
        self.item_id.parse().ok()
    }
}
