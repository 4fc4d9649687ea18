use crate::{GameProfile, TextComponent};
use serde::{Deserialize, Serialize};

/// Item rarity, which decides the colour of an item's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rarity {
    #[default]
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
}

impl Rarity {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Unknown ordinals fall back to common, matching how the client renders them.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Rarity::Uncommon,
            2 => Rarity::Rare,
            3 => Rarity::Epic,
            _ => Rarity::Common,
        }
    }
}

/// The subset of item data components the proxy translates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<TextComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<GameProfile>,
}

/// An item stack in an inventory slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Java item registry ID.
    pub item_id: i32,
    /// Number of items in this stack (1-127).
    pub count: i8,
    #[serde(default)]
    pub components: ItemComponents,
}

impl ItemStack {
    pub fn new(item_id: i32, count: i8) -> Self {
        Self {
            item_id,
            count,
            components: ItemComponents::default(),
        }
    }

    pub fn with_components(mut self, components: ItemComponents) -> Self {
        self.components = components;
        self
    }

    /// The rarity component, or common when absent.
    pub fn rarity(&self) -> Rarity {
        self.components.rarity.unwrap_or_default()
    }
}
