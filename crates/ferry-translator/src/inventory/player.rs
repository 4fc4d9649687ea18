//! The player's own inventory (Java window 0).

use crate::item::translate_to_bedrock;
use crate::session::Session;
use ferry_protocol::bedrock::container_id;
use ferry_protocol::{BedrockClientbound, BedrockItem};
use ferry_types::{GameMode, ItemStack};

pub const SLOT_COUNT: usize = 46;
pub const CRAFT_OUTPUT: usize = 0;
pub const CRAFT_GRID_START: usize = 1;
pub const ARMOR_START: usize = 5;
pub const MAIN_START: usize = 9;
pub const HOTBAR_START: usize = 36;
pub const OFFHAND: usize = 45;

/// Where the crafting grid cells sit in Bedrock's UI container.
const BEDROCK_CRAFT_GRID_START: u32 = 28;
const BEDROCK_CRAFT_OUTPUT: u32 = 50;

#[derive(Debug, Clone)]
pub struct PlayerInventory {
    items: Vec<Option<ItemStack>>,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self {
            items: vec![None; SLOT_COUNT],
        }
    }

    pub fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.items.get(slot).and_then(Option::as_ref)
    }

    pub fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(entry) = self.items.get_mut(slot) {
            *entry = item;
        }
    }

    pub fn set_items(&mut self, items: &[Option<ItemStack>]) {
        for (slot, entry) in self.items.iter_mut().enumerate() {
            *entry = items.get(slot).cloned().flatten();
        }
    }
}

/// Bedrock window and slot for a Java window-0 slot.
pub fn bedrock_slot(java_slot: usize) -> Option<(u32, u32)> {
    let slot = java_slot as u32;
    match java_slot {
        CRAFT_OUTPUT => Some((container_id::UI, BEDROCK_CRAFT_OUTPUT)),
        1..=4 => Some((
            container_id::UI,
            BEDROCK_CRAFT_GRID_START + slot - CRAFT_GRID_START as u32,
        )),
        5..=8 => Some((container_id::ARMOR, slot - ARMOR_START as u32)),
        9..=35 => Some((container_id::INVENTORY, slot)),
        36..=44 => Some((container_id::INVENTORY, slot - HOTBAR_START as u32)),
        OFFHAND => Some((container_id::OFFHAND, 0)),
        _ => None,
    }
}

/// Send the whole player inventory: main + hotbar, armor, offhand, then the
/// crafting grid.
pub fn update_inventory(session: &Session) {
    let inventory = &session.player_inventory;

    let mut main = Vec::with_capacity(36);
    for slot in (HOTBAR_START..OFFHAND).chain(MAIN_START..HOTBAR_START) {
        main.push(translate_to_bedrock(session, inventory.item(slot)));
    }
    session.send_upstream(BedrockClientbound::InventoryContent {
        window_id: container_id::INVENTORY,
        items: main,
    });

    let armor = (ARMOR_START..MAIN_START)
        .map(|slot| translate_to_bedrock(session, inventory.item(slot)))
        .collect();
    session.send_upstream(BedrockClientbound::InventoryContent {
        window_id: container_id::ARMOR,
        items: armor,
    });

    session.send_upstream(BedrockClientbound::InventoryContent {
        window_id: container_id::OFFHAND,
        items: vec![translate_to_bedrock(session, inventory.item(OFFHAND))],
    });

    update_crafting_grid(session);
}

pub fn update_slot(session: &Session, java_slot: usize) {
    let Some((window_id, slot)) = bedrock_slot(java_slot) else {
        return;
    };
    if (CRAFT_GRID_START..ARMOR_START).contains(&java_slot) {
        update_crafting_grid(session);
        return;
    }
    session.send_upstream(BedrockClientbound::InventorySlot {
        window_id,
        slot,
        item: translate_to_bedrock(session, session.player_inventory.item(java_slot)),
    });
}

/// Refresh the four 2x2 crafting cells. Creative players cannot craft in the
/// inventory, so the cells are blocked off with a placeholder.
pub fn update_crafting_grid(session: &Session) {
    for java_slot in CRAFT_GRID_START..ARMOR_START {
        let item = if session.game_mode == GameMode::Creative {
            unusable_space_block(session)
        } else {
            translate_to_bedrock(session, session.player_inventory.item(java_slot))
        };
        session.send_upstream(BedrockClientbound::InventorySlot {
            window_id: container_id::UI,
            slot: BEDROCK_CRAFT_GRID_START + (java_slot - CRAFT_GRID_START) as u32,
            item,
        });
    }
}

fn unusable_space_block(session: &Session) -> BedrockItem {
    BedrockItem {
        identifier: "minecraft:barrier".into(),
        damage: 0,
        count: 1,
        custom_name: Some(format!(
            "§r§c{}",
            session.localized("container.crafting.unusable")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TestSession;

    #[test]
    fn window_zero_slot_layout() {
        assert_eq!(bedrock_slot(0), Some((container_id::UI, 50)));
        assert_eq!(bedrock_slot(1), Some((container_id::UI, 28)));
        assert_eq!(bedrock_slot(4), Some((container_id::UI, 31)));
        assert_eq!(bedrock_slot(5), Some((container_id::ARMOR, 0)));
        assert_eq!(bedrock_slot(9), Some((container_id::INVENTORY, 9)));
        assert_eq!(bedrock_slot(36), Some((container_id::INVENTORY, 0)));
        assert_eq!(bedrock_slot(44), Some((container_id::INVENTORY, 8)));
        assert_eq!(bedrock_slot(45), Some((container_id::OFFHAND, 0)));
        assert_eq!(bedrock_slot(46), None);
    }

    #[test]
    fn creative_crafting_grid_is_blocked() {
        let mut t = TestSession::new();
        t.session.game_mode = GameMode::Creative;
        update_crafting_grid(&t.session);

        let sent = t.drain_upstream();
        assert_eq!(sent.len(), 4);
        for (i, packet) in sent.iter().enumerate() {
            let BedrockClientbound::InventorySlot { window_id, slot, item } = packet else {
                panic!("expected InventorySlot, got {packet:?}");
            };
            assert_eq!(*window_id, container_id::UI);
            assert_eq!(*slot, 28 + i as u32);
            assert_eq!(item.identifier, "minecraft:barrier");
            assert_eq!(
                item.custom_name.as_deref(),
                Some("§r§cUnusable crafting space")
            );
        }
    }

    #[test]
    fn survival_crafting_grid_shows_items() {
        let mut t = TestSession::new();
        t.session
            .player_inventory
            .set_item(2, Some(ItemStack::new(27, 4)));
        update_crafting_grid(&t.session);

        let sent = t.drain_upstream();
        let BedrockClientbound::InventorySlot { slot, item, .. } = &sent[1] else {
            panic!("expected InventorySlot");
        };
        assert_eq!(*slot, 29);
        assert_eq!(item.identifier, "minecraft:dirt");
        assert_eq!(item.count, 4);
        assert!(sent.iter().enumerate().all(|(i, p)| i == 1
            || matches!(p, BedrockClientbound::InventorySlot { item, .. } if item.is_air())));
    }

    #[test]
    fn full_update_orders_hotbar_first() {
        let mut t = TestSession::new();
        t.session
            .player_inventory
            .set_item(36, Some(ItemStack::new(1, 64)));
        t.session
            .player_inventory
            .set_item(9, Some(ItemStack::new(27, 1)));
        update_inventory(&t.session);

        let sent = t.drain_upstream();
        let BedrockClientbound::InventoryContent { window_id, items } = &sent[0] else {
            panic!("expected InventoryContent");
        };
        assert_eq!(*window_id, container_id::INVENTORY);
        assert_eq!(items.len(), 36);
        assert_eq!(items[0].identifier, "minecraft:stone");
        assert_eq!(items[9].identifier, "minecraft:dirt");
        // main, armor, offhand, then four crafting cells
        assert_eq!(sent.len(), 7);
    }
}
