use super::horse::{self, MountLayout, ARMOR_SLOT, CARPET_SLOT, SADDLE_SLOT};
use super::player;
use super::{Container, ContainerKind};
use crate::entity::MountState;
use crate::item::translate_to_bedrock;
use crate::session::Session;
use ferry_nbt::NbtValue;
use ferry_protocol::bedrock::container_type;
use ferry_protocol::{BedrockClientbound, BedrockItem};

/// Main inventory plus hotbar, as appended by the Java server after every
/// container's own slots.
pub const PLAYER_PART_SIZE: usize = 36;

/// A slot on the Bedrock side: either in the open container or in the
/// player's own inventory (0-8 hotbar, 9-35 main).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedrockSlot {
    Container(u32),
    Player(u32),
}

/// How one Java container is shown on Bedrock. Chosen once when the
/// container opens; mount variants are resized if the mount's chest changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryTranslator {
    Generic { size: usize },
    Generic3x3,
    Horse { size: usize, armor: bool },
    Donkey { size: usize },
    Llama { size: usize },
}

impl InventoryTranslator {
    pub fn for_mount(mount: &MountState) -> Self {
        let size = horse::slot_count(mount);
        match horse::layout(mount.family) {
            MountLayout::Llama => InventoryTranslator::Llama { size },
            MountLayout::Donkey => InventoryTranslator::Donkey { size },
            MountLayout::Horse => InventoryTranslator::Horse {
                size,
                armor: mount.family.accepts_armor(),
            },
        }
    }

    /// Slots in the container part, excluding the player inventory.
    pub fn size(&self) -> usize {
        match *self {
            InventoryTranslator::Generic3x3 => 9,
            InventoryTranslator::Generic { size }
            | InventoryTranslator::Horse { size, .. }
            | InventoryTranslator::Donkey { size }
            | InventoryTranslator::Llama { size } => size,
        }
    }

    pub fn bedrock_container_type(&self, container: &Container) -> i8 {
        match self {
            InventoryTranslator::Generic3x3 if container.is_dropper() => container_type::DROPPER,
            InventoryTranslator::Generic3x3 => container_type::DISPENSER,
            InventoryTranslator::Generic { .. } => container_type::CONTAINER,
            InventoryTranslator::Horse { .. }
            | InventoryTranslator::Donkey { .. }
            | InventoryTranslator::Llama { .. } => container_type::HORSE,
        }
    }

    /// Map a Java slot of the combined container + player view. `None` means
    /// the slot exists on Java but has no Bedrock counterpart.
    pub fn java_slot_to_bedrock(&self, slot: usize) -> Option<BedrockSlot> {
        let size = self.size();
        if slot >= size {
            let player_slot = slot - size;
            return match player_slot {
                0..=26 => Some(BedrockSlot::Player(player_slot as u32 + 9)),
                27..=35 => Some(BedrockSlot::Player(player_slot as u32 - 27)),
                _ => None,
            };
        }
        match (self, slot) {
            (InventoryTranslator::Donkey { .. }, 1) => None,
            (InventoryTranslator::Llama { .. }, 0) => None,
            _ => Some(BedrockSlot::Container(slot as u32)),
        }
    }

    pub fn bedrock_slot_to_java(&self, slot: BedrockSlot) -> Option<usize> {
        let size = self.size();
        match slot {
            BedrockSlot::Player(slot) => match slot {
                0..=8 => Some(size + 27 + slot as usize),
                9..=35 => Some(size + slot as usize - 9),
                _ => None,
            },
            BedrockSlot::Container(slot) => {
                let slot = slot as usize;
                match (self, slot) {
                    (_, s) if s >= size => None,
                    (InventoryTranslator::Donkey { .. }, 1) => None,
                    (InventoryTranslator::Llama { .. }, 0) => None,
                    _ => Some(slot),
                }
            }
        }
    }

    /// The `{slots: [...]}` hint tree for mount screens.
    pub fn slot_hints(&self) -> Option<NbtValue> {
        match self {
            InventoryTranslator::Horse { armor: true, .. } => {
                Some(horse::hint_tree(&[&*SADDLE_SLOT, &*ARMOR_SLOT]))
            }
            InventoryTranslator::Horse { armor: false, .. } | InventoryTranslator::Donkey { .. } => {
                Some(horse::hint_tree(&[&*SADDLE_SLOT]))
            }
            InventoryTranslator::Llama { .. } => Some(horse::hint_tree(&[&*CARPET_SLOT])),
            InventoryTranslator::Generic { .. } | InventoryTranslator::Generic3x3 => None,
        }
    }

    /// Show the container on the Bedrock client.
    pub fn open(&self, session: &Session, container: &Container) {
        let window_id = container.id as u8;
        if let ContainerKind::Mount(_) = container.kind {
            let entity = container
                .holder_entity
                .and_then(|java_id| session.entities.geyser_id(java_id))
                .unwrap_or_default();
            session.send_upstream(BedrockClientbound::UpdateEquip {
                window_id,
                window_type: container_type::HORSE as u8,
                size: self.size() as i32,
                unique_entity_id: entity as i64,
                tag: self.slot_hints().unwrap_or(NbtValue::Compound(Vec::new())),
            });
            return;
        }

        let position = container
            .holder_position
            .unwrap_or_else(|| session.player.position.block_pos());
        session.send_upstream(BedrockClientbound::ContainerOpen {
            window_id,
            container_type: self.bedrock_container_type(container),
            position,
            unique_entity_id: -1,
        });
    }

    /// Send every container slot, then the player's inventory.
    pub fn update_inventory(&self, session: &Session, container: &Container) {
        let mut items = vec![BedrockItem::air(); self.size()];
        for java_slot in 0..self.size() {
            if let Some(BedrockSlot::Container(slot)) = self.java_slot_to_bedrock(java_slot) {
                if let Some(entry) = items.get_mut(slot as usize) {
                    *entry = translate_to_bedrock(session, container.item(java_slot));
                }
            }
        }
        session.send_upstream(BedrockClientbound::InventoryContent {
            window_id: container.id as u32,
            items,
        });
        player::update_inventory(session);
    }

    /// Send one slot of the combined view.
    pub fn update_slot(&self, session: &Session, container: &Container, java_slot: usize) {
        match self.java_slot_to_bedrock(java_slot) {
            Some(BedrockSlot::Container(slot)) => {
                session.send_upstream(BedrockClientbound::InventorySlot {
                    window_id: container.id as u32,
                    slot,
                    item: translate_to_bedrock(session, container.item(java_slot)),
                });
            }
            Some(BedrockSlot::Player(_)) => {
                player::update_slot(session, java_slot - self.size() + player::MAIN_START);
            }
            None => {}
        }
    }
}
