use crate::inventory::{
    close_inventory, open_inventory, player, Container, ContainerKind, InventoryHolder,
    InventoryTranslator,
};
use crate::inventory::translator::PLAYER_PART_SIZE;
use crate::session::Session;
use ferry_data::BlockContainer;
use ferry_protocol::java::MenuType;
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaClientbound, JavaServerbound};
use tracing::debug;

/// Java window id of the player's own inventory.
const PLAYER_WINDOW: i32 = 0;

pub fn translate_open_screen(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::OpenScreen {
        container_id,
        menu_type,
        title,
    }) = packet
    else {
        return;
    };

    let (translator, kind) = match menu_type {
        MenuType::Generic3x3 => (
            InventoryTranslator::Generic3x3,
            ContainerKind::Generic3x3 { is_dropper: false },
        ),
        MenuType::ShulkerBox => (
            InventoryTranslator::Generic { size: 27 },
            ContainerKind::Generic { rows: 3 },
        ),
        menu => match menu.generic_rows() {
            Some(rows) => (
                InventoryTranslator::Generic {
                    size: rows as usize * 9,
                },
                ContainerKind::Generic { rows },
            ),
            None => {
                debug!("No translator for {:?}, closing container {}", menu, container_id);
                session.send_downstream(JavaServerbound::ContainerClose {
                    container_id: *container_id,
                });
                return;
            }
        },
    };

    let mut container = Container::new(
        *container_id,
        title.to_plain_string(),
        translator.size(),
        kind,
    );
    if let Some(interaction) = session.last_interaction.take() {
        let block = session
            .catalog()
            .block_by_identifier(&interaction.block.to_string());
        match block {
            Some(block)
                if block
                    .container
                    .is_some_and(|hosted| block_hosts_menu(hosted, *menu_type)) =>
            {
                container.holder_position = Some(interaction.position);
                container.set_using_real_block(true, &block);
            }
            _ => debug!(
                "Last used block {} does not host {:?}",
                interaction.block, menu_type
            ),
        }
    }

    open_inventory(
        session,
        InventoryHolder {
            container,
            translator,
        },
    );
}

fn block_hosts_menu(container: BlockContainer, menu: MenuType) -> bool {
    match menu {
        MenuType::Generic3x3 => container == BlockContainer::Generic3x3,
        MenuType::Generic9x3 => {
            matches!(container, BlockContainer::Chest | BlockContainer::Barrel)
        }
        MenuType::Generic9x6 => container == BlockContainer::Chest,
        MenuType::ShulkerBox => container == BlockContainer::ShulkerBox,
        _ => false,
    }
}

pub fn translate_open_horse_screen(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::OpenHorseScreen {
        container_id,
        entity_id,
        ..
    }) = packet
    else {
        return;
    };
    let Some(entity) = session.entities.get(*entity_id) else {
        debug!("Horse screen for unknown entity {}", entity_id);
        return;
    };
    let Some(mount) = entity.mount else {
        debug!("Entity {} ({}) has no mount inventory", entity_id, entity.kind);
        return;
    };

    let translator = InventoryTranslator::for_mount(&mount);
    let title = entity.nametag.unwrap_or_else(|| entity.kind.path.clone());
    let mut container = Container::new(
        *container_id,
        title,
        translator.size(),
        ContainerKind::Mount(mount.family),
    );
    container.holder_entity = Some(*entity_id);

    open_inventory(
        session,
        InventoryHolder {
            container,
            translator,
        },
    );
}

pub fn translate_close(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::ContainerClose { container_id }) = packet else {
        return;
    };
    if close_inventory(session, *container_id).is_some() {
        session.send_upstream(BedrockClientbound::ContainerClose {
            window_id: *container_id as u8,
            server_initiated: true,
        });
    }
}

pub fn translate_content(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::SetContainerContent {
        window_id, slots, ..
    }) = packet
    else {
        return;
    };

    if *window_id == PLAYER_WINDOW {
        session.player_inventory.set_items(slots);
        player::update_inventory(session);
        return;
    }

    let Some(holder) = session.inventories.get_mut(window_id) else {
        debug!("Content for container {} that is not open", window_id);
        return;
    };
    let size = holder.container.size();
    holder.container.set_items(slots);
    for (offset, item) in slots.iter().skip(size).take(PLAYER_PART_SIZE).enumerate() {
        session
            .player_inventory
            .set_item(player::MAIN_START + offset, item.clone());
    }

    if let Some(holder) = session.inventories.get(window_id) {
        holder.translator.update_inventory(session, &holder.container);
    }
}

pub fn translate_slot(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::SetContainerSlot {
        window_id,
        slot,
        item,
        ..
    }) = packet
    else {
        return;
    };
    let Ok(slot) = usize::try_from(*slot) else {
        debug!("Ignoring slot {} in container {}", slot, window_id);
        return;
    };

    if *window_id == PLAYER_WINDOW {
        session.player_inventory.set_item(slot, item.clone());
        player::update_slot(session, slot);
        return;
    }

    let Some(holder) = session.inventories.get_mut(window_id) else {
        // The cursor (-1) and anything not open land here.
        debug!("Slot update for container {} that is not open", window_id);
        return;
    };
    let size = holder.container.size();
    if slot >= size + PLAYER_PART_SIZE {
        debug!("Ignoring slot {} in container {} of size {}", slot, window_id, size);
        return;
    }
    if slot < size {
        holder.container.set_item(slot, item.clone());
    } else {
        session
            .player_inventory
            .set_item(slot - size + player::MAIN_START, item.clone());
    }

    if let Some(holder) = session.inventories.get(window_id) {
        holder.translator.update_slot(session, &holder.container, slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Rotation;
    use crate::session::BlockInteraction;
    use crate::test_util::TestSession;
    use ferry_nbt::NbtValue;
    use ferry_protocol::bedrock::container_type;
    use ferry_protocol::java::{metadata_index, EntityMetadataEntry, MetadataValue};
    use ferry_types::{BlockPos, Identifier, ItemStack, TextComponent, Vec3d};

    fn open_screen(t: &mut TestSession, container_id: i32, menu_type: MenuType) {
        let packet = InboundPacket::Java(JavaClientbound::OpenScreen {
            container_id,
            menu_type,
            title: TextComponent::plain("Box"),
        });
        translate_open_screen(&mut t.session, &packet);
    }

    fn interact(t: &mut TestSession, block: &str) {
        t.session.last_interaction = Some(BlockInteraction {
            position: BlockPos::new(4, 65, 4),
            block: Identifier::minecraft(block),
        });
    }

    fn opened_container_type(sent: &[BedrockClientbound]) -> Option<i8> {
        sent.iter().find_map(|packet| match packet {
            BedrockClientbound::ContainerOpen { container_type, .. } => Some(*container_type),
            _ => None,
        })
    }

    #[test]
    fn dropper_block_opens_as_dropper() {
        let mut t = TestSession::new();
        interact(&mut t, "dropper");
        open_screen(&mut t, 1, MenuType::Generic3x3);

        let holder = &t.session.inventories[&1];
        assert!(holder.container.using_real_block);
        assert!(holder.container.is_dropper());
        assert_eq!(
            opened_container_type(&t.drain_upstream()),
            Some(container_type::DROPPER)
        );
    }

    #[test]
    fn dispenser_block_opens_as_dispenser() {
        let mut t = TestSession::new();
        interact(&mut t, "dispenser");
        open_screen(&mut t, 1, MenuType::Generic3x3);
        assert!(t.session.inventories[&1].container.using_real_block);
        assert_eq!(
            opened_container_type(&t.drain_upstream()),
            Some(container_type::DISPENSER)
        );
    }

    #[test]
    fn unrelated_block_is_not_a_real_holder() {
        let mut t = TestSession::new();
        interact(&mut t, "chest");
        open_screen(&mut t, 2, MenuType::Generic3x3);
        let container = &t.session.inventories[&2].container;
        assert!(!container.using_real_block);
        assert_eq!(container.holder_position, None);
        assert!(t.session.last_interaction.is_none());
    }

    #[test]
    fn chest_opens_as_generic_container() {
        let mut t = TestSession::new();
        interact(&mut t, "barrel");
        open_screen(&mut t, 3, MenuType::Generic9x3);
        let sent = t.drain_upstream();
        assert_eq!(
            sent[0],
            BedrockClientbound::ContainerOpen {
                window_id: 3,
                container_type: container_type::CONTAINER,
                position: BlockPos::new(4, 65, 4),
                unique_entity_id: -1,
            }
        );
        assert!(matches!(
            &sent[1],
            BedrockClientbound::InventoryContent { window_id: 3, items } if items.len() == 27
        ));
    }

    #[test]
    fn unsupported_menu_is_closed_on_the_server() {
        let mut t = TestSession::new();
        open_screen(&mut t, 5, MenuType::Anvil);
        assert!(t.session.inventories.is_empty());
        assert_eq!(
            t.drain_downstream(),
            vec![JavaServerbound::ContainerClose { container_id: 5 }]
        );
    }

    #[test]
    fn opening_a_second_container_closes_the_first() {
        let mut t = TestSession::new();
        open_screen(&mut t, 1, MenuType::Generic9x1);
        t.drain_upstream();
        open_screen(&mut t, 2, MenuType::Generic9x2);
        let sent = t.drain_upstream();
        assert_eq!(
            sent[0],
            BedrockClientbound::ContainerClose {
                window_id: 1,
                server_initiated: true
            }
        );
        assert_eq!(t.session.inventories.len(), 1);
    }

    fn spawn_mount(t: &mut TestSession, java_id: i32, kind: &str) -> u64 {
        t.session.entities.spawn(
            java_id,
            Identifier::minecraft(kind),
            Vec3d::new(0.0, 64.0, 0.0),
            Rotation::default(),
        )
    }

    fn open_horse(t: &mut TestSession, container_id: i32, entity_id: i32) {
        let packet = InboundPacket::Java(JavaClientbound::OpenHorseScreen {
            container_id,
            inventory_columns: 0,
            entity_id,
        });
        translate_open_horse_screen(&mut t.session, &packet);
    }

    fn hint_slot_numbers(tag: &NbtValue) -> Vec<i32> {
        tag.get("slots")
            .and_then(NbtValue::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|hint| hint.get("slotNumber").and_then(NbtValue::as_int))
            .collect()
    }

    #[test]
    fn chested_llama_screen() {
        let mut t = TestSession::new();
        let geyser_id = spawn_mount(&mut t, 20, "llama");
        t.session.entities.update_mount(20, |mount| {
            mount.chested = true;
            mount.strength = 3;
        });
        open_horse(&mut t, 4, 20);

        let sent = t.drain_upstream();
        let BedrockClientbound::UpdateEquip {
            window_id,
            window_type,
            size,
            unique_entity_id,
            tag,
        } = &sent[0]
        else {
            panic!("expected UpdateEquip, got {:?}", sent[0]);
        };
        assert_eq!((*window_id, *window_type), (4, 12));
        assert_eq!(*size, 11);
        assert_eq!(*unique_entity_id, geyser_id as i64);
        assert_eq!(hint_slot_numbers(tag), vec![1]);
        assert_eq!(
            t.session.inventories[&4].translator,
            InventoryTranslator::Llama { size: 11 }
        );
    }

    #[test]
    fn horse_screen_hints() {
        let mut t = TestSession::new();
        spawn_mount(&mut t, 21, "horse");
        spawn_mount(&mut t, 22, "zombie_horse");
        spawn_mount(&mut t, 23, "camel");

        let mut hints = Vec::new();
        for (container_id, entity_id) in [(1, 21), (2, 22), (3, 23)] {
            open_horse(&mut t, container_id, entity_id);
            for packet in t.drain_upstream() {
                if let BedrockClientbound::UpdateEquip { size, tag, .. } = packet {
                    hints.push((size, hint_slot_numbers(&tag)));
                }
            }
        }
        assert_eq!(
            hints,
            vec![(2, vec![0, 1]), (2, vec![0]), (2, vec![0])]
        );
    }

    #[test]
    fn horse_screen_for_non_mount_is_ignored() {
        let mut t = TestSession::new();
        spawn_mount(&mut t, 30, "pig");
        open_horse(&mut t, 1, 30);
        open_horse(&mut t, 1, 31);
        assert!(t.session.inventories.is_empty());
        assert!(t.drain_upstream().is_empty());
    }

    #[test]
    fn server_close_notifies_client() {
        let mut t = TestSession::new();
        open_screen(&mut t, 6, MenuType::Generic9x1);
        t.drain_upstream();
        let packet = InboundPacket::Java(JavaClientbound::ContainerClose { container_id: 6 });
        translate_close(&mut t.session, &packet);
        translate_close(&mut t.session, &packet);
        assert_eq!(
            t.drain_upstream(),
            vec![BedrockClientbound::ContainerClose {
                window_id: 6,
                server_initiated: true
            }]
        );
    }

    #[test]
    fn content_splits_container_and_player_parts() {
        let mut t = TestSession::new();
        open_screen(&mut t, 7, MenuType::Generic9x1);
        t.drain_upstream();

        let mut slots = vec![None; 9 + 36];
        slots[0] = Some(ItemStack::new(1, 1));
        slots[9] = Some(ItemStack::new(27, 2));
        slots[9 + 27] = Some(ItemStack::new(809, 3));
        let packet = InboundPacket::Java(JavaClientbound::SetContainerContent {
            window_id: 7,
            state_id: 1,
            slots,
            carried_item: None,
        });
        translate_content(&mut t.session, &packet);

        assert_eq!(
            t.session.inventories[&7].container.item(0),
            Some(&ItemStack::new(1, 1))
        );
        assert_eq!(t.session.player_inventory.item(9), Some(&ItemStack::new(27, 2)));
        assert_eq!(t.session.player_inventory.item(36), Some(&ItemStack::new(809, 3)));

        let sent = t.drain_upstream();
        assert!(matches!(
            &sent[0],
            BedrockClientbound::InventoryContent { window_id: 7, items }
                if items[0].identifier == "minecraft:stone"
        ));
        assert!(matches!(
            &sent[1],
            BedrockClientbound::InventoryContent { window_id: 0, items }
                if items[0].identifier == "minecraft:diamond"
                    && items[9].identifier == "minecraft:dirt"
        ));
    }

    #[test]
    fn slot_updates_route_by_window() {
        let mut t = TestSession::new();
        open_screen(&mut t, 8, MenuType::Generic9x1);
        t.drain_upstream();

        let slot = |window_id, slot| {
            InboundPacket::Java(JavaClientbound::SetContainerSlot {
                window_id,
                state_id: 2,
                slot,
                item: Some(ItemStack::new(1, 1)),
            })
        };
        translate_slot(&mut t.session, &slot(8, 4));
        translate_slot(&mut t.session, &slot(8, 9));
        translate_slot(&mut t.session, &slot(0, 45));
        translate_slot(&mut t.session, &slot(-1, 0));

        let targets: Vec<(u32, u32)> = t
            .drain_upstream()
            .into_iter()
            .filter_map(|packet| match packet {
                BedrockClientbound::InventorySlot {
                    window_id, slot, ..
                } => Some((window_id, slot)),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![(8, 4), (0, 9), (119, 0)]);
        assert_eq!(t.session.player_inventory.item(9), Some(&ItemStack::new(1, 1)));
    }

    #[test]
    fn slot_past_player_part_is_dropped() {
        let mut t = TestSession::new();
        open_screen(&mut t, 8, MenuType::Generic9x1);
        t.drain_upstream();

        // 9 container slots + 36 player slots: 45 is one past the end.
        let packet = InboundPacket::Java(JavaClientbound::SetContainerSlot {
            window_id: 8,
            state_id: 3,
            slot: 45,
            item: Some(ItemStack::new(809, 1)),
        });
        translate_slot(&mut t.session, &packet);

        assert_eq!(t.session.player_inventory.item(player::OFFHAND), None);
        assert!(t.drain_upstream().is_empty());
    }

    #[test]
    fn dashing_camel_keeps_two_slots() {
        let mut t = TestSession::new();
        spawn_mount(&mut t, 40, "camel");
        let packet = InboundPacket::Java(JavaClientbound::SetEntityData {
            entity_id: 40,
            metadata: vec![EntityMetadataEntry {
                index: metadata_index::HAS_CHEST,
                value: MetadataValue::Boolean(true),
            }],
        });
        crate::translators::java::entity::translate_data(&mut t.session, &packet);
        assert!(t.drain_upstream().is_empty());

        open_horse(&mut t, 9, 40);
        let holder = &t.session.inventories[&9];
        assert_eq!(holder.container.size(), 2);
        assert_eq!(holder.translator, InventoryTranslator::Donkey { size: 2 });
    }
}
