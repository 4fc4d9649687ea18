use crate::entity::{MountState, Rotation};
use crate::inventory::{ContainerKind, InventoryTranslator};
use crate::session::Session;
use ferry_protocol::java::{horse_flags, metadata_index, EntityMetadataEntry, MetadataValue};
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaClientbound};
use tracing::debug;

pub fn translate_add(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::AddEntity {
        entity_id,
        entity_type,
        position,
        pitch,
        yaw,
        head_yaw,
        ..
    }) = packet
    else {
        return;
    };
    if *entity_id == session.player.java_id {
        return;
    }

    let rotation = Rotation {
        yaw: *yaw,
        pitch: *pitch,
        head_yaw: *head_yaw,
    };
    let geyser_id = session
        .entities
        .spawn(*entity_id, entity_type.clone(), *position, rotation);
    session.send_upstream(BedrockClientbound::AddActor {
        unique_entity_id: geyser_id as i64,
        runtime_entity_id: geyser_id,
        identifier: entity_type.to_string(),
        position: position.to_vec3f(),
        pitch: *pitch,
        yaw: *yaw,
        head_yaw: *head_yaw,
    });
}

pub fn translate_remove(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::RemoveEntities { entity_ids }) = packet else {
        return;
    };
    for &java_id in entity_ids {
        match session.entities.remove(java_id) {
            Some(geyser_id) => session.send_upstream(BedrockClientbound::RemoveEntity {
                unique_entity_id: geyser_id as i64,
            }),
            None => debug!("Removing unknown entity {}", java_id),
        }
    }
}

pub fn translate_data(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::SetEntityData {
        entity_id,
        metadata,
    }) = packet
    else {
        return;
    };
    let Some(geyser_id) = session.entities.geyser_id(*entity_id) else {
        debug!("Metadata for unknown entity {}", entity_id);
        return;
    };

    for entry in metadata {
        if entry.index == metadata_index::CUSTOM_NAME {
            if let MetadataValue::OptionalText(name) = &entry.value {
                let name = name.as_ref().map(|text| text.to_plain_string());
                session.entities.set_nametag(*entity_id, name);
            }
        }
    }

    let Some(before) = session.entities.mount(*entity_id) else {
        return;
    };
    let Some(after) = session
        .entities
        .update_mount(*entity_id, |mount| apply_mount_metadata(mount, metadata))
    else {
        return;
    };
    if before == after {
        return;
    }

    session.send_upstream(BedrockClientbound::SetEntityData {
        runtime_entity_id: geyser_id,
        chested: after.chested,
        saddled: after.saddled,
        strength: after.family.is_llama().then_some(after.strength),
    });
    resize_open_mount_inventory(session, *entity_id, &after);
}

fn apply_mount_metadata(mount: &mut MountState, metadata: &[EntityMetadataEntry]) {
    for entry in metadata {
        match (entry.index, &entry.value) {
            (metadata_index::HORSE_FLAGS, MetadataValue::Byte(flags)) => {
                mount.saddled = flags & horse_flags::SADDLED != 0;
            }
            (metadata_index::HAS_CHEST, MetadataValue::Boolean(chested))
                if mount.family.has_chest_metadata() =>
            {
                mount.chested = *chested;
            }
            (metadata_index::LLAMA_STRENGTH, MetadataValue::Int(strength))
                if mount.family.is_llama() =>
            {
                mount.strength = *strength;
            }
            _ => {}
        }
    }
}

/// Keep an open mount inventory's size in step with its chest.
fn resize_open_mount_inventory(session: &mut Session, java_id: i32, mount: &MountState) {
    let translator = InventoryTranslator::for_mount(mount);
    for holder in session.inventories.values_mut() {
        if holder.container.holder_entity == Some(java_id)
            && matches!(holder.container.kind, ContainerKind::Mount(_))
            && holder.translator != translator
        {
            holder.translator = translator;
            holder.container.resize(translator.size());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MountFamily;
    use crate::inventory::{Container, InventoryHolder};
    use crate::test_util::TestSession;
    use ferry_types::{Identifier, TextComponent, Vec3d};
    use uuid::Uuid;

    fn add(t: &mut TestSession, entity_id: i32, kind: &str) {
        let packet = InboundPacket::Java(JavaClientbound::AddEntity {
            entity_id,
            entity_uuid: Uuid::nil(),
            entity_type: Identifier::minecraft(kind),
            position: Vec3d::new(0.0, 64.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            head_yaw: 0.0,
        });
        translate_add(&mut t.session, &packet);
    }

    fn data(t: &mut TestSession, entity_id: i32, metadata: Vec<EntityMetadataEntry>) {
        let packet = InboundPacket::Java(JavaClientbound::SetEntityData {
            entity_id,
            metadata,
        });
        translate_data(&mut t.session, &packet);
    }

    fn entry(index: u8, value: MetadataValue) -> EntityMetadataEntry {
        EntityMetadataEntry { index, value }
    }

    #[test]
    fn spawn_and_remove_round_trip_ids() {
        let mut t = TestSession::new();
        add(&mut t, 50, "pig");
        let geyser_id = t.session.entities.geyser_id(50).unwrap();
        assert_ne!(geyser_id, t.session.player.geyser_id);

        let packet = InboundPacket::Java(JavaClientbound::RemoveEntities {
            entity_ids: vec![50, 51],
        });
        translate_remove(&mut t.session, &packet);

        let sent = t.drain_upstream();
        assert!(matches!(
            &sent[0],
            BedrockClientbound::AddActor { identifier, .. } if identifier == "minecraft:pig"
        ));
        assert_eq!(
            sent[1],
            BedrockClientbound::RemoveEntity {
                unique_entity_id: geyser_id as i64
            }
        );
        assert_eq!(sent.len(), 2);
    }

    #[test]
    fn own_player_is_not_spawned() {
        let mut t = TestSession::new();
        t.session.player.java_id = 9;
        add(&mut t, 9, "player");
        assert!(t.session.entities.is_empty());
        assert!(t.drain_upstream().is_empty());
    }

    #[test]
    fn mount_metadata_updates_state() {
        let mut t = TestSession::new();
        add(&mut t, 10, "llama");
        t.drain_upstream();

        data(
            &mut t,
            10,
            vec![
                entry(
                    metadata_index::HORSE_FLAGS,
                    MetadataValue::Byte(horse_flags::SADDLED),
                ),
                entry(metadata_index::HAS_CHEST, MetadataValue::Boolean(true)),
                entry(metadata_index::LLAMA_STRENGTH, MetadataValue::Int(4)),
                entry(
                    metadata_index::CUSTOM_NAME,
                    MetadataValue::OptionalText(Some(TextComponent::plain("Carl"))),
                ),
            ],
        );

        let mount = t.session.entities.mount(10).unwrap();
        assert!(mount.saddled && mount.chested);
        assert_eq!(mount.strength, 4);
        assert_eq!(
            t.session.entities.get(10).unwrap().nametag.as_deref(),
            Some("Carl")
        );
        assert_eq!(
            t.drain_upstream(),
            vec![BedrockClientbound::SetEntityData {
                runtime_entity_id: t.session.entities.geyser_id(10).unwrap(),
                chested: true,
                saddled: true,
                strength: Some(4),
            }]
        );

        // Repeating the same metadata changes nothing.
        data(
            &mut t,
            10,
            vec![entry(metadata_index::HAS_CHEST, MetadataValue::Boolean(true))],
        );
        assert!(t.drain_upstream().is_empty());
    }

    #[test]
    fn open_mount_inventory_grows_with_chest() {
        let mut t = TestSession::new();
        add(&mut t, 11, "donkey");
        let mut container =
            Container::new(5, "Donkey", 2, ContainerKind::Mount(MountFamily::Donkey));
        container.holder_entity = Some(11);
        t.session.inventories.insert(
            5,
            InventoryHolder {
                container,
                translator: InventoryTranslator::Donkey { size: 2 },
            },
        );

        data(
            &mut t,
            11,
            vec![entry(metadata_index::HAS_CHEST, MetadataValue::Boolean(true))],
        );

        let holder = &t.session.inventories[&5];
        assert_eq!(holder.translator, InventoryTranslator::Donkey { size: 17 });
        assert_eq!(holder.container.size(), 17);
    }

    #[test]
    fn metadata_for_unknown_entity_is_dropped() {
        let mut t = TestSession::new();
        data(
            &mut t,
            404,
            vec![entry(metadata_index::HAS_CHEST, MetadataValue::Boolean(true))],
        );
        assert!(t.drain_upstream().is_empty());
    }
}
