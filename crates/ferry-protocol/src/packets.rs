use crate::bedrock::BedrockServerbound;
use crate::java::JavaClientbound;
use serde::{Deserialize, Serialize};

/// A decoded packet arriving at the proxy, tagged with the side it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InboundPacket {
    /// From the Java server.
    Java(JavaClientbound),
    /// From the Bedrock client.
    Bedrock(BedrockServerbound),
}

/// The dispatch key of an inbound packet: one variant per packet type per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PacketKind {
    JavaLogin,
    JavaGameEvent,
    JavaSynchronizePlayerPosition,
    JavaAddEntity,
    JavaRemoveEntities,
    JavaSetEntityData,
    JavaOpenScreen,
    JavaOpenHorseScreen,
    JavaContainerClose,
    JavaSetContainerContent,
    JavaSetContainerSlot,
    BedrockMovePlayer,
    BedrockContainerClose,
    BedrockUseItemOn,
}

impl InboundPacket {
    pub fn kind(&self) -> PacketKind {
        match self {
            InboundPacket::Java(packet) => match packet {
                JavaClientbound::Login { .. } => PacketKind::JavaLogin,
                JavaClientbound::GameEvent { .. } => PacketKind::JavaGameEvent,
                JavaClientbound::SynchronizePlayerPosition { .. } => {
                    PacketKind::JavaSynchronizePlayerPosition
                }
                JavaClientbound::AddEntity { .. } => PacketKind::JavaAddEntity,
                JavaClientbound::RemoveEntities { .. } => PacketKind::JavaRemoveEntities,
                JavaClientbound::SetEntityData { .. } => PacketKind::JavaSetEntityData,
                JavaClientbound::OpenScreen { .. } => PacketKind::JavaOpenScreen,
                JavaClientbound::OpenHorseScreen { .. } => PacketKind::JavaOpenHorseScreen,
                JavaClientbound::ContainerClose { .. } => PacketKind::JavaContainerClose,
                JavaClientbound::SetContainerContent { .. } => PacketKind::JavaSetContainerContent,
                JavaClientbound::SetContainerSlot { .. } => PacketKind::JavaSetContainerSlot,
            },
            InboundPacket::Bedrock(packet) => match packet {
                BedrockServerbound::MovePlayer { .. } => PacketKind::BedrockMovePlayer,
                BedrockServerbound::ContainerClose { .. } => PacketKind::BedrockContainerClose,
                BedrockServerbound::UseItemOn { .. } => PacketKind::BedrockUseItemOn,
            },
        }
    }
}
