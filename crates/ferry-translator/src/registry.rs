use crate::session::Session;
use crate::translators::{bedrock, java};
use ferry_protocol::{InboundPacket, PacketKind};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// A packet translator. Handlers receive only packets of the kind they were
/// registered for.
pub type Handler = fn(&mut Session, &InboundPacket);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a translator is already registered for {0:?}")]
    DuplicateHandler(PacketKind),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no translator registered for {0:?}")]
    UnregisteredPacketKind(PacketKind),
}

/// Every translator the proxy ships with.
const DEFAULT_HANDLERS: [(PacketKind, Handler); 14] = [
    (PacketKind::JavaLogin, java::login::translate),
    (PacketKind::JavaGameEvent, java::game_event::translate),
    (
        PacketKind::JavaSynchronizePlayerPosition,
        java::player_position::translate,
    ),
    (PacketKind::JavaAddEntity, java::entity::translate_add),
    (PacketKind::JavaRemoveEntities, java::entity::translate_remove),
    (PacketKind::JavaSetEntityData, java::entity::translate_data),
    (PacketKind::JavaOpenScreen, java::inventory::translate_open_screen),
    (
        PacketKind::JavaOpenHorseScreen,
        java::inventory::translate_open_horse_screen,
    ),
    (PacketKind::JavaContainerClose, java::inventory::translate_close),
    (PacketKind::JavaSetContainerContent, java::inventory::translate_content),
    (PacketKind::JavaSetContainerSlot, java::inventory::translate_slot),
    (PacketKind::BedrockMovePlayer, bedrock::move_player::translate),
    (PacketKind::BedrockContainerClose, bedrock::inventory::translate_close),
    (PacketKind::BedrockUseItemOn, bedrock::use_item::translate),
];

/// Maps packet kinds to their translator. Built once at startup and shared
/// read-only between sessions.
#[derive(Default)]
pub struct TranslatorRegistry {
    handlers: HashMap<PacketKind, Handler>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_handlers() -> Self {
        Self {
            handlers: DEFAULT_HANDLERS.into_iter().collect(),
        }
    }

    pub fn register(&mut self, kind: PacketKind, handler: Handler) -> Result<(), RegistryError> {
        if self.handlers.contains_key(&kind) {
            return Err(RegistryError::DuplicateHandler(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    pub fn contains(&self, kind: PacketKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the translator for `packet`. Packets with no translator are
    /// reported back and otherwise dropped; the session is left untouched.
    pub fn dispatch(
        &self,
        session: &mut Session,
        packet: &InboundPacket,
    ) -> Result<(), DispatchError> {
        let kind = packet.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            debug!("No translator for {:?}", kind);
            return Err(DispatchError::UnregisteredPacketKind(kind));
        };
        handler(session, packet);
        Ok(())
    }
}
