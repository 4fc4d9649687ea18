//! Open containers and the translators that present them to Bedrock.

pub mod horse;
pub mod player;
pub mod translator;

pub use translator::{BedrockSlot, InventoryTranslator};

use crate::entity::MountFamily;
use crate::session::Session;
use ferry_data::BlockDescriptor;
use ferry_protocol::BedrockClientbound;
use ferry_types::{BlockPos, ItemStack};
use tracing::debug;

/// What kind of screen a container is shown as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Chest-like grid, nine slots per row.
    Generic { rows: u8 },
    /// Dispenser or dropper.
    Generic3x3 { is_dropper: bool },
    /// The inventory of a horse-family entity.
    Mount(MountFamily),
}

/// A Java container as the proxy tracks it. Slots cover the container part
/// only; the player inventory appended by the server lives in
/// [`player::PlayerInventory`].
#[derive(Debug, Clone)]
pub struct Container {
    pub id: i32,
    pub title: String,
    pub kind: ContainerKind,
    /// Whether the client is looking at a real block in the world rather
    /// than one the proxy would have to fake.
    pub using_real_block: bool,
    pub holder_position: Option<BlockPos>,
    /// Java id of the entity whose inventory this is.
    pub holder_entity: Option<i32>,
    items: Vec<Option<ItemStack>>,
}

impl Container {
    pub fn new(id: i32, title: impl Into<String>, size: usize, kind: ContainerKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            using_real_block: false,
            holder_position: None,
            holder_entity: None,
            items: vec![None; size],
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Record whether the container is backed by a real block. For 3x3
    /// screens this also decides between dropper and dispenser; passing
    /// `false` leaves that choice untouched.
    pub fn set_using_real_block(&mut self, using_real_block: bool, block: &BlockDescriptor) {
        self.using_real_block = using_real_block;
        if using_real_block {
            if let ContainerKind::Generic3x3 { is_dropper } = &mut self.kind {
                *is_dropper = block.is("minecraft:dropper");
            }
        }
    }

    pub fn is_dropper(&self) -> bool {
        matches!(self.kind, ContainerKind::Generic3x3 { is_dropper: true })
    }

    pub fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.items.get(slot).and_then(Option::as_ref)
    }

    /// Out-of-range slots are ignored.
    pub fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(entry) = self.items.get_mut(slot) {
            *entry = item;
        }
    }

    /// Replace the container part; extra entries are ignored and missing
    /// ones become empty.
    pub fn set_items(&mut self, items: &[Option<ItemStack>]) {
        for (slot, entry) in self.items.iter_mut().enumerate() {
            *entry = items.get(slot).cloned().flatten();
        }
    }

    pub fn resize(&mut self, size: usize) {
        self.items.resize(size, None);
    }
}

/// An open container together with the translator chosen for it.
#[derive(Debug, Clone)]
pub struct InventoryHolder {
    pub container: Container,
    pub translator: InventoryTranslator,
}

/// Show a container on the client and start tracking it. Bedrock has one
/// screen at a time, so any other open container is closed first.
pub fn open_inventory(session: &mut Session, holder: InventoryHolder) {
    let others: Vec<i32> = session
        .inventories
        .keys()
        .copied()
        .filter(|id| *id != holder.container.id)
        .collect();
    for id in others {
        session.inventories.remove(&id);
        session.send_upstream(BedrockClientbound::ContainerClose {
            window_id: id as u8,
            server_initiated: true,
        });
    }

    debug!(
        "Opening container {} ({:?}, {} slots)",
        holder.container.id,
        holder.translator,
        holder.translator.size()
    );
    holder.translator.open(session, &holder.container);
    holder.translator.update_inventory(session, &holder.container);
    session.inventories.insert(holder.container.id, holder);
}

/// Stop tracking a container. Returns it if it was open.
pub fn close_inventory(session: &mut Session, container_id: i32) -> Option<InventoryHolder> {
    let holder = session.inventories.remove(&container_id);
    if holder.is_none() {
        debug!("Container {} was not open", container_id);
    }
    holder
}
