//! Java Edition play-state packets the proxy consumes or produces.

use ferry_types::{BlockPos, GameMode, Hand, Identifier, ItemStack, TextComponent, Vec3d, Vec3f};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Packets sent by the Java server (inbound to the proxy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaClientbound {
    /// Login (play): the subset of fields the proxy tracks.
    Login {
        entity_id: i32,
        is_hardcore: bool,
        game_mode: GameMode,
        previous_game_mode: i8,
    },

    /// Game Event: a notification id plus a float whose meaning depends on the id.
    GameEvent {
        event: u8,
        value: f32,
    },

    /// Synchronize Player Position: a server-authoritative position correction.
    SynchronizePlayerPosition {
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        /// Bitmask of [`relative_flags`]; set bits are offsets from the current value.
        flags: u8,
        teleport_id: i32,
    },

    AddEntity {
        entity_id: i32,
        entity_uuid: Uuid,
        entity_type: Identifier,
        position: Vec3d,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
    },

    RemoveEntities {
        entity_ids: Vec<i32>,
    },

    SetEntityData {
        entity_id: i32,
        metadata: Vec<EntityMetadataEntry>,
    },

    OpenScreen {
        container_id: i32,
        menu_type: MenuType,
        title: TextComponent,
    },

    /// Opens the inventory of a horse-family mount.
    OpenHorseScreen {
        container_id: i32,
        inventory_columns: i32,
        entity_id: i32,
    },

    ContainerClose {
        container_id: i32,
    },

    /// Set Container Content: sends an entire container, player inventory appended.
    SetContainerContent {
        window_id: i32,
        state_id: i32,
        slots: Vec<Option<ItemStack>>,
        carried_item: Option<ItemStack>,
    },

    SetContainerSlot {
        window_id: i32,
        state_id: i32,
        slot: i16,
        item: Option<ItemStack>,
    },
}

/// Packets the proxy sends to the Java server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaServerbound {
    AcceptTeleportation {
        teleport_id: i32,
    },
    MovePlayerPos {
        position: Vec3d,
        on_ground: bool,
    },
    MovePlayerPosRot {
        position: Vec3d,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    MovePlayerRot {
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    PlayerAbilities {
        flying: bool,
    },
    ClientCommand {
        action: ClientCommand,
    },
    ContainerClose {
        container_id: i32,
    },
    UseItemOn {
        hand: Hand,
        position: BlockPos,
        face: u8,
        cursor: Vec3f,
        inside_block: bool,
        sequence: i32,
    },
}

/// Game Event notification ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameEventKind {
    NoRespawnBlockAvailable = 0,
    StartRaining = 1,
    StopRaining = 2,
    ChangeGameMode = 3,
    WinGame = 4,
    DemoEvent = 5,
    PlayArrowHitSound = 6,
    RainLevelChange = 7,
    ThunderLevelChange = 8,
    PufferFishSting = 9,
    GuardianElderEffect = 10,
    ImmediateRespawn = 11,
    LimitedCrafting = 12,
    LevelChunksLoadStart = 13,
}

impl GameEventKind {
    pub fn from_id(id: u8) -> Option<Self> {
        use GameEventKind::*;
        Some(match id {
            0 => NoRespawnBlockAvailable,
            1 => StartRaining,
            2 => StopRaining,
            3 => ChangeGameMode,
            4 => WinGame,
            5 => DemoEvent,
            6 => PlayArrowHitSound,
            7 => RainLevelChange,
            8 => ThunderLevelChange,
            9 => PufferFishSting,
            10 => GuardianElderEffect,
            11 => ImmediateRespawn,
            12 => LimitedCrafting,
            13 => LevelChunksLoadStart,
            _ => return None,
        })
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Synchronize Player Position relative flags.
pub mod relative_flags {
    pub const X: u8 = 0x01;
    pub const Y: u8 = 0x02;
    pub const Z: u8 = 0x04;
    pub const Y_ROT: u8 = 0x08;
    pub const X_ROT: u8 = 0x10;
}

/// Client Command actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientCommand {
    Respawn,
    Stats,
}

/// Screen layouts the server can open with Open Screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuType {
    Generic9x1,
    Generic9x2,
    Generic9x3,
    Generic9x4,
    Generic9x5,
    Generic9x6,
    Generic3x3,
    Crafter3x3,
    Anvil,
    Beacon,
    BlastFurnace,
    BrewingStand,
    Crafting,
    Enchantment,
    Furnace,
    Grindstone,
    Hopper,
    Lectern,
    Loom,
    Merchant,
    ShulkerBox,
    Smithing,
    Smoker,
    CartographyTable,
    Stonecutter,
}

impl MenuType {
    /// Row count for the 9-wide generic chests.
    pub fn generic_rows(self) -> Option<u8> {
        match self {
            MenuType::Generic9x1 => Some(1),
            MenuType::Generic9x2 => Some(2),
            MenuType::Generic9x3 => Some(3),
            MenuType::Generic9x4 => Some(4),
            MenuType::Generic9x5 => Some(5),
            MenuType::Generic9x6 => Some(6),
            _ => None,
        }
    }
}

/// A single typed entity metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadataEntry {
    pub index: u8,
    pub value: MetadataValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Byte(i8),
    Int(i32),
    Float(f32),
    String(String),
    Boolean(bool),
    OptionalText(Option<TextComponent>),
}

/// Metadata indices for the horse family.
pub mod metadata_index {
    /// Custom name (entity base class).
    pub const CUSTOM_NAME: u8 = 2;
    /// Abstract horse flags byte.
    pub const HORSE_FLAGS: u8 = 17;
    /// Chested horse "has chest" boolean (donkey, mule, llama).
    pub const HAS_CHEST: u8 = 18;
    /// Llama strength integer.
    pub const LLAMA_STRENGTH: u8 = 19;
}

/// Bits of the abstract horse flags byte.
pub mod horse_flags {
    pub const TAME: i8 = 0x02;
    pub const SADDLED: i8 = 0x04;
}
