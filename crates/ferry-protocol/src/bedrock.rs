//! Bedrock Edition packets the proxy consumes or produces.

use ferry_nbt::NbtValue;
use ferry_types::{BlockPos, Identifier, Vec3f};
use serde::{Deserialize, Serialize};

/// Packets the proxy sends to the Bedrock client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BedrockClientbound {
    AddActor {
        unique_entity_id: i64,
        runtime_entity_id: u64,
        identifier: String,
        position: Vec3f,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
    },
    RemoveEntity {
        unique_entity_id: i64,
    },
    /// Entity flag and data updates relevant to mount inventories.
    SetEntityData {
        runtime_entity_id: u64,
        chested: bool,
        saddled: bool,
        strength: Option<i32>,
    },
    MovePlayer {
        runtime_entity_id: u64,
        position: Vec3f,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        mode: MoveMode,
        on_ground: bool,
        ridden_runtime_entity_id: u64,
        /// Only meaningful when mode is `Teleport`.
        teleport_cause: Option<TeleportCause>,
        tick: u64,
    },
    SetPlayerGameType {
        gamemode: i32,
    },
    UpdateAdventureSettings {
        no_pvm: bool,
        no_mvp: bool,
        immutable_world: bool,
        show_name_tags: bool,
        auto_jump: bool,
    },
    UpdateAbilities {
        unique_entity_id: i64,
        command_permission: CommandPermission,
        player_permission: PlayerPermission,
        layers: Vec<AbilityLayer>,
    },
    LevelEvent {
        event_id: i32,
        position: Vec3f,
        data: i32,
    },
    ShowCredits {
        runtime_entity_id: u64,
        status: CreditsStatus,
    },
    EntityEvent {
        runtime_entity_id: u64,
        event_id: u8,
        data: i32,
    },
    GameRulesChanged {
        rules: Vec<GameRule>,
    },
    Text {
        text_type: TextType,
        needs_translation: bool,
        source_name: String,
        message: String,
        xuid: String,
    },
    PlaySound {
        sound_name: String,
        position: Vec3f,
        volume: f32,
        pitch: f32,
    },
    /// Opens a mount inventory; `tag` carries the slot hint tree.
    UpdateEquip {
        window_id: u8,
        window_type: u8,
        size: i32,
        unique_entity_id: i64,
        tag: NbtValue,
    },
    ContainerOpen {
        window_id: u8,
        container_type: i8,
        position: BlockPos,
        unique_entity_id: i64,
    },
    ContainerClose {
        window_id: u8,
        server_initiated: bool,
    },
    InventoryContent {
        window_id: u32,
        items: Vec<BedrockItem>,
    },
    InventorySlot {
        window_id: u32,
        slot: u32,
        item: BedrockItem,
    },
}

impl BedrockClientbound {
    /// A raw (untranslated) chat line.
    pub fn raw_text(message: impl Into<String>) -> Self {
        BedrockClientbound::Text {
            text_type: TextType::Raw,
            needs_translation: false,
            source_name: String::new(),
            message: message.into(),
            xuid: String::new(),
        }
    }
}

/// Packets sent by the Bedrock client (inbound to the proxy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BedrockServerbound {
    MovePlayer {
        runtime_entity_id: u64,
        position: Vec3f,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        mode: MoveMode,
        on_ground: bool,
    },
    ContainerClose {
        window_id: u8,
        server_initiated: bool,
    },
    /// Inventory transaction of the "use item on block" kind. The transport
    /// resolves the clicked block's runtime id to its identifier.
    UseItemOn {
        block_position: BlockPos,
        face: i32,
        hotbar_slot: i32,
        click_position: Vec3f,
        block: Identifier,
    },
}

/// An item as the Bedrock client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedrockItem {
    pub identifier: String,
    pub damage: i16,
    pub count: u8,
    pub custom_name: Option<String>,
}

impl BedrockItem {
    pub fn air() -> Self {
        Self {
            identifier: "minecraft:air".into(),
            damage: 0,
            count: 0,
            custom_name: None,
        }
    }

    pub fn is_air(&self) -> bool {
        self.count == 0 || self.identifier == "minecraft:air"
    }
}

/// Movement mode for MovePlayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MoveMode {
    /// Regular position update.
    Normal = 0,
    /// Force position correction.
    Reset = 1,
    /// Teleport with cause information.
    Teleport = 2,
    /// Rotation-only update.
    Rotation = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum TeleportCause {
    Unknown = 0,
    Projectile = 1,
    ChorusFruit = 2,
    Command = 3,
    Behavior = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandPermission {
    Any,
    GameDirectors,
    Admin,
    Host,
    Owner,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPermission {
    Visitor,
    Member,
    Operator,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Build,
    Mine,
    DoorsAndSwitches,
    OpenContainers,
    AttackPlayers,
    AttackMobs,
    OperatorCommands,
    Teleport,
    Invulnerable,
    Flying,
    MayFly,
    Instabuild,
    Lightning,
    FlySpeed,
    WalkSpeed,
    Muted,
    WorldBuilder,
    NoClip,
    PrivilegedBuilder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityLayerType {
    CustomCache,
    Base,
    Spectator,
    Commands,
    Editor,
}

/// One layer of UpdateAbilities. `abilities_set` lists which abilities this
/// layer defines; `ability_values` lists which of those are enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityLayer {
    pub layer_type: AbilityLayerType,
    pub abilities_set: Vec<Ability>,
    pub ability_values: Vec<Ability>,
    pub fly_speed: f32,
    pub walk_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditsStatus {
    StartCredits,
    EndCredits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRule {
    pub name: String,
    pub editable: bool,
    pub value: GameRuleValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameRuleValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextType {
    Raw = 0,
    Chat = 1,
    Translation = 2,
    Popup = 3,
    JukeboxPopup = 4,
    Tip = 5,
    System = 6,
    Whisper = 7,
    Announcement = 8,
    ObjectWhisper = 9,
    Object = 10,
}

/// LevelEvent ids used for weather.
pub mod level_event {
    pub const START_RAINING: i32 = 3001;
    pub const START_THUNDERSTORM: i32 = 3002;
    pub const STOP_RAINING: i32 = 3003;
    pub const STOP_THUNDERSTORM: i32 = 3004;
}

/// EntityEvent ids.
pub mod entity_event {
    pub const ELDER_GUARDIAN_CURSE: u8 = 63;
}

/// Bedrock container type ids (ContainerOpen / UpdateEquip).
pub mod container_type {
    pub const INVENTORY: i8 = -1;
    pub const CONTAINER: i8 = 0;
    pub const DISPENSER: i8 = 6;
    pub const DROPPER: i8 = 7;
    pub const HOPPER: i8 = 8;
    pub const HORSE: i8 = 12;
}

/// Fixed Bedrock window ids.
pub mod container_id {
    pub const INVENTORY: u32 = 0;
    pub const OFFHAND: u32 = 119;
    pub const ARMOR: u32 = 120;
    pub const UI: u32 = 124;
}
