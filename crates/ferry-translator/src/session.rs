use crate::entity::EntityCache;
use crate::inventory::player::PlayerInventory;
use crate::inventory::InventoryHolder;
use crate::teleport::TeleportQueue;
use ferry_data::Catalog;
use ferry_protocol::bedrock::{
    level_event, Ability, AbilityLayer, AbilityLayerType, CommandPermission, PlayerPermission,
};
use ferry_protocol::{BedrockClientbound, JavaServerbound};
use ferry_types::{BlockPos, GameMode, Identifier, Vec3d, Vec3f};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Height of a player's eyes above their feet. Bedrock reports player
/// positions at eye level, Java at the feet.
pub const PLAYER_EYE_HEIGHT: f32 = 1.62;

/// Per-connection tunables, usually derived from the proxy config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub locale: String,
    pub max_pending_teleports: usize,
    /// Unmatched movement reports before the active teleport is sent again; 0 disables.
    pub teleport_resend_after: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            locale: ferry_data::DEFAULT_LOCALE.into(),
            max_pending_teleports: 16,
            teleport_resend_after: 20,
        }
    }
}

/// The local player as both sides see it.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Entity ID assigned by the Java server.
    pub java_id: i32,
    /// Runtime/unique ID the Bedrock client knows the player by.
    pub geyser_id: u64,
    /// Feet position in the Java frame.
    pub position: Vec3d,
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
}

impl PlayerState {
    pub fn bedrock_position(&self) -> Vec3f {
        self.position.to_vec3f().up(PLAYER_EYE_HEIGHT)
    }
}

/// Flight and permission state behind UpdateAbilities.
#[derive(Debug, Clone)]
pub struct AbilityState {
    pub op_permission_level: u8,
    pub can_fly: bool,
    pub flying: bool,
    pub walk_speed: f32,
    pub fly_speed: f32,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            op_permission_level: 0,
            can_fly: false,
            flying: false,
            walk_speed: 0.1,
            fly_speed: 0.05,
        }
    }
}

/// The last block the Bedrock client used an item on.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInteraction {
    pub position: BlockPos,
    pub block: Identifier,
}

/// Abilities every UpdateAbilities base layer defines.
const USED_ABILITIES: [Ability; 13] = [
    Ability::Build,
    Ability::Mine,
    Ability::DoorsAndSwitches,
    Ability::OpenContainers,
    Ability::AttackPlayers,
    Ability::AttackMobs,
    Ability::OperatorCommands,
    Ability::MayFly,
    Ability::FlySpeed,
    Ability::WalkSpeed,
    Ability::Flying,
    Ability::NoClip,
    Ability::Instabuild,
];

/// All mutable state for one proxied connection. Owned by a single task and
/// handed to each translator by `&mut`; dropping it releases everything.
pub struct Session {
    pub player: PlayerState,
    pub game_mode: GameMode,
    pub entities: EntityCache,
    /// Open containers keyed by Java container id.
    pub inventories: HashMap<i32, InventoryHolder>,
    pub player_inventory: PlayerInventory,
    pub unconfirmed_teleports: TeleportQueue,
    pub rain_strength: f32,
    pub thunder_strength: f32,
    pub abilities: AbilityState,
    pub last_interaction: Option<BlockInteraction>,
    locale: String,
    block_sequence: i32,
    catalog: Arc<dyn Catalog>,
    upstream: mpsc::UnboundedSender<BedrockClientbound>,
    downstream: mpsc::UnboundedSender<JavaServerbound>,
}

impl Session {
    pub fn new(
        settings: SessionSettings,
        catalog: Arc<dyn Catalog>,
        upstream: mpsc::UnboundedSender<BedrockClientbound>,
        downstream: mpsc::UnboundedSender<JavaServerbound>,
    ) -> Self {
        let mut entities = EntityCache::new();
        let geyser_id = entities.allocate_geyser_id();
        Self {
            player: PlayerState {
                java_id: 0,
                geyser_id,
                position: Vec3d::default(),
                yaw: 0.0,
                pitch: 0.0,
                head_yaw: 0.0,
                on_ground: false,
            },
            game_mode: GameMode::Survival,
            entities,
            inventories: HashMap::new(),
            player_inventory: PlayerInventory::new(),
            unconfirmed_teleports: TeleportQueue::new(
                settings.max_pending_teleports,
                settings.teleport_resend_after,
            ),
            rain_strength: 0.0,
            thunder_strength: 0.0,
            abilities: AbilityState::default(),
            last_interaction: None,
            locale: settings.locale,
            block_sequence: 0,
            catalog,
            upstream,
            downstream,
        }
    }

    /// Queue a packet for the Bedrock client.
    pub fn send_upstream(&self, packet: BedrockClientbound) {
        if self.upstream.send(packet).is_err() {
            debug!("Upstream closed, dropping packet");
        }
    }

    /// Queue a packet for the Java server.
    pub fn send_downstream(&self, packet: JavaServerbound) {
        if self.downstream.send(packet).is_err() {
            debug!("Downstream closed, dropping packet");
        }
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn localized(&self, key: &str) -> String {
        self.catalog.localized_string(key, &self.locale)
    }

    /// Show a plain chat line to the Bedrock player.
    pub fn send_message(&self, message: impl Into<String>) {
        self.send_upstream(BedrockClientbound::raw_text(message));
    }

    /// Next sequence number for block interactions sent to the Java server.
    pub fn next_block_sequence(&mut self) -> i32 {
        self.block_sequence += 1;
        self.block_sequence
    }

    pub fn is_raining(&self) -> bool {
        self.rain_strength > 0.0
    }

    pub fn is_thundering(&self) -> bool {
        self.thunder_strength > 0.0
    }

    pub fn update_rain(&mut self, strength: f32) {
        self.rain_strength = strength;
        let event_id = if self.is_raining() {
            level_event::START_RAINING
        } else {
            level_event::STOP_RAINING
        };
        self.send_upstream(BedrockClientbound::LevelEvent {
            event_id,
            position: Vec3f::ZERO,
            data: (strength * 65535.0) as i32,
        });
    }

    pub fn update_thunder(&mut self, strength: f32) {
        self.thunder_strength = strength;
        let event_id = if self.is_thundering() {
            level_event::START_THUNDERSTORM
        } else {
            level_event::STOP_THUNDERSTORM
        };
        self.send_upstream(BedrockClientbound::LevelEvent {
            event_id,
            position: Vec3f::ZERO,
            data: (strength * 65535.0) as i32,
        });
    }

    /// Resend adventure settings and the ability layer for the current game mode.
    pub fn send_adventure_settings(&mut self) {
        let spectator = self.game_mode == GameMode::Spectator;
        let world_immutable = self.game_mode == GameMode::Adventure || spectator;

        let (command_permission, player_permission) = if self.abilities.op_permission_level >= 2 {
            (CommandPermission::GameDirectors, PlayerPermission::Operator)
        } else {
            (CommandPermission::Any, PlayerPermission::Member)
        };

        self.send_upstream(BedrockClientbound::UpdateAdventureSettings {
            no_pvm: false,
            no_mvp: false,
            immutable_world: world_immutable,
            show_name_tags: false,
            auto_jump: true,
        });

        let mut values = Vec::new();
        if self.abilities.can_fly || spectator {
            values.push(Ability::MayFly);
        }
        values.extend([
            Ability::Build,
            Ability::Mine,
            Ability::DoorsAndSwitches,
            Ability::OpenContainers,
        ]);
        if self.game_mode == GameMode::Creative {
            values.push(Ability::Instabuild);
        }
        if command_permission == CommandPermission::GameDirectors {
            values.push(Ability::OperatorCommands);
        }
        if self.abilities.flying || spectator {
            if spectator && !self.abilities.flying {
                // Spectators are locked into flight; tell the server too.
                self.abilities.flying = true;
                self.send_downstream(JavaServerbound::PlayerAbilities { flying: true });
            }
            values.push(Ability::Flying);
        }
        if spectator {
            values.push(Ability::NoClip);
        }

        self.send_upstream(BedrockClientbound::UpdateAbilities {
            unique_entity_id: self.player.geyser_id as i64,
            command_permission,
            player_permission,
            layers: vec![AbilityLayer {
                layer_type: AbilityLayerType::Base,
                abilities_set: USED_ABILITIES.to_vec(),
                ability_values: values,
                fly_speed: self.abilities.fly_speed,
                walk_speed: self.abilities.walk_speed,
            }],
        });
    }
}

/// Map a Java game mode to the Bedrock game type ordinal.
pub fn to_bedrock_game_type(mode: GameMode) -> i32 {
    match mode {
        GameMode::Survival => 0,
        GameMode::Creative => 1,
        GameMode::Adventure => 2,
        GameMode::Spectator => 6,
    }
}
