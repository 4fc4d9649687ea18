use crate::inventory::player;
use crate::session::{to_bedrock_game_type, Session};
use crate::teleport::TeleportCache;
use ferry_protocol::bedrock::{
    entity_event, CreditsStatus, GameRule, GameRuleValue, MoveMode, TeleportCause,
};
use ferry_protocol::java::{ClientCommand, GameEventKind};
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaClientbound, JavaServerbound};
use ferry_types::GameMode;
use tracing::debug;

/// What the credits screen is being opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterCredits {
    SeenBefore,
    FirstTime,
}

/// A game event with its float argument decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEventValue {
    NoRespawnBlockAvailable,
    StartRaining,
    StopRaining,
    ChangeGameMode(GameMode),
    WinGame(EnterCredits),
    Demo(f32),
    PlayArrowHitSound,
    RainLevel(f32),
    ThunderLevel(f32),
    PufferFishSting,
    GuardianElderEffect,
    ImmediateRespawn(bool),
    LimitedCrafting(bool),
    LevelChunksLoadStart,
}

impl GameEventValue {
    pub fn decode(kind: GameEventKind, value: f32) -> Option<Self> {
        Some(match kind {
            GameEventKind::NoRespawnBlockAvailable => GameEventValue::NoRespawnBlockAvailable,
            GameEventKind::StartRaining => GameEventValue::StartRaining,
            GameEventKind::StopRaining => GameEventValue::StopRaining,
            GameEventKind::ChangeGameMode => {
                GameEventValue::ChangeGameMode(GameMode::from_id(value as i32)?)
            }
            GameEventKind::WinGame => GameEventValue::WinGame(match value as i32 {
                0 => EnterCredits::SeenBefore,
                1 => EnterCredits::FirstTime,
                _ => return None,
            }),
            GameEventKind::DemoEvent => GameEventValue::Demo(value),
            GameEventKind::PlayArrowHitSound => GameEventValue::PlayArrowHitSound,
            GameEventKind::RainLevelChange => GameEventValue::RainLevel(value),
            GameEventKind::ThunderLevelChange => GameEventValue::ThunderLevel(value),
            GameEventKind::PufferFishSting => GameEventValue::PufferFishSting,
            GameEventKind::GuardianElderEffect => GameEventValue::GuardianElderEffect,
            GameEventKind::ImmediateRespawn => GameEventValue::ImmediateRespawn(value == 1.0),
            GameEventKind::LimitedCrafting => GameEventValue::LimitedCrafting(value == 1.0),
            GameEventKind::LevelChunksLoadStart => GameEventValue::LevelChunksLoadStart,
        })
    }
}

pub fn translate(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::GameEvent { event, value }) = packet else {
        return;
    };
    let Some(kind) = GameEventKind::from_id(*event) else {
        debug!("Unknown game event {}", event);
        return;
    };
    let Some(decoded) = GameEventValue::decode(kind, *value) else {
        debug!("Malformed {:?} value {}", kind, value);
        return;
    };
    handle(session, decoded);
}

pub fn handle(session: &mut Session, event: GameEventValue) {
    match event {
        // Java's "start raining" packet arrives before the rain level ramps
        // up from zero, and "stop raining" before it ramps down from one.
        GameEventValue::StartRaining => session.update_rain(0.0),
        GameEventValue::StopRaining => session.update_rain(1.0),
        GameEventValue::RainLevel(strength) => session.update_rain(strength),
        GameEventValue::ThunderLevel(strength) => session.update_thunder(strength),
        GameEventValue::ChangeGameMode(mode) => change_game_mode(session, mode),
        GameEventValue::WinGame(EnterCredits::SeenBefore) => {
            session.send_downstream(JavaServerbound::ClientCommand {
                action: ClientCommand::Respawn,
            });
        }
        GameEventValue::WinGame(EnterCredits::FirstTime) => {
            session.send_upstream(BedrockClientbound::ShowCredits {
                runtime_entity_id: session.player.geyser_id,
                status: CreditsStatus::StartCredits,
            });
        }
        GameEventValue::GuardianElderEffect => {
            session.send_upstream(BedrockClientbound::EntityEvent {
                runtime_entity_id: session.player.geyser_id,
                event_id: entity_event::ELDER_GUARDIAN_CURSE,
                data: 0,
            });
        }
        GameEventValue::ImmediateRespawn(enabled) => {
            session.send_upstream(BedrockClientbound::GameRulesChanged {
                rules: vec![GameRule {
                    name: "doimmediaterespawn".into(),
                    editable: true,
                    value: GameRuleValue::Bool(enabled),
                }],
            });
        }
        GameEventValue::NoRespawnBlockAvailable => {
            session.send_message(session.localized("block.minecraft.spawn.not_valid"));
        }
        GameEventValue::PlayArrowHitSound => {
            session.send_upstream(BedrockClientbound::PlaySound {
                sound_name: "random.orb".into(),
                position: session.player.bedrock_position(),
                volume: 0.5,
                pitch: 0.5,
            });
        }
        GameEventValue::Demo(_)
        | GameEventValue::PufferFishSting
        | GameEventValue::LimitedCrafting(_)
        | GameEventValue::LevelChunksLoadStart => {}
    }
}

fn change_game_mode(session: &mut Session, mode: GameMode) {
    session.game_mode = mode;
    session.send_upstream(BedrockClientbound::SetPlayerGameType {
        gamemode: to_bedrock_game_type(mode),
    });
    session.send_adventure_settings();

    if session.player.on_ground && mode == GameMode::Spectator {
        // Otherwise the client stays stuck on the ground unable to fly.
        let position = session.player.bedrock_position();
        let (pitch, yaw) = (session.player.pitch, session.player.yaw);
        session.send_upstream(BedrockClientbound::MovePlayer {
            runtime_entity_id: session.player.geyser_id,
            position,
            pitch,
            yaw,
            head_yaw: session.player.head_yaw,
            mode: MoveMode::Teleport,
            on_ground: false,
            ridden_runtime_entity_id: 0,
            teleport_cause: Some(TeleportCause::Unknown),
            tick: 0,
        });
        session
            .unconfirmed_teleports
            .push(TeleportCache::synthetic(position, pitch, yaw));
    }

    player::update_crafting_grid(session);
}
