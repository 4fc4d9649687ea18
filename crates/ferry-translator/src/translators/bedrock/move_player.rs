use crate::session::{Session, PLAYER_EYE_HEIGHT};
use crate::teleport::{Reconciliation, TeleportCache};
use ferry_protocol::bedrock::{MoveMode, TeleportCause};
use ferry_protocol::{BedrockClientbound, BedrockServerbound, InboundPacket, JavaServerbound};
use tracing::debug;

pub fn translate(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Bedrock(BedrockServerbound::MovePlayer {
        runtime_entity_id,
        position,
        pitch,
        yaw,
        head_yaw,
        on_ground,
        ..
    }) = packet
    else {
        return;
    };
    if *runtime_entity_id != session.player.geyser_id {
        debug!("Movement for entity {} that is not the player", runtime_entity_id);
        return;
    }

    match session.unconfirmed_teleports.reconcile(*position) {
        Reconciliation::Confirmed { cache, superseded } => {
            if superseded > 0 {
                debug!("Teleport {} superseded {} older ones", cache.confirm_id, superseded);
            }
            if let Some(target) = cache.authoritative_position {
                session.send_downstream(JavaServerbound::AcceptTeleportation {
                    teleport_id: cache.confirm_id,
                });
                session.player.position = target;
                session.player.yaw = cache.yaw;
                session.player.pitch = cache.pitch;
                session.player.head_yaw = *head_yaw;
                session.player.on_ground = *on_ground;
                session.send_downstream(JavaServerbound::MovePlayerPosRot {
                    position: target,
                    yaw: cache.yaw,
                    pitch: cache.pitch,
                    on_ground: *on_ground,
                });
                return;
            }
        }
        Reconciliation::Pending {
            resend: Some(cache),
        } => {
            debug!("Client ignored teleport {}, sending it again", cache.confirm_id);
            resend_teleport(session, &cache);
        }
        Reconciliation::Pending { resend: None } | Reconciliation::Idle => {}
    }

    // Ordinary movement: report it at feet level.
    let java_position = position.down(PLAYER_EYE_HEIGHT).to_vec3d();
    let moved = java_position != session.player.position;
    let rotated = *yaw != session.player.yaw || *pitch != session.player.pitch;

    session.player.position = java_position;
    session.player.yaw = *yaw;
    session.player.pitch = *pitch;
    session.player.head_yaw = *head_yaw;
    session.player.on_ground = *on_ground;

    let on_ground = *on_ground;
    let report = match (moved, rotated) {
        (true, true) => JavaServerbound::MovePlayerPosRot {
            position: java_position,
            yaw: *yaw,
            pitch: *pitch,
            on_ground,
        },
        (false, true) => JavaServerbound::MovePlayerRot {
            yaw: *yaw,
            pitch: *pitch,
            on_ground,
        },
        _ => JavaServerbound::MovePlayerPos {
            position: java_position,
            on_ground,
        },
    };
    session.send_downstream(report);
}

fn resend_teleport(session: &Session, cache: &TeleportCache) {
    session.send_upstream(BedrockClientbound::MovePlayer {
        runtime_entity_id: session.player.geyser_id,
        position: cache.reported_position,
        pitch: cache.pitch,
        yaw: cache.yaw,
        head_yaw: cache.yaw,
        mode: MoveMode::Teleport,
        on_ground: session.player.on_ground,
        ridden_runtime_entity_id: 0,
        teleport_cause: Some(TeleportCause::Unknown),
        tick: 0,
    });
}
