use crate::session::Session;
use crate::teleport::TeleportCache;
use ferry_protocol::bedrock::{MoveMode, TeleportCause};
use ferry_protocol::java::relative_flags;
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaClientbound, JavaServerbound};
use ferry_types::Vec3d;
use tracing::debug;

/// Bedrock ignores teleports this close to where the player already is, so
/// they are acknowledged right away instead of waiting for a movement report.
const IGNORED_DISTANCE_SQUARED: f64 = 0.001;
const IGNORED_PITCH_DIFFERENCE: f32 = 5.0;

pub fn translate(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::SynchronizePlayerPosition {
        position,
        yaw,
        pitch,
        flags,
        teleport_id,
    }) = packet
    else {
        return;
    };

    let relative = |flag: u8, current: f64, value: f64| {
        if flags & flag != 0 {
            current + value
        } else {
            value
        }
    };
    let current = session.player.position;
    let target = Vec3d::new(
        relative(relative_flags::X, current.x, position.x),
        relative(relative_flags::Y, current.y, position.y),
        relative(relative_flags::Z, current.z, position.z),
    );
    let new_yaw = relative(relative_flags::Y_ROT, session.player.yaw as f64, *yaw as f64) as f32;
    let new_pitch =
        relative(relative_flags::X_ROT, session.player.pitch as f64, *pitch as f64) as f32;

    let last_position = session.player.bedrock_position();
    let last_pitch = session.player.pitch;

    session.player.position = target;
    session.player.yaw = new_yaw;
    session.player.head_yaw = new_yaw;
    session.player.pitch = new_pitch;
    let reported = session.player.bedrock_position();

    session.send_upstream(BedrockClientbound::MovePlayer {
        runtime_entity_id: session.player.geyser_id,
        position: reported,
        pitch: new_pitch,
        yaw: new_yaw,
        head_yaw: new_yaw,
        mode: MoveMode::Teleport,
        on_ground: session.player.on_ground,
        ridden_runtime_entity_id: 0,
        teleport_cause: Some(TeleportCause::Unknown),
        tick: 0,
    });

    let distance = last_position
        .to_vec3d()
        .distance_squared(&reported.to_vec3d());
    if distance < IGNORED_DISTANCE_SQUARED
        && (new_pitch - last_pitch).abs() < IGNORED_PITCH_DIFFERENCE
    {
        debug!("Teleport {} is a no-op for the client, accepting", teleport_id);
        session.send_downstream(JavaServerbound::AcceptTeleportation {
            teleport_id: *teleport_id,
        });
        return;
    }

    session.unconfirmed_teleports.push(TeleportCache::new(
        target,
        reported,
        new_pitch,
        new_yaw,
        *teleport_id,
    ));
}
