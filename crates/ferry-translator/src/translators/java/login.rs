use crate::inventory::player;
use crate::session::{to_bedrock_game_type, Session};
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaClientbound};
use tracing::info;

pub fn translate(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Java(JavaClientbound::Login {
        entity_id,
        game_mode,
        ..
    }) = packet
    else {
        return;
    };

    info!(
        "Joined as entity {} in {:?} (Bedrock id {})",
        entity_id, game_mode, session.player.geyser_id
    );
    session.player.java_id = *entity_id;
    session.game_mode = *game_mode;

    session.send_upstream(BedrockClientbound::SetPlayerGameType {
        gamemode: to_bedrock_game_type(*game_mode),
    });
    session.send_adventure_settings();
    player::update_crafting_grid(session);
}
