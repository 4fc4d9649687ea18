use crate::inventory::close_inventory;
use crate::session::Session;
use ferry_protocol::{BedrockServerbound, InboundPacket, JavaServerbound};

/// The client closed a screen. The player's own inventory (window 0) is never
/// tracked as open but the server still expects the close.
pub fn translate_close(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Bedrock(BedrockServerbound::ContainerClose { window_id, .. }) = packet
    else {
        return;
    };
    let container_id = *window_id as i32;
    if container_id != 0 {
        close_inventory(session, container_id);
    }
    session.send_downstream(JavaServerbound::ContainerClose { container_id });
}
