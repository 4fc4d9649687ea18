use crate::session::{BlockInteraction, Session};
use ferry_protocol::{BedrockServerbound, InboundPacket, JavaServerbound};
use ferry_types::Hand;

/// Remember which block the player used so a container opened in response
/// can be tied to it, then forward the click.
pub fn translate(session: &mut Session, packet: &InboundPacket) {
    let InboundPacket::Bedrock(BedrockServerbound::UseItemOn {
        block_position,
        face,
        click_position,
        block,
        ..
    }) = packet
    else {
        return;
    };

    session.last_interaction = Some(BlockInteraction {
        position: *block_position,
        block: block.clone(),
    });
    let sequence = session.next_block_sequence();
    session.send_downstream(JavaServerbound::UseItemOn {
        hand: Hand::Main,
        position: *block_position,
        face: (*face).clamp(0, 5) as u8,
        cursor: *click_position,
        inside_block: false,
        sequence,
    });
}
