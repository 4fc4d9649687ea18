//! Java item stacks to Bedrock items.

use crate::session::Session;
use ferry_data::Catalog;
use ferry_protocol::BedrockItem;
use ferry_types::{ItemComponents, ItemStack, Rarity};
use tracing::debug;

const RESET: &str = "§r";
const ESCAPE: char = '§';

pub fn translate_to_bedrock(session: &Session, stack: Option<&ItemStack>) -> BedrockItem {
    let Some(stack) = stack.filter(|stack| stack.count > 0) else {
        return BedrockItem::air();
    };
    let Some(mapping) = session.catalog().java_item(stack.item_id) else {
        debug!("No Bedrock mapping for Java item {}", stack.item_id);
        return BedrockItem::air();
    };

    let mut item = BedrockItem {
        identifier: mapping.bedrock_identifier.to_string(),
        damage: mapping.bedrock_damage,
        count: stack.count as u8,
        custom_name: stack
            .components
            .custom_name
            .as_ref()
            .map(|name| format!("{RESET}{}", name.to_plain_string())),
    };

    if mapping.java_identifier == "minecraft:player_head" {
        if let Some(name) = player_head_name(
            session.catalog(),
            session.locale(),
            &stack.components,
            stack.rarity(),
        ) {
            item.custom_name = Some(name);
        }
    }
    item
}

/// The display name a player head gets from its profile, or `None` when it
/// has no profile component.
pub fn player_head_name(
    catalog: &dyn Catalog,
    locale: &str,
    components: &ItemComponents,
    rarity: Rarity,
) -> Option<String> {
    let profile = components.profile.as_ref()?;
    let text = match &profile.name {
        Some(name) => catalog
            .localized_string("block.minecraft.player_head.named", locale)
            .replace("%s", name),
        None => catalog.localized_string("block.minecraft.player_head", locale),
    };
    Some(format!(
        "{RESET}{ESCAPE}{}{text}",
        catalog.item_rarity_color(rarity)
    ))
}
