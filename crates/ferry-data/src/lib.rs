use ferry_types::Rarity;

/// Which container screen a placed block opens, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContainer {
    Chest,
    Barrel,
    ShulkerBox,
    /// Dispensers and droppers share the 3x3 screen.
    Generic3x3,
}

/// Semantic properties of a block, looked up by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub identifier: &'static str,
    pub container: Option<BlockContainer>,
}

impl BlockDescriptor {
    pub fn is(&self, identifier: &str) -> bool {
        self.identifier == identifier
    }
}

/// How a Java item is represented on Bedrock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDescriptor {
    pub java_identifier: &'static str,
    pub bedrock_identifier: &'static str,
    pub bedrock_damage: i16,
}

/// Read-only lookups the translators consume. Implementations must be
/// side-effect free; one instance is shared by every connection.
pub trait Catalog: Send + Sync {
    /// Translate a Java language key. Unknown keys come back unchanged.
    fn localized_string(&self, key: &str, locale: &str) -> String;

    fn block_by_identifier(&self, identifier: &str) -> Option<BlockDescriptor>;

    /// Legacy formatting code (the character after `§`) for a rarity.
    fn item_rarity_color(&self, rarity: Rarity) -> char;

    fn java_item(&self, item_id: i32) -> Option<ItemDescriptor>;
}

pub const DEFAULT_LOCALE: &str = "en_us";

/// A small built-in subset of the registries and language files, enough to
/// run the proxy without external data.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl Catalog for BuiltinCatalog {
    fn localized_string(&self, key: &str, locale: &str) -> String {
        let locale = locale.to_ascii_lowercase();
        if let Some(text) = lang_entry(&locale, key) {
            return text.to_string();
        }
        if locale != DEFAULT_LOCALE {
            if let Some(text) = lang_entry(DEFAULT_LOCALE, key) {
                return text.to_string();
            }
        }
        tracing::debug!("Missing language key {} for locale {}", key, locale);
        key.to_string()
    }

    fn block_by_identifier(&self, identifier: &str) -> Option<BlockDescriptor> {
        let path = identifier.strip_prefix("minecraft:").unwrap_or(identifier);
        let (identifier, container) = match path {
            "chest" => ("minecraft:chest", Some(BlockContainer::Chest)),
            "trapped_chest" => ("minecraft:trapped_chest", Some(BlockContainer::Chest)),
            "ender_chest" => ("minecraft:ender_chest", Some(BlockContainer::Chest)),
            "barrel" => ("minecraft:barrel", Some(BlockContainer::Barrel)),
            "shulker_box" => ("minecraft:shulker_box", Some(BlockContainer::ShulkerBox)),
            "dispenser" => ("minecraft:dispenser", Some(BlockContainer::Generic3x3)),
            "dropper" => ("minecraft:dropper", Some(BlockContainer::Generic3x3)),
            "air" => ("minecraft:air", None),
            "stone" => ("minecraft:stone", None),
            "dirt" => ("minecraft:dirt", None),
            "grass_block" => ("minecraft:grass_block", None),
            "crafting_table" => ("minecraft:crafting_table", None),
            _ => return None,
        };
        Some(BlockDescriptor {
            identifier,
            container,
        })
    }

    fn item_rarity_color(&self, rarity: Rarity) -> char {
        match rarity {
            Rarity::Common => 'f',
            Rarity::Uncommon => 'e',
            Rarity::Rare => 'b',
            Rarity::Epic => 'd',
        }
    }

    fn java_item(&self, item_id: i32) -> Option<ItemDescriptor> {
        let (java_identifier, bedrock_identifier, bedrock_damage) = match item_id {
            0 => ("minecraft:air", "minecraft:air", 0),
            1 => ("minecraft:stone", "minecraft:stone", 0),
            27 => ("minecraft:dirt", "minecraft:dirt", 0),
            313 => ("minecraft:chest", "minecraft:chest", 0),
            445 => ("minecraft:white_carpet", "minecraft:white_carpet", 0),
            460 => ("minecraft:barrier", "minecraft:barrier", 0),
            809 => ("minecraft:diamond", "minecraft:diamond", 0),
            836 => ("minecraft:saddle", "minecraft:saddle", 0),
            1081 => ("minecraft:leather_horse_armor", "minecraft:horsearmorleather", 0),
            1082 => ("minecraft:iron_horse_armor", "minecraft:horsearmoriron", 0),
            1083 => ("minecraft:golden_horse_armor", "minecraft:horsearmorgold", 0),
            1084 => ("minecraft:diamond_horse_armor", "minecraft:horsearmordiamond", 0),
            1097 => ("minecraft:player_head", "minecraft:skull", 3),
            _ => return None,
        };
        Some(ItemDescriptor {
            java_identifier,
            bedrock_identifier,
            bedrock_damage,
        })
    }
}

fn lang_entry(locale: &str, key: &str) -> Option<&'static str> {
    match (locale, key) {
        ("en_us", "block.minecraft.player_head") => Some("Player Head"),
        ("en_us", "block.minecraft.player_head.named") => Some("%s's Head"),
        ("en_us", "block.minecraft.spawn.not_valid") => {
            Some("You have no home bed or charged respawn anchor, or it was obstructed")
        }
        ("en_us", "container.crafting.unusable") => Some("Unusable crafting space"),
        ("de_de", "block.minecraft.player_head") => Some("Spielerkopf"),
        ("de_de", "block.minecraft.player_head.named") => Some("Kopf von %s"),
        ("de_de", "block.minecraft.spawn.not_valid") => Some(
            "Du hast kein Bett und keinen aufgeladenen Seelenanker, oder der Zugang ist blockiert",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_string_falls_back_to_english_then_key() {
        let catalog = BuiltinCatalog;
        assert_eq!(
            catalog.localized_string("block.minecraft.player_head", "de_DE"),
            "Spielerkopf"
        );
        assert_eq!(
            catalog.localized_string("container.crafting.unusable", "de_de"),
            "Unusable crafting space"
        );
        assert_eq!(catalog.localized_string("no.such.key", "en_us"), "no.such.key");
    }

    #[test]
    fn block_lookup_accepts_bare_paths() {
        let catalog = BuiltinCatalog;
        let dropper = catalog.block_by_identifier("dropper").unwrap();
        assert!(dropper.is("minecraft:dropper"));
        assert_eq!(dropper.container, Some(BlockContainer::Generic3x3));
        assert!(catalog.block_by_identifier("minecraft:unobtainium").is_none());
    }

    #[test]
    fn rarity_colors() {
        let catalog = BuiltinCatalog;
        assert_eq!(catalog.item_rarity_color(Rarity::Common), 'f');
        assert_eq!(catalog.item_rarity_color(Rarity::Epic), 'd');
    }

    #[test]
    fn player_head_maps_to_skull() {
        let head = BuiltinCatalog.java_item(1097).unwrap();
        assert_eq!(head.bedrock_identifier, "minecraft:skull");
        assert_eq!(head.bedrock_damage, 3);
    }
}
