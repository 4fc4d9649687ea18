//! Mount inventory sizing and the slot hints Bedrock needs to draw the
//! saddle, armor and carpet slots.

use crate::entity::{MountFamily, MountState};
use ferry_nbt::{nbt_compound, NbtValue};
use std::sync::LazyLock;
use tracing::debug;

const ACCEPTED_HORSE_ARMOR: [&str; 4] = [
    "minecraft:horsearmorleather",
    "minecraft:horsearmoriron",
    "minecraft:horsearmorgold",
    "minecraft:horsearmordiamond",
];

/// Slot 0: accepts a saddle.
pub static SADDLE_SLOT: LazyLock<NbtValue> =
    LazyLock::new(|| slot_hint(&["minecraft:saddle"], "minecraft:saddle", 0));

/// Slot 1 on horses: accepts any horse armor.
pub static ARMOR_SLOT: LazyLock<NbtValue> =
    LazyLock::new(|| slot_hint(&ACCEPTED_HORSE_ARMOR, "minecraft:horsearmoriron", 1));

/// Slot 1 on llamas: accepts a carpet.
pub static CARPET_SLOT: LazyLock<NbtValue> =
    LazyLock::new(|| slot_hint(&["minecraft:carpet"], "minecraft:carpet", 1));

fn hint_item(name: &str) -> NbtValue {
    nbt_compound! {
        "Aux" => NbtValue::Short(i16::MAX),
        "Name" => NbtValue::String(name.into()),
    }
}

fn slot_hint(accepted: &[&str], placeholder: &str, slot_number: i32) -> NbtValue {
    let accepted_items = accepted
        .iter()
        .map(|name| nbt_compound! { "slotItem" => hint_item(name) })
        .collect();
    nbt_compound! {
        "acceptedItems" => NbtValue::List(accepted_items),
        "item" => hint_item(placeholder),
        "slotNumber" => NbtValue::Int(slot_number),
    }
}

/// Wrap a set of slot hints in the `{slots: [...]}` root UpdateEquip expects.
pub fn hint_tree(hints: &[&NbtValue]) -> NbtValue {
    nbt_compound! {
        "slots" => NbtValue::List(hints.iter().map(|hint| (*hint).clone()).collect()),
    }
}

/// Slots in a mount's inventory: saddle and armor/carpet, plus the chest.
pub fn slot_count(mount: &MountState) -> usize {
    let mut size = 2;
    if mount.chested {
        if mount.family.is_llama() {
            let strength = mount.strength.clamp(1, 5);
            if strength != mount.strength {
                debug!("Llama strength {} out of range, using {}", mount.strength, strength);
            }
            size += 3 * strength as usize;
        } else if mount.family.is_chest_carrier() {
            size += 15;
        }
    }
    size
}

/// Which of the three mount layouts to use. Llamas are checked first, then
/// chest carriers, and everything else is laid out like a horse.
pub fn layout(family: MountFamily) -> MountLayout {
    if family.is_llama() {
        MountLayout::Llama
    } else if family.is_chest_carrier() {
        MountLayout::Donkey
    } else {
        MountLayout::Horse
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountLayout {
    /// Saddle and armor.
    Horse,
    /// Saddle and chest; slot 1 exists on Java only.
    Donkey,
    /// Carpet and chest; slot 0 exists on Java only.
    Llama,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(family: MountFamily, chested: bool, strength: i32) -> MountState {
        MountState {
            family,
            chested,
            saddled: false,
            strength,
        }
    }

    #[test]
    fn unchested_mounts_have_two_slots() {
        for family in [MountFamily::Horse, MountFamily::Donkey, MountFamily::Llama] {
            assert_eq!(slot_count(&mount(family, false, 5)), 2);
        }
    }

    #[test]
    fn chested_sizes() {
        assert_eq!(slot_count(&mount(MountFamily::Donkey, true, 0)), 17);
        assert_eq!(slot_count(&mount(MountFamily::Mule, true, 0)), 17);
        assert_eq!(slot_count(&mount(MountFamily::Camel, true, 0)), 17);
        assert_eq!(slot_count(&mount(MountFamily::Llama, true, 1)), 5);
        assert_eq!(slot_count(&mount(MountFamily::Llama, true, 3)), 11);
        assert_eq!(slot_count(&mount(MountFamily::TraderLlama, true, 5)), 17);
        // Horses never carry chests.
        assert_eq!(slot_count(&mount(MountFamily::Horse, true, 0)), 2);
    }

    #[test]
    fn llama_strength_is_clamped() {
        assert_eq!(slot_count(&mount(MountFamily::Llama, true, 0)), 5);
        assert_eq!(slot_count(&mount(MountFamily::Llama, true, 9)), 17);
    }

    #[test]
    fn layout_prefers_llama_then_chest_carrier() {
        assert_eq!(layout(MountFamily::TraderLlama), MountLayout::Llama);
        assert_eq!(layout(MountFamily::Mule), MountLayout::Donkey);
        assert_eq!(layout(MountFamily::Camel), MountLayout::Donkey);
        assert_eq!(layout(MountFamily::ZombieHorse), MountLayout::Horse);
    }

    #[test]
    fn armor_hint_has_expected_shape() {
        assert_eq!(ARMOR_SLOT.get("slotNumber").and_then(NbtValue::as_int), Some(1));
        let accepted = ARMOR_SLOT
            .get("acceptedItems")
            .and_then(NbtValue::as_list)
            .unwrap();
        let names: Vec<&str> = accepted
            .iter()
            .filter_map(|entry| entry.get("slotItem")?.get("Name")?.as_str())
            .collect();
        assert_eq!(names, ACCEPTED_HORSE_ARMOR);

        let placeholder = ARMOR_SLOT.get("item").unwrap();
        assert_eq!(
            placeholder.get("Name").and_then(NbtValue::as_str),
            Some("minecraft:horsearmoriron")
        );
        assert_eq!(
            placeholder.get("Aux").and_then(NbtValue::as_short),
            Some(i16::MAX)
        );
    }

    #[test]
    fn saddle_and_carpet_hints() {
        assert_eq!(SADDLE_SLOT.get("slotNumber").and_then(NbtValue::as_int), Some(0));
        assert_eq!(CARPET_SLOT.get("slotNumber").and_then(NbtValue::as_int), Some(1));
        assert_eq!(
            CARPET_SLOT
                .get("item")
                .and_then(|item| item.get("Name"))
                .and_then(NbtValue::as_str),
            Some("minecraft:carpet")
        );
    }

    #[test]
    fn hint_tree_wraps_slots() {
        let tree = hint_tree(&[&*SADDLE_SLOT, &*ARMOR_SLOT]);
        let slots = tree.get("slots").and_then(NbtValue::as_list).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], *SADDLE_SLOT);
    }
}
