use ferry_types::{Identifier, Vec3d};
use hecs::{Entity, World};
use std::collections::HashMap;

// Components stored per tracked entity.

pub struct JavaId(pub i32);

pub struct GeyserId(pub u64);

pub struct Position(pub Vec3d);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
}

pub struct EntityKind(pub Identifier);

pub struct Nametag(pub String);

/// Present only on horse-family entities.
pub struct Mount(pub MountState);

/// The rideable animals with a horse-style inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountFamily {
    Horse,
    SkeletonHorse,
    ZombieHorse,
    Donkey,
    Mule,
    Camel,
    Llama,
    TraderLlama,
}

impl MountFamily {
    pub fn from_identifier(identifier: &Identifier) -> Option<Self> {
        if identifier.namespace != "minecraft" {
            return None;
        }
        Some(match identifier.path.as_str() {
            "horse" => MountFamily::Horse,
            "skeleton_horse" => MountFamily::SkeletonHorse,
            "zombie_horse" => MountFamily::ZombieHorse,
            "donkey" => MountFamily::Donkey,
            "mule" => MountFamily::Mule,
            "camel" => MountFamily::Camel,
            "llama" => MountFamily::Llama,
            "trader_llama" => MountFamily::TraderLlama,
            _ => return None,
        })
    }

    pub fn is_llama(self) -> bool {
        matches!(self, MountFamily::Llama | MountFamily::TraderLlama)
    }

    /// Mounts whose extra inventory comes from a chest (or, for camels, is
    /// sized like one).
    pub fn is_chest_carrier(self) -> bool {
        matches!(
            self,
            MountFamily::Donkey | MountFamily::Mule | MountFamily::Camel
        )
    }

    /// Families whose metadata index 18 is the chest flag. On camels the same
    /// index means dashing.
    pub fn has_chest_metadata(self) -> bool {
        matches!(
            self,
            MountFamily::Donkey
                | MountFamily::Mule
                | MountFamily::Llama
                | MountFamily::TraderLlama
        )
    }

    /// Only real horses take armor in the second slot.
    pub fn accepts_armor(self) -> bool {
        self == MountFamily::Horse
    }
}

/// Inventory-relevant state of a mount, fed by entity metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountState {
    pub family: MountFamily,
    pub chested: bool,
    pub saddled: bool,
    /// Llama strength; ignored for other families.
    pub strength: i32,
}

impl MountState {
    pub fn new(family: MountFamily) -> Self {
        Self {
            family,
            chested: false,
            saddled: false,
            strength: 0,
        }
    }
}

/// A read-only view of one tracked entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub java_id: i32,
    pub geyser_id: u64,
    pub kind: Identifier,
    pub position: Vec3d,
    pub rotation: Rotation,
    pub nametag: Option<String>,
    pub mount: Option<MountState>,
}

/// Entities the Java server has spawned for this session, keyed by their Java
/// id. Each one gets a Bedrock-side id from a per-session counter.
pub struct EntityCache {
    world: World,
    by_java_id: HashMap<i32, Entity>,
    next_geyser_id: u64,
}

impl Default for EntityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCache {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            by_java_id: HashMap::new(),
            next_geyser_id: 1,
        }
    }

    pub fn allocate_geyser_id(&mut self) -> u64 {
        let id = self.next_geyser_id;
        self.next_geyser_id += 1;
        id
    }

    /// Track a new entity and return its Bedrock id. A second spawn with the
    /// same Java id replaces the first.
    pub fn spawn(
        &mut self,
        java_id: i32,
        kind: Identifier,
        position: Vec3d,
        rotation: Rotation,
    ) -> u64 {
        if let Some(old) = self.by_java_id.remove(&java_id) {
            let _ = self.world.despawn(old);
        }
        let geyser_id = self.allocate_geyser_id();
        let mount = MountFamily::from_identifier(&kind);
        let entity = self.world.spawn((
            JavaId(java_id),
            GeyserId(geyser_id),
            EntityKind(kind),
            Position(position),
            rotation,
        ));
        if let Some(family) = mount {
            let _ = self.world.insert_one(entity, Mount(MountState::new(family)));
        }
        self.by_java_id.insert(java_id, entity);
        geyser_id
    }

    /// Stop tracking an entity, returning the Bedrock id it had.
    pub fn remove(&mut self, java_id: i32) -> Option<u64> {
        let entity = self.by_java_id.remove(&java_id)?;
        let geyser_id = self.world.get::<&GeyserId>(entity).ok().map(|id| id.0);
        let _ = self.world.despawn(entity);
        geyser_id
    }

    pub fn contains(&self, java_id: i32) -> bool {
        self.by_java_id.contains_key(&java_id)
    }

    pub fn len(&self) -> usize {
        self.by_java_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_java_id.is_empty()
    }

    pub fn geyser_id(&self, java_id: i32) -> Option<u64> {
        let entity = *self.by_java_id.get(&java_id)?;
        self.world.get::<&GeyserId>(entity).ok().map(|id| id.0)
    }

    pub fn get(&self, java_id: i32) -> Option<EntitySnapshot> {
        let entity = *self.by_java_id.get(&java_id)?;
        let java_id = self.world.get::<&JavaId>(entity).ok()?.0;
        let geyser_id = self.world.get::<&GeyserId>(entity).ok()?.0;
        let kind = self.world.get::<&EntityKind>(entity).ok()?.0.clone();
        let position = self.world.get::<&Position>(entity).ok()?.0;
        let rotation = *self.world.get::<&Rotation>(entity).ok()?;
        let nametag = self
            .world
            .get::<&Nametag>(entity)
            .ok()
            .map(|tag| tag.0.clone());
        Some(EntitySnapshot {
            java_id,
            geyser_id,
            kind,
            position,
            rotation,
            nametag,
            mount: self.mount(java_id),
        })
    }

    pub fn mount(&self, java_id: i32) -> Option<MountState> {
        let entity = *self.by_java_id.get(&java_id)?;
        self.world.get::<&Mount>(entity).ok().map(|mount| mount.0)
    }

    /// Apply `update` to a mount's state. Returns the new state, or `None` if
    /// the entity is unknown or not a mount.
    pub fn update_mount(
        &mut self,
        java_id: i32,
        update: impl FnOnce(&mut MountState),
    ) -> Option<MountState> {
        let entity = *self.by_java_id.get(&java_id)?;
        let mut mount = self.world.get::<&mut Mount>(entity).ok()?;
        update(&mut mount.0);
        Some(mount.0)
    }

    pub fn set_nametag(&mut self, java_id: i32, nametag: Option<String>) {
        let Some(&entity) = self.by_java_id.get(&java_id) else {
            return;
        };
        match nametag {
            Some(name) => {
                let _ = self.world.insert_one(entity, Nametag(name));
            }
            None => {
                let _ = self.world.remove_one::<Nametag>(entity);
            }
        }
    }
}
