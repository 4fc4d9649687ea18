pub mod entity;
pub mod inventory;
pub mod item;
pub mod registry;
pub mod session;
pub mod teleport;
pub mod translators;

#[cfg(test)]
pub(crate) mod test_util;

pub use registry::{DispatchError, Handler, RegistryError, TranslatorRegistry};
pub use session::{Session, SessionSettings};
pub use teleport::{TeleportCache, TeleportQueue};
