mod item;
mod types;

pub use item::*;
pub use types::*;
