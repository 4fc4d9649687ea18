pub mod inventory;
pub mod move_player;
pub mod use_item;
