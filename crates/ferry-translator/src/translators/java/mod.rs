pub mod entity;
pub mod game_event;
pub mod inventory;
pub mod login;
pub mod player_position;
