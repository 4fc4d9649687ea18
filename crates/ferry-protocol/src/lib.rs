pub mod bedrock;
pub mod java;
pub mod packets;

pub use bedrock::{BedrockClientbound, BedrockItem, BedrockServerbound};
pub use java::{JavaClientbound, JavaServerbound};
pub use packets::*;
