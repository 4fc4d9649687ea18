//! One module per packet type. Every handler has the [`crate::Handler`]
//! signature and ignores packets of other kinds.

pub mod bedrock;
pub mod java;
