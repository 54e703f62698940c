// Thin re-export module: implementation is split across `blockchain/chain.rs`
// (block structures and the append path) and `blockchain/verify.rs`
// (integrity verification).

pub mod chain;
pub mod verify;

pub use chain::*;
