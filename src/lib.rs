//! Tilefall (workspace facade crate).
//!
//! Exposes `tilefall::{core,types}` while the implementation lives in the
//! dedicated crates under `crates/`.

pub use tilefall_core as core;
pub use tilefall_types as types;
