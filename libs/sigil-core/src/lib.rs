//! # Sigil Core
//!
//! Shared types for binding drawn sigils to operations.
//!
//! A sigil is a stroke on a hexagonal grid: a starting direction plus the
//! relative turns taken at each step. The turn sequence canonicalizes to a
//! string signature that is independent of the orientation the stroke was
//! drawn in; per-world registries map those signatures to opaque operation
//! tokens and back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              ADMIN / GAME COLLABORATORS                  │
//! │  list, resolve and export bindings; spawn scroll items  │
//! └──────────────────────────┬──────────────────────────────┘
//! │                          │ registry contract
//! ┌──────────────────────────┴──────────────────────────────┐
//! │                    WORLD REGISTRIES                      │
//! │  ┌─────────────────┐  ┌─────────────────┐              │
//! │  │  SigilRegistry  │  │  SigilRegistry  │  (per world) │
//! │  │  sig → binding  │  │  sig → binding  │              │
//! │  └────────┬────────┘  └────────┬────────┘              │
//! │           └────────────────────┘                        │
//! │                        │                                │
//! │              ┌─────────┴─────────┐                      │
//! │              │  Signature codec  │                      │
//! │              │  + hex geometry   │                      │
//! │              └───────────────────┘                      │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod hex;
mod signature;
mod sigil;
mod registry;
mod config;
mod scramble;
mod error;

pub use hex::*;
pub use signature::*;
pub use sigil::*;
pub use registry::*;
pub use config::*;
pub use scramble::*;
pub use error::*;

/// Re-export common types
pub mod prelude {
    pub use crate::config::{BindingEntry, RegistryConfig, ScrollPayload};
    pub use crate::error::{Result, SigilError};
    pub use crate::hex::{Coord, Direction, Turn};
    pub use crate::registry::{
        BindPolicy, Binding, OpId, RegistryHandle, SigilRegistry, WorldId, WorldRegistries,
    };
    pub use crate::scramble::alternate_drawing;
    pub use crate::sigil::Sigil;
    pub use crate::signature::Signature;
}
