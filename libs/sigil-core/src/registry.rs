//! Per-world sigil registries
//!
//! Each loaded world owns one [`SigilRegistry`]: a bidirectional index
//! between angle signatures and the operations bound to them. Signatures are
//! stored orientation-relative; the orientation a sigil was bound with is
//! kept in its [`Binding`] so the original drawing can be reconstructed.
//!
//! Forward lookup is a map hit. Reverse lookup scans bindings in insertion
//! order; registries hold at most a few hundred entries and no secondary
//! index is kept.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::error::{Result, SigilError};
use crate::hex::Direction;
use crate::sigil::Sigil;
use crate::signature::Signature;

/// Opaque namespaced token naming the operation a sigil triggers
///
/// The core never interprets the token; collaborators own its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpId(String);

impl OpId {
    /// Wrap an operation token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OpId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OpId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a world/level owning a registry instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(String);

impl WorldId {
    /// Wrap a world token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a signature is bound to: the operation and the orientation the
/// sigil was originally drawn with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Operation the sigil triggers
    pub op: OpId,
    /// Starting direction preserved from binding time
    pub start: Direction,
}

impl Binding {
    /// Create a binding
    pub fn new(op: impl Into<OpId>, start: Direction) -> Self {
        Self { op: op.into(), start }
    }
}

/// How `bind` treats an operation id that another signature already maps to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindPolicy {
    /// Refuse to bind a second signature to an already-bound operation, so
    /// reverse lookup is unambiguous
    #[default]
    RejectDuplicateOp,
    /// No write-time check; reverse lookup returns the first binding in
    /// insertion order
    FirstMatchWins,
}

/// One world's signature-to-operation index
///
/// Enumeration and reverse lookup walk bindings in insertion order, which is
/// stable across calls for identical registry state. Re-binding a signature
/// overwrites its binding but keeps its original position.
#[derive(Debug, Default)]
pub struct SigilRegistry {
    entries: HashMap<Signature, Binding>,
    order: Vec<Signature>,
    policy: BindPolicy,
}

impl SigilRegistry {
    /// Create an empty registry with the default bind policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with an explicit bind policy
    pub fn with_policy(policy: BindPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The policy this registry was created with
    pub fn policy(&self) -> BindPolicy {
        self.policy
    }

    /// Bind a signature to an operation, overwriting any binding the
    /// signature already had (last write wins)
    ///
    /// Under [`BindPolicy::RejectDuplicateOp`], binding an operation that a
    /// *different* signature already maps to fails with
    /// [`SigilError::DuplicateOp`]; overwriting the same signature is always
    /// allowed.
    pub fn bind(&mut self, signature: Signature, binding: Binding) -> Result<()> {
        if self.policy == BindPolicy::RejectDuplicateOp {
            if let Some((bound_sig, _)) = self.find_op(&binding.op) {
                if *bound_sig != signature {
                    return Err(SigilError::DuplicateOp(binding.op));
                }
            }
        }

        debug!("Bound {} to signature '{}'", binding.op, signature);
        if self.entries.insert(signature.clone(), binding).is_none() {
            self.order.push(signature);
        }
        Ok(())
    }

    /// Forward lookup: the binding registered for a signature
    pub fn binding(&self, signature: &Signature) -> Option<&Binding> {
        self.entries.get(signature)
    }

    /// Reverse lookup: the first binding for this operation in insertion
    /// order, together with its signature
    pub fn find_op(&self, op: &OpId) -> Option<(&Signature, &Binding)> {
        self.iter().find(|(_, binding)| binding.op == *op)
    }

    /// Reverse lookup reconstructed into a drawable sigil
    pub fn sigil_for(&self, op: &OpId) -> Option<Sigil> {
        self.find_op(op)
            .map(|(signature, binding)| Sigil::new(binding.start, signature.clone()))
    }

    /// Every binding in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &Binding)> {
        self.order
            .iter()
            .filter_map(|signature| self.entries.get(signature).map(|b| (signature, b)))
    }

    /// Count of distinct registered signatures
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no signature is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle to one world's registry
pub type RegistryHandle = Arc<RwLock<SigilRegistry>>;

/// Process-wide table of loaded worlds
///
/// A world is either unloaded (no instance, lookups fail loudly) or loaded
/// (instance exists, all operations defined). Handles are `Arc<RwLock<_>>`
/// so a reader holding the guard observes a consistent snapshot while
/// enumerating.
#[derive(Debug, Default)]
pub struct WorldRegistries {
    worlds: DashMap<WorldId, RegistryHandle>,
}

impl WorldRegistries {
    /// Create an empty world table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a world with a pre-populated registry, replacing any instance
    /// already loaded under the id
    pub fn load(&self, id: WorldId, registry: SigilRegistry) -> RegistryHandle {
        info!("World {} loaded: {} sigils bound", id, registry.len());
        let handle = Arc::new(RwLock::new(registry));
        self.worlds.insert(id, handle.clone());
        handle
    }

    /// Obtain the per-world instance, creating an empty one on first access
    pub fn open(&self, id: &WorldId) -> RegistryHandle {
        self.worlds
            .entry(id.clone())
            .or_insert_with(|| {
                info!("World {} loaded: 0 sigils bound", id);
                Arc::new(RwLock::new(SigilRegistry::new()))
            })
            .value()
            .clone()
    }

    /// The registry of a loaded world
    ///
    /// Fails with [`SigilError::WorldUnloaded`] when no instance exists;
    /// callers are expected to have loaded the world first.
    pub fn world(&self, id: &WorldId) -> Result<RegistryHandle> {
        self.worlds
            .get(id)
            .map(|handle| handle.value().clone())
            .ok_or_else(|| SigilError::WorldUnloaded(id.clone()))
    }

    /// Whether a registry instance exists for the world
    pub fn is_loaded(&self, id: &WorldId) -> bool {
        self.worlds.contains_key(id)
    }

    /// Discard a world's registry irrecoverably. Returns whether an
    /// instance existed.
    pub fn unload(&self, id: &WorldId) -> bool {
        let removed = self.worlds.remove(id);
        if let Some((id, handle)) = &removed {
            let count = handle
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len();
            info!("World {} unloaded, {} sigils discarded", id, count);
        }
        removed.is_some()
    }

    /// Number of loaded worlds
    pub fn loaded_count(&self) -> usize {
        self.worlds.len()
    }
}
