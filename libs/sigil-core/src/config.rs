//! Registry configuration and export documents
//!
//! Worlds are populated from configuration at load time and exported in the
//! same shape for admin listings. The on-disk form is TOML; each binding
//! carries the operation token, the preserved start direction, and the
//! signature in its canonical string form.
//!
//! ```toml
//! [[bindings]]
//! op = "mod:add"
//! start_dir = "north_east"
//! angles = "aqaq"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SigilError};
use crate::hex::Direction;
use crate::registry::{BindPolicy, Binding, OpId, SigilRegistry};
use crate::sigil::Sigil;
use crate::signature::Signature;

/// One configured binding: operation, orientation, canonical signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingEntry {
    /// Operation token
    pub op: OpId,
    /// Start direction preserved from binding time
    pub start_dir: Direction,
    /// Canonical signature string
    pub angles: String,
}

/// A whole registry's bindings, as configured or exported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Bindings in registration order
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

impl RegistryConfig {
    /// Load a registry config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a registry config from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SigilError::Parse(e.to_string()))
    }

    /// Serialize the config to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SigilError::Parse(e.to_string()))
    }

    /// Snapshot a registry's bindings in enumeration order
    pub fn from_registry(registry: &SigilRegistry) -> Self {
        Self {
            bindings: registry
                .iter()
                .map(|(signature, binding)| BindingEntry {
                    op: binding.op.clone(),
                    start_dir: binding.start,
                    angles: signature.canonical(),
                })
                .collect(),
        }
    }
}

impl SigilRegistry {
    /// Build a registry from configured bindings
    ///
    /// Every signature is validated through the codec; an out-of-alphabet
    /// character fails the whole load.
    pub fn from_config(config: &RegistryConfig, policy: BindPolicy) -> Result<Self> {
        let mut registry = SigilRegistry::with_policy(policy);
        for entry in &config.bindings {
            let signature = Signature::parse(&entry.angles)?;
            registry.bind(signature, Binding::new(entry.op.clone(), entry.start_dir))?;
        }
        Ok(registry)
    }

    /// Export every binding as a scroll payload, reconstruction included
    pub fn scrolls(&self) -> Vec<ScrollPayload> {
        self.iter()
            .map(|(signature, binding)| ScrollPayload {
                op: binding.op.clone(),
                sigil: Sigil::new(binding.start, signature.clone()),
            })
            .collect()
    }
}

/// Exportable artifact carrying an operation token and its drawable sigil
///
/// This is the payload collaborators attach to in-game items; the core only
/// defines its shape and JSON round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollPayload {
    /// Operation token
    pub op: OpId,
    /// Reconstructed drawing
    pub sigil: Sigil,
}

impl ScrollPayload {
    /// Create a payload
    pub fn new(op: impl Into<OpId>, sigil: Sigil) -> Self {
        Self { op: op.into(), sigil }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SigilError::Parse(e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SigilError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegistryConfig {
        RegistryConfig {
            bindings: vec![
                BindingEntry {
                    op: OpId::new("mod:add"),
                    start_dir: Direction::NorthEast,
                    angles: "aqaq".to_string(),
                },
                BindingEntry {
                    op: OpId::new("mod:sub"),
                    start_dir: Direction::East,
                    angles: "wwq".to_string(),
                },
            ],
        }
    }

    #[test]
    fn toml_round_trip_preserves_bindings() {
        let config = sample();
        let toml = config.to_toml().unwrap();
        assert_eq!(RegistryConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn from_file_loads_a_config_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overworld.toml");
        std::fs::write(&path, sample().to_toml().unwrap()).unwrap();

        let config = RegistryConfig::from_file(&path).unwrap();
        assert_eq!(config, sample());
        assert!(RegistryConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn registry_round_trips_through_config() {
        let registry = SigilRegistry::from_config(&sample(), BindPolicy::default()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.binding(&Signature::parse("aqaq").unwrap()).map(|b| b.op.clone()),
            Some(OpId::new("mod:add"))
        );
        assert_eq!(RegistryConfig::from_registry(&registry), sample());
    }

    #[test]
    fn bad_signature_fails_the_whole_load() {
        let mut config = sample();
        config.bindings[1].angles = "wwx".to_string();
        let err = SigilRegistry::from_config(&config, BindPolicy::default()).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = RegistryConfig::from_toml("bindings = 3").unwrap_err();
        assert!(matches!(err, SigilError::Parse(_)));
    }

    #[test]
    fn scroll_export_reconstructs_every_sigil() {
        let registry = SigilRegistry::from_config(&sample(), BindPolicy::default()).unwrap();
        let scrolls = registry.scrolls();
        assert_eq!(scrolls.len(), 2);
        assert_eq!(scrolls[0].op, OpId::new("mod:add"));
        assert_eq!(scrolls[0].sigil.start, Direction::NorthEast);
        assert_eq!(scrolls[0].sigil.turns.canonical(), "aqaq");
    }

    #[test]
    fn scroll_payload_json_round_trips() {
        let payload = ScrollPayload::new(
            "mod:add",
            Sigil::new(Direction::NorthEast, Signature::parse("aqaq").unwrap()),
        );
        let json = payload.to_json().unwrap();
        assert_eq!(ScrollPayload::from_json(&json).unwrap(), payload);
        assert!(ScrollPayload::from_json("{").is_err());
    }
}
