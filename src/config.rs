//! Operator Configuration
//!
//! The declared desired state: which HORCM instance to administer through
//! and which LDEV blocks should exist. Loaded from YAML and validated once
//! at the boundary, before any external invocation.

use crate::domain::block::Block;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_tiered_pools() -> Vec<u32> {
    vec![15, 16]
}

// =============================================================================
// Block Spec
// =============================================================================

/// Raw declaration of one LDEV block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Base name; members are named `<name>_01`, `<name>_02`, ...
    pub name: String,
    /// First identifier of the span, e.g. `"15:60"`
    pub begin: String,
    /// Last identifier of the span, e.g. `"15:6F"`
    pub end: String,
    /// Capacity of each member in GB
    pub size_gb: u64,
    /// Pool to allocate from
    pub pool: u32,
    /// Ports to share through
    pub ports: Vec<String>,
    /// Chassis to share to
    pub chassis: Vec<String>,
}

impl BlockSpec {
    /// Validate and convert into a domain block.
    pub fn to_block(&self) -> Result<Block> {
        if self.ports.is_empty() {
            return Err(Error::Configuration(format!(
                "block {}: ports must not be empty",
                self.name
            )));
        }
        if self.chassis.is_empty() {
            return Err(Error::Configuration(format!(
                "block {}: chassis must not be empty",
                self.name
            )));
        }
        Block::new(
            self.name.clone(),
            &self.begin,
            &self.end,
            self.size_gb,
            self.pool,
            self.ports.clone(),
            self.chassis.clone(),
        )
    }
}

// =============================================================================
// Operator Config
// =============================================================================

/// Full declared configuration for one provisioning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// HORCM instance number the session is keyed by
    pub instance: u16,
    /// Administration binary path override
    #[serde(default)]
    pub raidcom_path: Option<PathBuf>,
    /// Pools requiring tier-reallocation tuning on new LDEVs
    #[serde(default = "default_tiered_pools")]
    pub tiered_pools: Vec<u32>,
    /// Blocks that should exist
    pub blocks: Vec<BlockSpec>,
}

impl OperatorConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: OperatorConfig = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject structurally broken declarations before anything runs.
    pub fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() {
            return Err(Error::Configuration("no blocks declared".into()));
        }
        for spec in &self.blocks {
            spec.to_block()?;
        }
        Ok(())
    }

    /// Validated domain blocks in declaration order.
    pub fn to_blocks(&self) -> Result<Vec<Block>> {
        self.blocks.iter().map(BlockSpec::to_block).collect()
    }
}
