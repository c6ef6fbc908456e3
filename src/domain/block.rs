//! LDEV Blocks
//!
//! A block is a declared, contiguous span of LDEVs created from one pool
//! and shared through a set of ports to a set of chassis. Blocks are
//! validated once at construction and immutable afterwards.

use crate::domain::ldev::{expand_range, LdevId};
use crate::error::{Error, Result};
use std::fmt;

// =============================================================================
// Block
// =============================================================================

/// A validated block of LDEVs to provision
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    ldevs: Vec<LdevId>,
    size_gb: u64,
    pool: u32,
    ports: Vec<String>,
    chassis: Vec<String>,
}

impl Block {
    /// Build a block from raw endpoint strings, expanding and validating
    /// the identifier range.
    pub fn new(
        name: impl Into<String>,
        begin: &str,
        end: &str,
        size_gb: u64,
        pool: u32,
        ports: Vec<String>,
        chassis: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Configuration("block name must not be empty".into()));
        }
        if size_gb == 0 {
            return Err(Error::Configuration(format!(
                "block {}: size_gb must be greater than zero",
                name
            )));
        }
        let ldevs = expand_range(begin, end)?;
        Ok(Self {
            name,
            ldevs,
            size_gb,
            pool,
            ports,
            chassis,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_gb(&self) -> u64 {
        self.size_gb
    }

    pub fn pool(&self) -> u32 {
        self.pool
    }

    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    pub fn chassis(&self) -> &[String] {
        &self.chassis
    }

    /// Member identifiers in ascending order.
    pub fn ldevs(&self) -> &[LdevId] {
        &self.ldevs
    }

    /// Member identifiers paired with their 1-based rank.
    ///
    /// Rank is positional within the expansion, never affected by which
    /// identifiers already exist on the array, so a given identifier keeps
    /// the same display name on every re-run.
    pub fn slots(&self) -> impl Iterator<Item = NamedSlot> + '_ {
        self.ldevs
            .iter()
            .enumerate()
            .map(|(i, &id)| NamedSlot { position: i + 1, id })
    }

    /// One LUN-mapping request per requested port, chassis, and controller
    /// path, in port-major order with primary before secondary.
    pub fn share_mappings(&self) -> Vec<ShareMapping> {
        let mut mappings = Vec::with_capacity(self.ports.len() * self.chassis.len() * 2);
        for port in &self.ports {
            for chassis in &self.chassis {
                for path in [PathRole::Primary, PathRole::Secondary] {
                    mappings.push(ShareMapping {
                        port: port.clone(),
                        chassis: chassis.clone(),
                        path,
                    });
                }
            }
        }
        mappings
    }
}

// =============================================================================
// Named Slot
// =============================================================================

/// An identifier paired with its rank within the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedSlot {
    /// 1-based rank within the expanded sequence
    pub position: usize,
    pub id: LdevId,
}

impl NamedSlot {
    /// Display name for this slot: `<base>_<position>` with the position
    /// zero-padded to two digits.
    pub fn display_name(&self, base: &str) -> String {
        format!("{}_{:02}", base, self.position)
    }
}

// =============================================================================
// Share Mapping
// =============================================================================

/// Which controller path of a chassis a LUN mapping targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Primary,
    Secondary,
}

impl PathRole {
    /// Suffix appended to the chassis name in the mapping command.
    pub fn suffix(&self) -> &'static str {
        match self {
            PathRole::Primary => "-pri",
            PathRole::Secondary => "-sec",
        }
    }
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRole::Primary => write!(f, "primary"),
            PathRole::Secondary => write!(f, "secondary"),
        }
    }
}

/// One LUN-mapping request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMapping {
    pub port: String,
    pub chassis: String,
    pub path: PathRole,
}

impl ShareMapping {
    /// The chassis target as the array expects it, e.g. `BOX1-pri`.
    pub fn target(&self) -> String {
        format!("{}{}", self.chassis, self.path.suffix())
    }
}
