//! Device Inventory Scanning
//!
//! Maps logical LDEV names to device nodes or identifiers by parsing the
//! fixed-column inquiry output produced by the inventory pipeline.
//!
//! Column layout (whitespace delimited): column 0 is the device node path,
//! column 3 the packed 4-hex control-unit+index token, column 8 the logical
//! name.

use crate::domain::ldev::LdevId;
use crate::domain::ports::InventoryPipeline;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use tracing::debug;

const DEVICE_COLUMN: usize = 0;
const LDEV_COLUMN: usize = 3;
const NAME_COLUMN: usize = 8;

// =============================================================================
// Scan Types
// =============================================================================

/// What a scan should resolve logical names to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    /// Device node paths
    Device,
    /// LDEV identifiers
    Ldev,
}

/// One resolved inventory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    Device(String),
    Ldev(LdevId),
}

/// Logical name to entry, in inquiry output order.
///
/// A logical name appearing more than once keeps only its last occurrence;
/// no ambiguity error is raised.
pub type ScanResult = IndexMap<String, ScanEntry>;

// =============================================================================
// Device Scanner
// =============================================================================

/// Resolves logical names through the inventory pipeline
pub struct DeviceScanner<'a, P: InventoryPipeline> {
    pipeline: &'a P,
}

impl<'a, P: InventoryPipeline> DeviceScanner<'a, P> {
    pub fn new(pipeline: &'a P) -> Self {
        Self { pipeline }
    }

    /// Scan for logical names matching `pattern`.
    pub fn scan(&self, pattern: &str, kind: ScanKind) -> Result<ScanResult> {
        let raw = self.pipeline.enumerate(pattern)?;
        let result = parse_inventory(&raw, kind)?;
        debug!("scan for {:?} resolved {} entries", pattern, result.len());
        Ok(result)
    }
}

/// Parse raw filtered inquiry lines into a scan result.
pub fn parse_inventory(raw: &str, kind: ScanKind) -> Result<ScanResult> {
    let mut result = ScanResult::new();
    for line in raw.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() <= NAME_COLUMN {
            continue;
        }
        let name = columns[NAME_COLUMN].to_string();
        let entry = match kind {
            ScanKind::Device => ScanEntry::Device(columns[DEVICE_COLUMN].to_string()),
            ScanKind::Ldev => {
                let id = LdevId::from_packed(columns[LDEV_COLUMN]).map_err(|_| {
                    Error::scan(
                        format!("unparseable LDEV token {:?}", columns[LDEV_COLUMN]),
                        line.to_string(),
                    )
                })?;
                ScanEntry::Ldev(id)
            }
        };
        result.insert(name, entry);
    }

    if result.is_empty() {
        return Err(Error::scan("no usable inventory lines", raw.to_string()));
    }
    Ok(result)
}
