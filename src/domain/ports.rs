//! Domain Ports - trait boundaries toward external tools
//!
//! These traits isolate the provisioning logic from the actual array
//! administration binaries so that planners, probers, and the executor can
//! run against fixtures in tests.

use crate::array::command::ArrayCommand;
use crate::error::Result;

// =============================================================================
// Command Runner Port
// =============================================================================

/// Port for running one array administration command as a single
/// synchronous external invocation.
///
/// Implementations return the captured stdout on success and surface a
/// non-zero exit as [`crate::Error::Command`] carrying the rendered command
/// line and the combined captured output.
pub trait CommandRunner {
    fn run(&self, command: &ArrayCommand) -> Result<String>;
}

// =============================================================================
// Inventory Pipeline Port
// =============================================================================

/// Port for the multi-stage device inventory enumeration.
///
/// Implementations produce the raw line-oriented inquiry output already
/// filtered down to lines matching `pattern`; parsing into a scan result
/// stays with the caller.
pub trait InventoryPipeline {
    fn enumerate(&self, pattern: &str) -> Result<String>;
}
