//! ldevctl - Declarative LDEV Block Provisioning
//!
//! Converges a SAN storage array toward a declared set of LDEV blocks
//! through the array's command-line administration protocol. Runs are
//! idempotent: identifiers that already exist or are already shared are
//! skipped, so re-running after a partial failure is safe.
//!
//! # Architecture
//!
//! ```text
//!  declared blocks (YAML)
//!         │
//!         ▼
//!  ┌──────────────┐   probes (unlocked)   ┌──────────────────┐
//!  │   planners    │ ◄──────────────────── │  get ldev status │
//!  │ create/share  │                       └──────────────────┘
//!  └──────┬───────┘
//!         │ immutable Plan + events
//!         ▼
//!  ┌──────────────┐   lock ─ body ─ unlock
//!  │   executor    │ ────────────────────►  raidcom (one process
//!  └──────────────┘                         invocation per command)
//! ```
//!
//! # Modules
//!
//! - [`domain`]: LDEV identifiers, blocks, and the port traits
//! - [`array`]: command rendering, external invocation, probing, scanning
//! - [`provision`]: planners, the lock-bracketed executor, phase wiring
//! - [`config`]: declared desired state, validated at the boundary
//! - [`error`]: error types and handling

pub mod array;
pub mod config;
pub mod domain;
pub mod error;
pub mod provision;

// Re-export commonly used types
pub use array::{
    command_device_for, serial_for_instance, ArrayCommand, DeviceScanner, FrameInfo,
    InqraidPipeline, PortHost, Prober, Raidcom, RaidcomRunner, ScanEntry, ScanKind, ScanResult,
};
pub use config::{BlockSpec, OperatorConfig};
pub use domain::{expand_range, Block, CommandRunner, InventoryPipeline, LdevId, NamedSlot};
pub use error::{Error, Result};
pub use provision::{BlockOutcome, Event, Executor, Plan, Provisioner, ResourceLock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
