//! Array Administration Commands
//!
//! Typed constructors for the raidcom command set. Every constructor
//! renders to the argv of exactly one external invocation; nothing here
//! touches the outside world.

use crate::domain::block::ShareMapping;
use crate::domain::ldev::LdevId;
use std::fmt;

/// Named resource lock guarding mutation phases
pub const LOCK_RESOURCE: &str = "meta_resource";

/// Lock acquisition timeout in seconds
pub const LOCK_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// Array Command
// =============================================================================

/// One rendered administration command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayCommand {
    args: Vec<String>,
}

impl ArrayCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Argv passed to the administration binary.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ArrayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

// =============================================================================
// Command Factory
// =============================================================================

/// Builds commands bound to one HORCM instance (the session handle every
/// invocation is keyed by).
#[derive(Debug, Clone)]
pub struct Raidcom {
    instance: u16,
}

impl Raidcom {
    pub fn new(instance: u16) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> u16 {
        self.instance
    }

    fn session(&self) -> String {
        format!("-I{}", self.instance)
    }

    /// Acquire the named resource lock, waiting up to the fixed timeout.
    pub fn lock_resource(&self) -> ArrayCommand {
        ArrayCommand::new([
            "lock".into(),
            "resource".into(),
            "-resource_name".into(),
            LOCK_RESOURCE.into(),
            "-time".into(),
            LOCK_TIMEOUT_SECS.to_string(),
            self.session(),
        ])
    }

    /// Release the named resource lock.
    pub fn unlock_resource(&self) -> ArrayCommand {
        ArrayCommand::new([
            "unlock".into(),
            "resource".into(),
            "-resource_name".into(),
            LOCK_RESOURCE.into(),
            self.session(),
        ])
    }

    /// Existence and status probe for one LDEV.
    pub fn get_ldev(&self, id: &LdevId) -> ArrayCommand {
        ArrayCommand::new([
            "get".into(),
            "ldev".into(),
            "-ldev_id".into(),
            id.to_string(),
            self.session(),
        ])
    }

    /// Clear prior command status before a mutation.
    pub fn reset_command_status(&self) -> ArrayCommand {
        ArrayCommand::new(["reset".into(), "command_status".into(), self.session()])
    }

    /// Allocate a new LDEV from a pool.
    pub fn add_ldev(&self, pool: u32, id: &LdevId, size_gb: u64) -> ArrayCommand {
        ArrayCommand::new([
            "add".into(),
            "ldev".into(),
            "-pool".into(),
            pool.to_string(),
            "-ldev_id".into(),
            id.to_string(),
            "-capacity".into(),
            format!("{}g", size_gb),
            self.session(),
        ])
    }

    /// Confirm the prior mutation applied.
    pub fn get_command_status(&self) -> ArrayCommand {
        ArrayCommand::new(["get".into(), "command_status".into(), self.session()])
    }

    /// Set the display name of an LDEV.
    pub fn modify_ldev_name(&self, id: &LdevId, name: &str) -> ArrayCommand {
        ArrayCommand::new([
            "modify".into(),
            "ldev".into(),
            "-ldev_id".into(),
            id.to_string(),
            "-ldev_name".into(),
            name.to_string(),
            self.session(),
        ])
    }

    /// Disable automatic tier reallocation for an LDEV in a tiered pool.
    pub fn disable_reallocation(&self, id: &LdevId) -> ArrayCommand {
        ArrayCommand::new([
            "modify".into(),
            "ldev".into(),
            "-ldev_id".into(),
            id.to_string(),
            "-status".into(),
            "enable_reallocation".into(),
            "5".into(),
            self.session(),
        ])
    }

    /// Map an LDEV onto one port for one chassis controller path.
    pub fn add_lun(&self, mapping: &ShareMapping, id: &LdevId) -> ArrayCommand {
        ArrayCommand::new([
            "add".into(),
            "lun".into(),
            "-port".into(),
            mapping.port.clone(),
            mapping.target(),
            "-ldev_id".into(),
            id.to_string(),
            self.session(),
        ])
    }
}
