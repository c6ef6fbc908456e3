//! Error types for the LDEV provisioning operator
//!
//! Provides structured error types for all components: range expansion,
//! inventory scanning, command execution, and resource locking.

use thiserror::Error;

/// Unified error type for the operator
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // =========================================================================
    // Identifier Errors
    // =========================================================================
    #[error("Invalid LDEV identifier: {0}")]
    InvalidLdevId(String),

    #[error("Invalid LDEV range {begin}..{end}: {reason}")]
    InvalidRange {
        begin: String,
        end: String,
        reason: String,
    },

    // =========================================================================
    // Array Interface Errors
    // =========================================================================
    #[error("Inventory scan failed: {reason}\n{output}")]
    Scan { reason: String, output: String },

    #[error("Command failed: {command}\n{output}")]
    Command { command: String, output: String },

    #[error("Could not acquire resource lock {resource} within {timeout_secs}s\n{output}")]
    LockTimeout {
        resource: String,
        timeout_secs: u64,
        output: String,
    },

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a command failure from a rendered command line and its
    /// captured combined output.
    pub fn command(command: impl Into<String>, output: impl Into<String>) -> Self {
        Error::Command {
            command: command.into(),
            output: output.into(),
        }
    }

    /// Build a scan failure carrying the captured tool output.
    pub fn scan(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Error::Scan {
            reason: reason.into(),
            output: output.into(),
        }
    }
}

/// Result type alias for the operator
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = Error::command("add ldev -pool 15 -ldev_id 15:60", "raidcom: error");
        let rendered = format!("{}", err);
        assert!(rendered.contains("add ldev -pool 15 -ldev_id 15:60"));
        assert!(rendered.contains("raidcom: error"));
    }

    #[test]
    fn test_lock_timeout_display() {
        let err = Error::LockTimeout {
            resource: "meta_resource".into(),
            timeout_secs: 60,
            output: String::new(),
        };
        assert!(format!("{}", err).contains("meta_resource"));
    }
}
