//! External Tool Invocation
//!
//! Concrete implementations of the command-runner and inventory-pipeline
//! ports on top of the array administration binaries. Every command is one
//! blocking process invocation with captured output.

use crate::array::command::ArrayCommand;
use crate::domain::ports::{CommandRunner, InventoryPipeline};
use crate::error::{Error, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Default location of the administration binary
pub const DEFAULT_RAIDCOM: &str = "/HORCM/usr/bin/raidcom";

/// Default location of the inquiry tool
pub const DEFAULT_INQRAID: &str = "/HORCM/usr/bin/inqraid";

/// Default raw-device glob fed to the inquiry tool
pub const DEFAULT_DEVICE_GLOB: &str = "/dev/rdsk/*";

fn combined_output(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    text
}

// =============================================================================
// Raidcom Runner
// =============================================================================

/// Runs administration commands through the raidcom binary
#[derive(Debug, Clone)]
pub struct RaidcomRunner {
    binary: PathBuf,
}

impl RaidcomRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for RaidcomRunner {
    fn default() -> Self {
        Self::new(DEFAULT_RAIDCOM)
    }
}

impl CommandRunner for RaidcomRunner {
    fn run(&self, command: &ArrayCommand) -> Result<String> {
        debug!("raidcom {}", command);
        let output = Command::new(&self.binary)
            .args(command.args())
            .output()
            .map_err(|e| Error::command(command.to_string(), e.to_string()))?;

        if !output.status.success() {
            return Err(Error::command(command.to_string(), combined_output(&output)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// =============================================================================
// Inquiry Pipeline
// =============================================================================

/// Enumerates raw device nodes and identifies them through the inquiry
/// tool, keeping only lines matching the requested name pattern.
#[derive(Debug, Clone)]
pub struct InqraidPipeline {
    inqraid: PathBuf,
    device_glob: String,
}

impl InqraidPipeline {
    pub fn new(inqraid: impl Into<PathBuf>, device_glob: impl Into<String>) -> Self {
        Self {
            inqraid: inqraid.into(),
            device_glob: device_glob.into(),
        }
    }

    fn device_nodes(&self) -> Result<Vec<String>> {
        let paths = glob::glob(&self.device_glob)
            .map_err(|e| Error::scan("bad device glob", e.to_string()))?;
        let mut nodes = Vec::new();
        for path in paths {
            let path = path.map_err(|e| Error::scan("device enumeration failed", e.to_string()))?;
            nodes.push(path.display().to_string());
        }
        Ok(nodes)
    }
}

impl Default for InqraidPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_INQRAID, DEFAULT_DEVICE_GLOB)
    }
}

impl InventoryPipeline for InqraidPipeline {
    fn enumerate(&self, pattern: &str) -> Result<String> {
        let nodes = self.device_nodes()?;
        debug!("feeding {} device nodes to inqraid", nodes.len());

        let mut child = Command::new(&self.inqraid)
            .args(["-fnx", "-CLI"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::scan("failed to start inquiry tool", e.to_string()))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| Error::scan("inquiry tool stdin unavailable", String::new()))?;
            for node in &nodes {
                writeln!(stdin, "{}", node)?;
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::scan("inquiry tool did not complete", e.to_string()))?;

        if !output.status.success() {
            return Err(Error::scan(
                "inquiry tool exited non-zero",
                combined_output(&output),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let matched: Vec<&str> = stdout
            .lines()
            .filter(|line| line.contains(pattern))
            .collect();

        Ok(matched.join("\n"))
    }
}
