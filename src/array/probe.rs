//! LDEV Status Probing
//!
//! Existence and sharing probes over the `get ldev` status query. Probes
//! run before and outside any lock bracket; they only inform which
//! mutations get planned, so a concurrent writer can still change array
//! state between a probe and the locked mutation that follows it.

use crate::array::command::Raidcom;
use crate::domain::ldev::LdevId;
use crate::domain::ports::CommandRunner;
use crate::error::Result;

/// Sentinel phrase marking an undefined LDEV in status output
const NOT_DEFINED: &str = "NOT DEFINED";

/// Section token opening the shared-ports line of a status response
const PORTS_SECTION: &str = "PORTs";

// =============================================================================
// Port/Host Pair
// =============================================================================

/// One port/host pair an LDEV is currently shared to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortHost {
    pub port: String,
    pub host: String,
}

// =============================================================================
// Prober
// =============================================================================

/// Issues synchronous status queries against one array session
pub struct Prober<'a, R: CommandRunner> {
    raidcom: &'a Raidcom,
    runner: &'a R,
}

impl<'a, R: CommandRunner> Prober<'a, R> {
    pub fn new(raidcom: &'a Raidcom, runner: &'a R) -> Self {
        Self { raidcom, runner }
    }

    /// Whether the identifier is already defined on the array.
    pub fn ldev_exists(&self, id: &LdevId) -> Result<bool> {
        let output = self.runner.run(&self.raidcom.get_ldev(id))?;
        Ok(!output.contains(NOT_DEFINED))
    }

    /// The distinct port/host pairs the identifier is currently shared to.
    /// Empty means unshared.
    pub fn shared_hosts(&self, id: &LdevId) -> Result<Vec<PortHost>> {
        let output = self.runner.run(&self.raidcom.get_ldev(id))?;
        Ok(parse_shared_hosts(&output))
    }
}

// =============================================================================
// Status Text Parsing
// =============================================================================

/// Extract port/host pairs from raw `get ldev` status text.
///
/// Only the first `PORTs` line is consulted; its segments are colon
/// delimited, with the port as the first whitespace token of a segment and
/// the host group as the third. Exact duplicate pairs are dropped.
pub fn parse_shared_hosts(status: &str) -> Vec<PortHost> {
    let mut pairs: Vec<PortHost> = Vec::new();
    for line in status.lines() {
        if !line.starts_with(PORTS_SECTION) {
            continue;
        }
        let mut segments = line.split(':');
        segments.next(); // section label
        for segment in segments {
            let mut tokens = segment.split_whitespace();
            let port = tokens.next();
            let _lun = tokens.next();
            let host = tokens.next();
            if let (Some(port), Some(host)) = (port, host) {
                let pair = PortHost {
                    port: port.to_string(),
                    host: host.to_string(),
                };
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        break;
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::command::ArrayCommand;
    use crate::error::Error;

    struct FixedOutput(&'static str);

    impl CommandRunner for FixedOutput {
        fn run(&self, _command: &ArrayCommand) -> crate::error::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl CommandRunner for Failing {
        fn run(&self, command: &ArrayCommand) -> crate::error::Result<String> {
            Err(Error::command(command.to_string(), "boom"))
        }
    }

    const DEFINED_STATUS: &str = "Serial#  : 466673\n\
                                  LDEV : 5472\n\
                                  VOL_TYPE : OPEN-V-CVS\n\
                                  PORTs : CL1-B 0 HOSTGRP01 : CL2-B 1 HOSTGRP01\n";

    #[test]
    fn test_ldev_exists_without_sentinel() {
        let raidcom = Raidcom::new(5);
        let runner = FixedOutput(DEFINED_STATUS);
        let prober = Prober::new(&raidcom, &runner);
        assert!(prober.ldev_exists(&"15:60".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_ldev_not_defined_sentinel() {
        let raidcom = Raidcom::new(5);
        let runner = FixedOutput("LDEV : 5472\nVOL_TYPE : NOT DEFINED\n");
        let prober = Prober::new(&raidcom, &runner);
        assert!(!prober.ldev_exists(&"15:60".parse().unwrap()).unwrap());
    }

    #[test]
    fn test_probe_propagates_command_failure() {
        let raidcom = Raidcom::new(5);
        let prober = Prober::new(&raidcom, &Failing);
        assert!(prober.ldev_exists(&"15:60".parse().unwrap()).is_err());
    }

    #[test]
    fn test_parse_ports_line_two_pairs() {
        let pairs = parse_shared_hosts("PORTs : CL1-B 0 HOSTGRP01 : CL2-B 1 HOSTGRP01");
        assert_eq!(
            pairs,
            vec![
                PortHost {
                    port: "CL1-B".into(),
                    host: "HOSTGRP01".into()
                },
                PortHost {
                    port: "CL2-B".into(),
                    host: "HOSTGRP01".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_dedupes_exact_pairs() {
        let pairs = parse_shared_hosts("PORTs : CL1-B 0 HOSTGRP01 : CL1-B 1 HOSTGRP01");
        // Same port and host twice collapses; differing LUN number is not
        // part of pair identity.
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_parse_single_segment() {
        let pairs = parse_shared_hosts("PORTs : CL7-F 2 HOSTGRP09");
        assert_eq!(
            pairs,
            vec![PortHost {
                port: "CL7-F".into(),
                host: "HOSTGRP09".into()
            }]
        );
    }

    #[test]
    fn test_parse_ignores_short_segments_and_other_lines() {
        let status = "Serial# : 466673\nPORTs : CL1-B 0 HOSTGRP01 : CL9 :\nLDEV : 5472";
        let pairs = parse_shared_hosts(status);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].port, "CL1-B");
    }

    #[test]
    fn test_parse_no_ports_line_is_unshared() {
        assert!(parse_shared_hosts(DEFINED_STATUS.lines().next().unwrap()).is_empty());
        assert!(parse_shared_hosts("").is_empty());
    }

    #[test]
    fn test_parse_stops_after_first_ports_line() {
        let status = "PORTs : CL1-B 0 HOSTGRP01\nPORTs : CL2-B 0 HOSTGRP02";
        let pairs = parse_shared_hosts(status);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].host, "HOSTGRP01");
    }
}
