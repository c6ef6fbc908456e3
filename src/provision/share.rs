//! Share Phase Planning
//!
//! Decides which LDEVs of a block still need LUN mappings and emits one
//! mapping command per requested port, chassis, and controller path.

use crate::array::command::Raidcom;
use crate::array::probe::Prober;
use crate::domain::block::Block;
use crate::domain::ports::CommandRunner;
use crate::error::Result;
use crate::provision::plan::{Event, Plan};
use tracing::debug;

/// Plan the share phase for one block.
///
/// An identifier with any existing sharing is skipped outright: the
/// current mappings are not reconciled against the requested ports and
/// chassis, even when the sets differ.
pub fn plan_share<R: CommandRunner>(
    block: &Block,
    raidcom: &Raidcom,
    prober: &Prober<'_, R>,
) -> Result<Plan> {
    let mut plan = Plan::new();
    let mappings = block.share_mappings();

    for id in block.ldevs() {
        let shared = prober.shared_hosts(id)?;
        if !shared.is_empty() {
            debug!("LDEV {} shared to {} host(s)", id, shared.len());
            plan.push_event(Event::AlreadyShared(*id));
            continue;
        }
        for mapping in &mappings {
            plan.push_command(raidcom.add_lun(mapping, id));
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::command::ArrayCommand;
    use std::collections::BTreeMap;

    /// Runner whose `get ldev` responses carry a PORTs line for shared ids.
    struct ScriptedArray {
        ports_lines: BTreeMap<String, String>,
    }

    impl ScriptedArray {
        fn unshared() -> Self {
            Self {
                ports_lines: BTreeMap::new(),
            }
        }

        fn shared(id: &str, ports_line: &str) -> Self {
            let mut ports_lines = BTreeMap::new();
            ports_lines.insert(id.to_string(), ports_line.to_string());
            Self { ports_lines }
        }
    }

    impl CommandRunner for ScriptedArray {
        fn run(&self, command: &ArrayCommand) -> crate::error::Result<String> {
            let args = command.args();
            assert_eq!(args[0], "get", "planner must only probe");
            let id = &args[3];
            match self.ports_lines.get(id.as_str()) {
                Some(line) => Ok(format!("LDEV : 5472\n{}\n", line)),
                None => Ok("LDEV : 5472\nVOL_TYPE : OPEN-V-CVS\n".to_string()),
            }
        }
    }

    fn block(begin: &str, end: &str) -> Block {
        Block::new(
            "ORAPRD",
            begin,
            end,
            100,
            15,
            vec!["CL1-B".into(), "CL2-B".into()],
            vec!["BOX1".into(), "BOX2".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_unshared_id_gets_eight_mappings() {
        let raidcom = Raidcom::new(5);
        let runner = ScriptedArray::unshared();
        let prober = Prober::new(&raidcom, &runner);
        let plan = plan_share(&block("15:60", "15:60"), &raidcom, &prober).unwrap();

        // 2 ports x 2 chassis x 2 paths
        let rendered: Vec<String> = plan.commands().iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered.len(), 8);
        assert_eq!(
            rendered[0],
            "add lun -port CL1-B BOX1-pri -ldev_id 15:60 -I5"
        );
        assert_eq!(
            rendered[1],
            "add lun -port CL1-B BOX1-sec -ldev_id 15:60 -I5"
        );
        assert_eq!(
            rendered[7],
            "add lun -port CL2-B BOX2-sec -ldev_id 15:60 -I5"
        );
    }

    #[test]
    fn test_shared_id_skipped_even_when_sets_differ() {
        let raidcom = Raidcom::new(5);
        // Shared through a port that is not in the requested set: still
        // treated as fully shared.
        let runner = ScriptedArray::shared("15:60", "PORTs : CL7-F 0 OTHERGRP");
        let prober = Prober::new(&raidcom, &runner);
        let plan = plan_share(&block("15:60", "15:60"), &raidcom, &prober).unwrap();

        assert!(plan.is_empty());
        assert_eq!(
            plan.events(),
            &[Event::AlreadyShared("15:60".parse().unwrap())]
        );
    }

    #[test]
    fn test_mixed_block_only_maps_unshared_members() {
        let raidcom = Raidcom::new(5);
        let runner = ScriptedArray::shared("15:60", "PORTs : CL1-B 0 HOSTGRP01");
        let prober = Prober::new(&raidcom, &runner);
        let plan = plan_share(&block("15:60", "15:61"), &raidcom, &prober).unwrap();

        assert_eq!(plan.commands().len(), 8);
        assert!(plan
            .commands()
            .iter()
            .all(|c| c.to_string().contains("15:61")));
        assert_eq!(plan.events().len(), 1);
    }
}
