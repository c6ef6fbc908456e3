//! Create Phase Planning
//!
//! Decides which LDEVs of a block still need to be allocated and emits the
//! command sequence for each: status reset, allocation, status fetch,
//! rename, and tier tuning for tiered pools.

use crate::array::command::Raidcom;
use crate::array::probe::Prober;
use crate::domain::block::Block;
use crate::domain::ports::CommandRunner;
use crate::error::Result;
use crate::provision::plan::{Event, Plan};
use tracing::debug;

/// Plan the create phase for one block.
///
/// Existence probes run here, outside any lock bracket. The slot position
/// advances for pre-existing identifiers too, so display names stay stable
/// across re-runs regardless of which identifiers were already present.
pub fn plan_create<R: CommandRunner>(
    block: &Block,
    raidcom: &Raidcom,
    prober: &Prober<'_, R>,
    tiered_pools: &[u32],
) -> Result<Plan> {
    let mut plan = Plan::new();

    for slot in block.slots() {
        if prober.ldev_exists(&slot.id)? {
            debug!("LDEV {} already defined", slot.id);
            plan.push_event(Event::AlreadyExists(slot.id));
            continue;
        }

        plan.push_command(raidcom.reset_command_status());
        plan.push_command(raidcom.add_ldev(block.pool(), &slot.id, block.size_gb()));
        plan.push_command(raidcom.get_command_status());
        plan.push_command(raidcom.modify_ldev_name(&slot.id, &slot.display_name(block.name())));
        if tiered_pools.contains(&block.pool()) {
            plan.push_command(raidcom.disable_reallocation(&slot.id));
        }
    }

    Ok(plan)
}
