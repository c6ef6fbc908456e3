//! Provisioning engine: planners, plan execution, and phase wiring
//!
//! Each block goes through two independent mutation phases, create then
//! share. A phase is planned from unlocked probes, then executed under its
//! own lock bracket; the two brackets are never nested or combined.

pub mod create;
pub mod executor;
pub mod plan;
pub mod share;

pub use create::plan_create;
pub use executor::{Executor, ResourceLock};
pub use plan::{BlockOutcome, Event, PhaseOutcome, Plan};
pub use share::plan_share;

use crate::array::command::Raidcom;
use crate::array::probe::Prober;
use crate::domain::block::Block;
use crate::domain::ports::CommandRunner;
use crate::error::Result;
use tracing::info;

// =============================================================================
// Provisioner
// =============================================================================

/// Runs the create and share phases for declared blocks
pub struct Provisioner<R: CommandRunner> {
    raidcom: Raidcom,
    runner: R,
    tiered_pools: Vec<u32>,
    check: bool,
}

impl<R: CommandRunner> Provisioner<R> {
    pub fn new(raidcom: Raidcom, runner: R, tiered_pools: Vec<u32>, check: bool) -> Self {
        Self {
            raidcom,
            runner,
            tiered_pools,
            check,
        }
    }

    /// Converge one block: create missing LDEVs, then share unshared ones.
    pub fn provision_block(&self, block: &Block) -> Result<BlockOutcome> {
        info!(
            "provisioning block {} ({} LDEVs)",
            block.name(),
            block.ldevs().len()
        );
        let mut outcome = BlockOutcome::default();
        if self.check {
            outcome.events.push(Event::CheckMode);
        }

        let prober = Prober::new(&self.raidcom, &self.runner);
        let executor = Executor::new(&self.raidcom, &self.runner, self.check);

        let create = plan_create(block, &self.raidcom, &prober, &self.tiered_pools)?;
        outcome.absorb(executor.execute(create)?);

        let share = plan_share(block, &self.raidcom, &prober)?;
        outcome.absorb(executor.execute(share)?);

        info!(
            "block {} converged, changed={}",
            block.name(),
            outcome.changed
        );
        Ok(outcome)
    }
}
