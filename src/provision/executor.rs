//! Plan Execution and Resource Locking
//!
//! Applies a planned mutation phase against the array. The phase body is
//! bracketed by the named resource lock: acquired before the first
//! mutation, released on every exit path. A plan with an empty body is
//! discarded without any external invocation, so a no-op run never locks
//! the array.

use crate::array::command::{ArrayCommand, Raidcom, LOCK_RESOURCE, LOCK_TIMEOUT_SECS};
use crate::domain::ports::CommandRunner;
use crate::error::{Error, Result};
use crate::provision::plan::{Event, PhaseOutcome, Plan};
use tracing::{info, warn};

// =============================================================================
// Resource Lock
// =============================================================================

/// Scoped acquisition of the array's named resource lock.
///
/// `acquire` issues the lock command and maps a refusal to
/// [`Error::LockTimeout`]. `release` issues the unlock and is the normal
/// exit; dropping an unreleased guard issues the unlock as a backstop,
/// logging instead of failing.
pub struct ResourceLock<'a, R: CommandRunner> {
    raidcom: &'a Raidcom,
    runner: &'a R,
    acquire_output: String,
    released: bool,
}

impl<'a, R: CommandRunner> ResourceLock<'a, R> {
    pub fn acquire(raidcom: &'a Raidcom, runner: &'a R) -> Result<Self> {
        match runner.run(&raidcom.lock_resource()) {
            Ok(acquire_output) => Ok(Self {
                raidcom,
                runner,
                acquire_output,
                released: false,
            }),
            Err(Error::Command { output, .. }) => Err(Error::LockTimeout {
                resource: LOCK_RESOURCE.into(),
                timeout_secs: LOCK_TIMEOUT_SECS,
                output,
            }),
            Err(e) => Err(e),
        }
    }

    /// Captured output of the acquisition command.
    pub fn output(&self) -> &str {
        &self.acquire_output
    }

    /// Release the lock, returning the unlock command's captured output.
    pub fn release(mut self) -> Result<String> {
        self.released = true;
        self.runner.run(&self.raidcom.unlock_resource())
    }
}

impl<R: CommandRunner> Drop for ResourceLock<'_, R> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.runner.run(&self.raidcom.unlock_resource()) {
                warn!("failed to release resource lock: {}", e);
            }
        }
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Applies plans as one locked mutation phase each
pub struct Executor<'a, R: CommandRunner> {
    raidcom: &'a Raidcom,
    runner: &'a R,
    check: bool,
}

impl<'a, R: CommandRunner> Executor<'a, R> {
    pub fn new(raidcom: &'a Raidcom, runner: &'a R, check: bool) -> Self {
        Self {
            raidcom,
            runner,
            check,
        }
    }

    /// Execute one planned phase.
    ///
    /// Commands run in order, each as one synchronous invocation; the
    /// first failure aborts the remainder of the batch, leaving earlier
    /// commands applied. In check mode nothing is invoked and the
    /// would-run command lines are recorded instead; `changed` still
    /// reports whether the phase would have mutated anything.
    pub fn execute(&self, plan: Plan) -> Result<PhaseOutcome> {
        let (commands, mut events) = plan.into_parts();

        if commands.is_empty() {
            return Ok(PhaseOutcome {
                changed: false,
                events,
            });
        }

        if self.check {
            events.push(Event::WouldRun(self.raidcom.lock_resource().to_string()));
            for command in &commands {
                events.push(Event::WouldRun(command.to_string()));
            }
            events.push(Event::WouldRun(self.raidcom.unlock_resource().to_string()));
            return Ok(PhaseOutcome {
                changed: true,
                events,
            });
        }

        info!("executing {} mutation command(s)", commands.len());
        let lock = ResourceLock::acquire(self.raidcom, self.runner)?;
        events.push(Event::Executed {
            command: self.raidcom.lock_resource().to_string(),
            output: lock.output().to_string(),
        });

        let body = self.run_body(&commands, &mut events);
        let release = lock.release();
        if let Ok(output) = &release {
            events.push(Event::Executed {
                command: self.raidcom.unlock_resource().to_string(),
                output: output.clone(),
            });
        }
        body?;
        release?;

        Ok(PhaseOutcome {
            changed: true,
            events,
        })
    }

    fn run_body(&self, commands: &[ArrayCommand], events: &mut Vec<Event>) -> Result<()> {
        for command in commands {
            let output = self.runner.run(command)?;
            events.push(Event::Executed {
                command: command.to_string(),
                output,
            });
        }
        Ok(())
    }
}
