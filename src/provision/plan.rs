//! Provisioning Plans
//!
//! A plan is the immutable output of one planning pass: the ordered
//! mutation commands for a phase plus the structured events the pass
//! produced. Planners only read array state; the executor is the only
//! place a plan's commands touch the array.

use crate::array::command::ArrayCommand;
use crate::domain::ldev::LdevId;
use std::fmt;

// =============================================================================
// Plan
// =============================================================================

/// Planned mutation phase: command body (no lock bracket) plus events
#[derive(Debug, Clone, Default)]
pub struct Plan {
    commands: Vec<ArrayCommand>,
    events: Vec<Event>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_command(&mut self, command: ArrayCommand) {
        self.commands.push(command);
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Ordered mutation body. The lock bracket is not part of the plan.
    pub fn commands(&self) -> &[ArrayCommand] {
        &self.commands
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// A plan with an empty body is never submitted for execution.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ArrayCommand>, Vec<Event>) {
        (self.commands, self.events)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Structured record of what a planning or execution pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Check mode is active; nothing will be mutated
    CheckMode,
    /// Identifier already defined on the array; creation skipped
    AlreadyExists(LdevId),
    /// Identifier already shared somewhere; sharing skipped
    AlreadyShared(LdevId),
    /// Command that would run, were this not check mode
    WouldRun(String),
    /// Command that ran, with any non-empty captured output
    Executed { command: String, output: String },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CheckMode => write!(f, "RUNNING IN CHECK MODE - NO CHANGES WILL BE MADE"),
            Event::AlreadyExists(id) => write!(f, "LDEV {} already exists, skipping", id),
            Event::AlreadyShared(id) => write!(f, "LDEV {} is already shared, skipping", id),
            Event::WouldRun(command) => write!(f, "would run: raidcom {}", command),
            Event::Executed { command, output } => {
                write!(f, "raidcom {}", command)?;
                if !output.is_empty() {
                    write!(f, "\n{}", output)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of executing one phase
#[derive(Debug, Clone, Default)]
pub struct PhaseOutcome {
    /// Whether at least one mutation command executed (or would have, in
    /// check mode)
    pub changed: bool,
    pub events: Vec<Event>,
}

/// Merged result of the create and share phases for one block
#[derive(Debug, Clone, Default)]
pub struct BlockOutcome {
    pub changed: bool,
    pub events: Vec<Event>,
}

impl BlockOutcome {
    pub fn absorb(&mut self, phase: PhaseOutcome) {
        self.changed |= phase.changed;
        self.events.extend(phase.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::command::Raidcom;

    #[test]
    fn test_empty_plan() {
        let plan = Plan::new();
        assert!(plan.is_empty());
        assert!(plan.commands().is_empty());
    }

    #[test]
    fn test_plan_preserves_order() {
        let raidcom = Raidcom::new(5);
        let mut plan = Plan::new();
        plan.push_command(raidcom.reset_command_status());
        plan.push_command(raidcom.get_command_status());
        assert_eq!(plan.commands()[0].to_string(), "reset command_status -I5");
        assert_eq!(plan.commands()[1].to_string(), "get command_status -I5");
    }

    #[test]
    fn test_event_display() {
        let id = "15:60".parse().unwrap();
        assert_eq!(
            Event::AlreadyExists(id).to_string(),
            "LDEV 15:60 already exists, skipping"
        );
        assert_eq!(
            Event::AlreadyShared(id).to_string(),
            "LDEV 15:60 is already shared, skipping"
        );
        let ran = Event::Executed {
            command: "get command_status -I5".into(),
            output: String::new(),
        };
        assert_eq!(ran.to_string(), "raidcom get command_status -I5");
    }

    #[test]
    fn test_outcome_absorb() {
        let mut outcome = BlockOutcome::default();
        outcome.absorb(PhaseOutcome {
            changed: false,
            events: vec![Event::CheckMode],
        });
        assert!(!outcome.changed);
        outcome.absorb(PhaseOutcome {
            changed: true,
            events: vec![],
        });
        assert!(outcome.changed);
        assert_eq!(outcome.events.len(), 1);
    }
}
