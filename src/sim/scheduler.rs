//! Deferred tasks keyed to a round generation
//!
//! Browser timers cannot be reliably retracted, so each task records the round
//! generation that scheduled it. The session drops tasks from older rounds when
//! they come due instead of trying to cancel them.

use serde::{Deserialize, Serialize};

use super::orb::OrbId;

/// Identifier of a transient score callout
pub type CalloutId = u32;

/// Work to perform once a delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Remove a popped orb and spawn its replacement
    Respawn { orb: OrbId },
    /// Take a callout off the display
    ClearCallout { callout: CalloutId },
}

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DueTask {
    pub due_ms: f64,
    /// Round generation at scheduling time
    pub generation: u64,
    pub task: Deferred,
}

/// Pending deferred tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<DueTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run at or after `due_ms`
    pub fn schedule(&mut self, due_ms: f64, generation: u64, task: Deferred) {
        self.pending.push(DueTask {
            due_ms,
            generation,
            task,
        });
    }

    /// Remove and return every task due by `now_ms`, earliest first
    ///
    /// Tasks with equal due times keep their scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<DueTask> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_in_order() {
        let mut sched = Scheduler::new();
        sched.schedule(300.0, 1, Deferred::Respawn { orb: 2 });
        sched.schedule(100.0, 1, Deferred::ClearCallout { callout: 7 });
        sched.schedule(900.0, 1, Deferred::Respawn { orb: 3 });

        let due = sched.take_due(300.0);
        let tasks: Vec<_> = due.iter().map(|t| t.task).collect();
        assert_eq!(
            tasks,
            vec![
                Deferred::ClearCallout { callout: 7 },
                Deferred::Respawn { orb: 2 },
            ]
        );
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_nothing_due_yet() {
        let mut sched = Scheduler::new();
        sched.schedule(500.0, 4, Deferred::Respawn { orb: 1 });
        assert!(sched.take_due(499.9).is_empty());
        assert!(!sched.is_empty());

        let due = sched.take_due(500.0);
        assert_eq!(due[0].generation, 4);
        assert!(sched.is_empty());
    }
}
