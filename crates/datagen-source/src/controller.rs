//! Row budget for one source instance.
//!
//! The controller combines the configured total with an optimizer-pushed
//! limit and gates every row. It is the only owner of the emitted-row
//! counter; every mutation goes through `&mut self`.

use crate::error::LateLimitPushError;

/// Where the controller stands relative to its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No ceiling; rows are produced until the consumer stops
    Unbounded,
    /// Ceiling in force, not yet reached
    Bounded(u64),
    /// Ceiling reached; `try_advance` returns false from now on
    Exhausted,
}

/// Decides, per call, whether another row may be produced.
#[derive(Debug, Clone, Default)]
pub struct BoundedEnumerationController {
    /// `number-of-rows`, fixed at creation
    configured_total: Option<u64>,
    /// Smallest accepted pushed limit
    pushed_limit: Option<u64>,
    /// Rows admitted in the current execution
    emitted: u64,
    /// Set once the first row is admitted; limits are frozen afterwards
    started: bool,
}

impl BoundedEnumerationController {
    pub fn new(configured_total: Option<u64>) -> Self {
        Self {
            configured_total,
            ..Self::default()
        }
    }

    /// Effective ceiling: the smaller of the configured total and the pushed
    /// limit, or `None` if neither is set.
    pub fn current_limit(&self) -> Option<u64> {
        match (self.configured_total, self.pushed_limit) {
            (Some(total), Some(pushed)) => Some(total.min(pushed)),
            (total, pushed) => total.or(pushed),
        }
    }

    pub fn configured_total(&self) -> Option<u64> {
        self.configured_total
    }

    pub fn pushed_limit(&self) -> Option<u64> {
        self.pushed_limit
    }

    pub fn state(&self) -> ControllerState {
        match self.current_limit() {
            None => ControllerState::Unbounded,
            Some(ceiling) if self.emitted >= ceiling => ControllerState::Exhausted,
            Some(ceiling) => ControllerState::Bounded(ceiling),
        }
    }

    /// Accept a pushed ceiling. Limits only shrink, so repeating a push (or
    /// pushing a looser one) leaves the ceiling unchanged.
    pub fn apply_limit(&mut self, limit: u64) -> Result<(), LateLimitPushError> {
        if self.started {
            return Err(LateLimitPushError {
                requested: limit,
                current_limit: self.current_limit(),
                rows_emitted: self.emitted,
            });
        }
        self.pushed_limit = Some(self.pushed_limit.map_or(limit, |prior| prior.min(limit)));
        Ok(())
    }

    /// Restart the emitted-row count for a new execution. The ceiling is
    /// left as is, and stays frozen if an earlier execution produced rows.
    pub fn restart(&mut self) {
        self.emitted = 0;
    }

    /// Whether any row has been admitted.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Admit one more row if the ceiling allows it. The first admitted row
    /// freezes the ceiling.
    pub fn try_advance(&mut self) -> bool {
        if self.state() == ControllerState::Exhausted {
            return false;
        }
        self.started = true;
        self.emitted = self.emitted.saturating_add(1);
        true
    }

    pub fn rows_emitted(&self) -> u64 {
        self.emitted
    }

    /// Rows still admissible, or `None` when unbounded.
    pub fn remaining(&self) -> Option<u64> {
        self.current_limit()
            .map(|ceiling| ceiling.saturating_sub(self.emitted))
    }
}
