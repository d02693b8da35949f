//! Lifecycle transitions of the hardware interface.
//!
//! `Unconfigured → Inactive ⇄ Active`, any state `→ Finalized`.
//! Deactivation from `Inactive` is accepted so that closing the session is
//! idempotent.

use fri_common::hardware::interface::LifecycleState;

/// Result of a lifecycle transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition accepted, new state.
    Ok(LifecycleState),
    /// Transition rejected, reason.
    Rejected(&'static str),
}

/// Event requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Topology validated, buffers allocated.
    Initialize,
    /// Session connected.
    Activate,
    /// Session closed.
    Deactivate,
    /// Interface torn down.
    Finalize,
}

impl LifecycleEvent {
    /// Operation name used in errors and logs.
    pub const fn operation(self) -> &'static str {
        match self {
            LifecycleEvent::Initialize => "initialize",
            LifecycleEvent::Activate => "activate",
            LifecycleEvent::Deactivate => "deactivate",
            LifecycleEvent::Finalize => "finalize",
        }
    }
}

/// Holder of the current lifecycle state.
#[derive(Debug, Clone, Default)]
pub struct LifecycleMachine {
    state: LifecycleState,
}

impl LifecycleMachine {
    /// Machine in `Unconfigured`.
    pub const fn new() -> Self {
        Self {
            state: LifecycleState::Unconfigured,
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether cycles are allowed.
    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, LifecycleState::Active)
    }

    /// Check `event` against the transition table without applying it.
    pub fn check(&self, event: LifecycleEvent) -> TransitionResult {
        use LifecycleEvent::*;
        use LifecycleState::*;

        match (self.state, event) {
            (Finalized, _) => TransitionResult::Rejected("interface is finalized"),
            (_, Finalize) => TransitionResult::Ok(Finalized),
            (Unconfigured, Initialize) => TransitionResult::Ok(Inactive),
            (Inactive, Activate) => TransitionResult::Ok(Active),
            (Active | Inactive, Deactivate) => TransitionResult::Ok(Inactive),
            (Unconfigured, _) => TransitionResult::Rejected("interface is not initialized"),
            (_, Initialize) => TransitionResult::Rejected("interface is already initialized"),
            (Active, Activate) => TransitionResult::Rejected("interface is already active"),
        }
    }

    /// Apply `event` if the table allows it.
    pub fn handle_event(&mut self, event: LifecycleEvent) -> TransitionResult {
        let result = self.check(event);
        if let TransitionResult::Ok(next) = result {
            self.state = next;
        }
        result
    }
}
