//! Anti-cheat watcher: warn once on leaving the page, terminate on repeat.
//!
//! The monitor receives leave-signals (tab hidden, window blurred) from the
//! presentation layer. While a session is in progress and the monitor is
//! enabled, the first signal issues a blocking warning; any further signal
//! forces the session to end with the triggering reason.

use crate::engine::{QuizEngine, QuizObserver, QuizPhase};
use crate::scoring::{EndReason, ScoredResult};

/// The player left the page while a quiz was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveSignal {
    /// The tab or page became hidden.
    PageHidden,
    /// The window lost input focus.
    FocusLost,
}

impl LeaveSignal {
    pub fn reason(self) -> EndReason {
        match self {
            LeaveSignal::PageHidden => EndReason::PageHidden,
            LeaveSignal::FocusLost => EndReason::FocusLost,
        }
    }
}

/// What the monitor did with a signal.
#[derive(Debug, Clone)]
pub enum MonitorAction {
    /// Monitor disabled or quiz not in progress; nothing happened.
    Ignored,
    /// First offense: a warning was surfaced, the quiz continues.
    Warned,
    /// Repeat offense: the session was force-ended with this result.
    Terminated(ScoredResult),
}

/// Focus/visibility watcher with a warn-once-then-terminate policy.
#[derive(Debug)]
pub struct IntegrityMonitor {
    enabled: bool,
    warning_issued: bool,
    attached: bool,
}

impl Default for IntegrityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrityMonitor {
    pub fn new() -> Self {
        Self {
            enabled: true,
            warning_issued: false,
            attached: false,
        }
    }

    /// Mark the signal listeners as attached. Returns `false` if already
    /// attached; setup must happen at most once per process lifetime.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        true
    }

    /// Suppress or resume signal handling. Arming state is untouched, so a
    /// disable/enable cycle does not grant a second warning.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn warning_issued(&self) -> bool {
        self.warning_issued
    }

    /// Re-arm for a new session after a replay or reset.
    pub fn rearm(&mut self) {
        self.warning_issued = false;
    }

    /// Handle a leave-signal against the current engine state.
    pub fn observe(
        &mut self,
        signal: LeaveSignal,
        engine: &mut QuizEngine,
        observer: &dyn QuizObserver,
    ) -> MonitorAction {
        if !self.enabled || engine.phase() != QuizPhase::InProgress {
            return MonitorAction::Ignored;
        }

        if !self.warning_issued {
            self.warning_issued = true;
            tracing::warn!(?signal, "focus lost during quiz, warning issued");
            observer.on_integrity_warning();
            return MonitorAction::Warned;
        }

        tracing::warn!(?signal, "repeat focus loss, terminating session");
        match engine.force_end(signal.reason(), observer) {
            Some(result) => MonitorAction::Terminated(result),
            // Engine raced into a terminal state; treat as a late signal.
            None => MonitorAction::Ignored,
        }
    }
}
