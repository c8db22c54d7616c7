//! Visibility state machine of the collapsible ToC panel.
//!
//! Transitions that wait for an animation are returned as [`Deferred`]
//! values for the host to schedule. Each carries a [`PanelToken`]; the
//! transition commits only if nothing else happened to the panel in the
//! meantime.

use std::time::Duration;

use serde::Serialize;

/// Length of the open/close opacity transition.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// How the panel is drawn in a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    /// Whether the panel takes part in layout at all
    pub displayed: bool,
    /// Target opacity the transition animates towards
    pub opacity: f32,
}

impl PanelPhase {
    /// Visibility of the panel in this phase.
    ///
    /// `Opening` is displayed at opacity 0 so the following switch to `Open`
    /// animates the fade-in.
    pub fn visibility(self) -> Visibility {
        match self {
            Self::Closed => Visibility {
                displayed: false,
                opacity: 0.0,
            },
            Self::Opening | Self::Closing => Visibility {
                displayed: true,
                opacity: 0.0,
            },
            Self::Open => Visibility {
                displayed: true,
                opacity: 1.0,
            },
        }
    }

    /// Whether an animation is in flight.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// When a deferred transition should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// On the next scheduling tick
    NextTick,
    /// After a fixed duration
    After(Duration),
}

/// Identifies the panel state a deferred transition was scheduled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelToken {
    generation: u64,
    expected: PanelPhase,
}

/// A transition waiting to be applied with [`PanelState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    /// Token to hand back when the delay elapses
    pub token: PanelToken,
    /// How long to wait
    pub delay: Delay,
}

/// The panel state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    phase: PanelPhase,
    generation: u64,
}

impl PanelState {
    /// A closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    /// Toggle button: open when closed, close when open.
    ///
    /// Ignored while an animation is in flight.
    pub fn toggle(&mut self) -> Option<Deferred> {
        if self.phase.is_transitioning() {
            tracing::trace!("Ignoring panel toggle while {:?}", self.phase);
            return None;
        }

        match self.phase {
            PanelPhase::Closed => self.open(),
            _ => self.close(),
        }
    }

    /// Request the panel to be open, reversing a close in progress.
    pub fn open(&mut self) -> Option<Deferred> {
        match self.phase {
            PanelPhase::Closed => Some(self.enter(PanelPhase::Opening, Delay::NextTick)),
            PanelPhase::Closing => {
                // Still displayed; fading back in needs no second step.
                self.set(PanelPhase::Open);
                None
            }
            PanelPhase::Opening | PanelPhase::Open => None,
        }
    }

    /// Request the panel to be closed, reversing an open in progress.
    pub fn close(&mut self) -> Option<Deferred> {
        match self.phase {
            PanelPhase::Open | PanelPhase::Opening => {
                Some(self.enter(PanelPhase::Closing, Delay::After(ANIMATION_DURATION)))
            }
            PanelPhase::Closing | PanelPhase::Closed => None,
        }
    }

    /// Apply a deferred transition.
    ///
    /// Returns `false` and leaves the state untouched if the panel changed
    /// since the transition was scheduled.
    pub fn complete(&mut self, token: PanelToken) -> bool {
        if token.generation != self.generation || token.expected != self.phase {
            tracing::trace!("Dropping stale panel transition from {:?}", token.expected);
            return false;
        }

        match self.phase {
            PanelPhase::Opening => self.set(PanelPhase::Open),
            PanelPhase::Closing => self.set(PanelPhase::Closed),
            PanelPhase::Open | PanelPhase::Closed => return false,
        }
        true
    }

    fn enter(&mut self, phase: PanelPhase, delay: Delay) -> Deferred {
        self.set(phase);
        Deferred {
            token: PanelToken {
                generation: self.generation,
                expected: phase,
            },
            delay,
        }
    }

    fn set(&mut self, phase: PanelPhase) {
        self.phase = phase;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let panel = PanelState::new();

        assert_eq!(panel.phase(), PanelPhase::Closed);
        assert!(!panel.phase().visibility().displayed);
    }

    #[test]
    fn full_cycle() {
        let mut panel = PanelState::new();

        let opening = panel.toggle().unwrap();
        assert_eq!(panel.phase(), PanelPhase::Opening);
        assert_eq!(opening.delay, Delay::NextTick);

        assert!(panel.complete(opening.token));
        assert_eq!(panel.phase(), PanelPhase::Open);

        let closing = panel.toggle().unwrap();
        assert_eq!(panel.phase(), PanelPhase::Closing);
        assert_eq!(closing.delay, Delay::After(ANIMATION_DURATION));

        assert!(panel.complete(closing.token));
        assert_eq!(panel.phase(), PanelPhase::Closed);
    }

    #[test]
    fn toggle_is_ignored_in_flight() {
        let mut panel = PanelState::new();
        let opening = panel.toggle().unwrap();

        assert!(panel.toggle().is_none());
        assert_eq!(panel.phase(), PanelPhase::Opening);

        panel.complete(opening.token);
        let _closing = panel.toggle().unwrap();

        assert!(panel.toggle().is_none());
        assert_eq!(panel.phase(), PanelPhase::Closing);
    }

    #[test]
    fn reopen_during_close_survives_stale_timer() {
        let mut panel = PanelState::new();
        let opening = panel.toggle().unwrap();
        panel.complete(opening.token);
        let closing = panel.toggle().unwrap();

        assert!(panel.open().is_none());
        assert_eq!(panel.phase(), PanelPhase::Open);

        // The original close delay elapses afterwards.
        assert!(!panel.complete(closing.token));
        assert_eq!(panel.phase(), PanelPhase::Open);
    }

    #[test]
    fn stale_token_of_same_phase_is_rejected() {
        let mut panel = PanelState::new();
        let opening = panel.toggle().unwrap();
        panel.complete(opening.token);

        let first_close = panel.toggle().unwrap();
        panel.open();
        let second_close = panel.close().unwrap();
        assert_eq!(panel.phase(), PanelPhase::Closing);

        assert!(!panel.complete(first_close.token));
        assert_eq!(panel.phase(), PanelPhase::Closing);

        assert!(panel.complete(second_close.token));
        assert_eq!(panel.phase(), PanelPhase::Closed);
    }

    #[test]
    fn close_while_opening() {
        let mut panel = PanelState::new();
        let opening = panel.toggle().unwrap();

        let closing = panel.close().unwrap();
        assert!(!panel.complete(opening.token));
        assert!(panel.complete(closing.token));
        assert_eq!(panel.phase(), PanelPhase::Closed);
    }

    #[test]
    fn token_is_single_use() {
        let mut panel = PanelState::new();
        let opening = panel.toggle().unwrap();

        assert!(panel.complete(opening.token));
        assert!(!panel.complete(opening.token));
    }

    #[test]
    fn visibility_per_phase() {
        assert_eq!(PanelPhase::Open.visibility().opacity, 1.0);
        assert_eq!(PanelPhase::Opening.visibility().opacity, 0.0);
        assert!(PanelPhase::Closing.visibility().displayed);
        assert!(PanelPhase::Closing.is_transitioning());
        assert!(!PanelPhase::Closed.is_transitioning());
    }
}
