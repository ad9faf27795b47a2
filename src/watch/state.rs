use crate::Error;

/// Terminal outcome of a run. Exactly one of the non-pending variants is
/// committed per run; later transition requests are ignored.
#[derive(Debug)]
pub enum Outcome {
    Pending,
    Success,
    Timeout,
    Failure(Error),
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }
}

/// Mutable run state, owned exclusively by one [`Watcher`](crate::Watcher).
///
/// All terminal transitions funnel through [`transition`](Self::transition),
/// a single guarded check-and-set: the first transition wins, every later
/// request is a no-op. This is what prevents double resolution of the run
/// and double teardown.
#[derive(Debug)]
pub struct WatchState {
    messages_seen: u64,
    subscribed: bool,
    terminal: bool,
    outcome: Outcome,
}

impl WatchState {
    pub fn new() -> Self {
        Self {
            messages_seen: 0,
            subscribed: false,
            terminal: false,
            outcome: Outcome::Pending,
        }
    }

    pub fn messages_seen(&self) -> u64 {
        self.messages_seen
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn mark_subscribed(&mut self) {
        self.subscribed = true;
    }

    /// Count one delivered message.
    ///
    /// Increments only while subscribed and not terminal; deliveries that
    /// race past the terminal commit must not alter the reported count.
    pub fn record_message(&mut self) -> u64 {
        if self.subscribed && !self.terminal {
            self.messages_seen += 1;
        }
        self.messages_seen
    }

    /// Request a terminal transition. Returns `true` if this request won,
    /// `false` if the run was already terminal (idempotent no-op).
    pub fn transition(&mut self, outcome: Outcome) -> bool {
        debug_assert!(!outcome.is_pending(), "cannot transition back to pending");
        if self.terminal {
            return false;
        }
        self.terminal = true;
        self.outcome = outcome;
        true
    }

    /// Consume the state, yielding the committed outcome and the frozen
    /// message count.
    pub fn into_outcome(self) -> (Outcome, u64) {
        (self.outcome, self.messages_seen)
    }
}

impl Default for WatchState {
    fn default() -> Self {
        Self::new()
    }
}
