//! Recording session lifecycle, kept separate from the browser capture glue.
//!
//! The session is a two-state machine: `Idle` until a capture source is
//! bound, `Recording` while fragments arrive. Fragments are appended in
//! emission order and only while recording; the buffered sequence is drained
//! exactly once when the session finishes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording,
}

/// Outcome of `begin`, so the caller knows whether an in-flight capture
/// source was displaced and must be torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    Fresh,
    RestartedPrior,
}

/// Ordered fragment buffer plus lifecycle state.
///
/// Generic over the fragment payload: the web controller stores encoded
/// media blobs, host-side tests store plain byte vectors.
pub struct CaptureSession<F> {
    state: SessionState,
    fragments: Vec<F>,
}

impl<F> Default for CaptureSession<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> CaptureSession<F> {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            fragments: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Start a session. Any previously buffered fragments are discarded.
    ///
    /// Starting while already recording restarts the session; the caller is
    /// told via `RestartedPrior` so it can stop the displaced source.
    pub fn begin(&mut self) -> BeginOutcome {
        let prior = self.state;
        self.fragments.clear();
        self.state = SessionState::Recording;
        match prior {
            SessionState::Idle => BeginOutcome::Fresh,
            SessionState::Recording => BeginOutcome::RestartedPrior,
        }
    }

    /// Append a fragment in arrival order. Empty fragments are dropped, and
    /// nothing is buffered outside an active session. Returns whether the
    /// fragment was kept.
    pub fn push(&mut self, fragment: F, size: u64) -> bool {
        if self.state != SessionState::Recording || size == 0 {
            return false;
        }
        self.fragments.push(fragment);
        true
    }

    /// Finish the session, draining the buffered fragments in emission order.
    ///
    /// Finishing while idle is a no-op and yields nothing.
    pub fn finish(&mut self) -> Option<Vec<F>> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Recording => {
                self.state = SessionState::Idle;
                Some(std::mem::take(&mut self.fragments))
            }
        }
    }
}
