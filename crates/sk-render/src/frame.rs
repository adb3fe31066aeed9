//! Redraw scheduling.
//!
//! The scheduler never paints synchronously on a mutation. It watches the
//! model's change version and, when it moves, asks the host for exactly
//! one frame. Changes that land before that frame runs are folded into
//! it. When the frame fires it always repaints once, even if the version
//! it finds is the one it already drew.

use sk_core::{ChangeVersion, Versioned};

/// Host hook for "call me back on the next display refresh".
pub trait FrameRequester {
    type Error: std::fmt::Debug;

    fn request_frame(&mut self) -> Result<(), Self::Error>;
}

/// Outcome of [`RedrawScheduler::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing changed since the last frame.
    Idle,
    /// A frame was requested.
    Requested,
    /// A frame is already pending and will pick this change up.
    Coalesced,
    /// The frame request failed; the caller should paint right away.
    RenderNow,
}

#[derive(Debug, Clone, Default)]
pub struct RedrawScheduler {
    last_drawn: Option<ChangeVersion>,
    pending: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call after every handler that may have mutated `model`.
    pub fn observe<V: Versioned, R: FrameRequester>(
        &mut self,
        model: &V,
        requester: &mut R,
    ) -> Schedule {
        if self.pending {
            log::trace!("frame pending, coalescing {}", model.version());
            return Schedule::Coalesced;
        }
        if self.last_drawn == Some(model.version()) {
            return Schedule::Idle;
        }
        match requester.request_frame() {
            Ok(()) => {
                log::trace!("frame requested for {}", model.version());
                self.pending = true;
                Schedule::Requested
            }
            Err(err) => {
                log::warn!("frame request failed ({err:?}), painting synchronously");
                Schedule::RenderNow
            }
        }
    }

    /// Call at the start of the frame callback, right before painting.
    pub fn begin_frame<V: Versioned>(&mut self, model: &V) {
        self.pending = false;
        self.last_drawn = Some(model.version());
    }

    /// Record an out-of-band paint. A frame that is already pending stays
    /// pending, so it still absorbs later changes.
    pub fn mark_drawn<V: Versioned>(&mut self, model: &V) {
        self.last_drawn = Some(model.version());
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_drawn(&self) -> Option<ChangeVersion> {
        self.last_drawn
    }
}
