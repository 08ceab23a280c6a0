//! Frame scheduling for the session loop.
//!
//! The host asks for a frame with [`FrameScheduler::request`] and later hands
//! the ticket back to run the tick. Cancelling bumps the generation, so a
//! ticket issued before the cancel is rejected when it finally arrives.

/// Proof that a frame was requested from a specific scheduler generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
    frame: u64,
}

impl FrameTicket {
    /// Frame number this ticket belongs to.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    active: bool,
    pending: bool,
    generation: u64,
    frame: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of the most recently requested frame.
    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    /// Allow frames to be requested.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Arm the next frame. Returns `None` while inactive or while a frame is
    /// already armed, so the loop can never be scheduled twice.
    pub fn request(&mut self) -> Option<FrameTicket> {
        if !self.active || self.pending {
            return None;
        }
        self.pending = true;
        self.frame += 1;
        Some(FrameTicket {
            generation: self.generation,
            frame: self.frame,
        })
    }

    /// Consume a ticket. Returns true only for the live ticket of the
    /// current generation while active.
    pub fn accept(&mut self, ticket: FrameTicket) -> bool {
        if !self.active || !self.pending || ticket.generation != self.generation {
            return false;
        }
        if ticket.frame != self.frame {
            return false;
        }
        self.pending = false;
        true
    }

    /// Stop the loop. Every outstanding ticket becomes stale.
    pub fn cancel(&mut self) {
        self.active = false;
        self.pending = false;
        self.generation += 1;
    }
}
