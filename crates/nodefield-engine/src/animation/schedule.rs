use std::collections::VecDeque;

/// Handle for one scheduled frame callback.
///
/// Handles are minted by a [`FrameScheduler`] and are only meaningful to it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    #[inline]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host-side "next frame" hook.
///
/// The host invokes the engine once per display refresh for each request it
/// hands out, and never for a request that was cancelled first.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancelling an unknown or already-delivered request is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// FIFO scheduler for headless hosts and tests.
///
/// Requests are delivered in the order they were made; the host drains them
/// with [`QueuedScheduler::next_due`].
#[derive(Debug, Default)]
pub struct QueuedScheduler {
    next_id: u64,
    pending: VecDeque<FrameRequest>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest outstanding request.
    pub fn next_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_front()
    }

    pub fn is_pending(&self, request: FrameRequest) -> bool {
        self.pending.contains(&request)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id = self.next_id.wrapping_add(1);
        let request = FrameRequest(self.next_id);
        self.pending.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_unique_and_fifo() {
        let mut s = QueuedScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert_ne!(a, b);
        assert_eq!(s.next_due(), Some(a));
        assert_eq!(s.next_due(), Some(b));
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn cancel_removes_only_that_request() {
        let mut s = QueuedScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        s.cancel_frame(a);
        s.cancel_frame(a);
        assert!(!s.is_pending(a));
        assert!(s.is_pending(b));
        assert_eq!(s.pending_count(), 1);
    }
}
