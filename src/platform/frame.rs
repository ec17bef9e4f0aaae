//! Display-synchronized frame scheduling
//!
//! At most one frame request is in flight at a time. The loop re-requests
//! only when the previous callback asked to continue, and tearing the loop
//! down cancels whatever is still pending so no callback fires against
//! destroyed state.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// Whether the loop wants another callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Something that can deliver "next frame" callbacks (e.g. requestAnimationFrame)
pub trait FrameScheduler {
    type Handle: Copy + Debug;

    /// Ask for the next callback; `None` if the request could not be made
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns the single outstanding frame request
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request a frame unless one is already pending
    ///
    /// Returns true if a new request was made.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.scheduler.request_frame();
        self.pending.is_some()
    }

    /// Record that the pending callback fired, and re-request if continuing
    pub fn on_callback(&mut self, control: FrameControl) {
        self.pending = None;
        if control == FrameControl::Continue {
            self.pending = self.scheduler.request_frame();
        }
    }

    /// Cancel the outstanding request, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            log::debug!("Cancelling pending frame {handle:?}");
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Default)]
struct ManualFrames {
    next_handle: u32,
    queued: Option<u32>,
    requested: u32,
    cancelled: Vec<u32>,
}

/// Scheduler driven by hand (headless runs and tests)
///
/// Clones share state, so a test can keep a handle after the loop that owns
/// the scheduler has been dropped.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    frames: Rc<RefCell<ManualFrames>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the queued callback, returning its handle
    pub fn fire(&self) -> Option<u32> {
        self.frames.borrow_mut().queued.take()
    }

    pub fn queued(&self) -> Option<u32> {
        self.frames.borrow().queued
    }

    /// Total requests made
    pub fn requested(&self) -> u32 {
        self.frames.borrow().requested
    }

    pub fn cancelled(&self) -> Vec<u32> {
        self.frames.borrow().cancelled.clone()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        let mut frames = self.frames.borrow_mut();
        debug_assert!(frames.queued.is_none(), "frame requested while one is queued");
        frames.next_handle += 1;
        frames.requested += 1;
        let handle = frames.next_handle;
        frames.queued = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut frames = self.frames.borrow_mut();
        if frames.queued == Some(handle) {
            frames.queued = None;
        }
        frames.cancelled.push(handle);
    }
}
