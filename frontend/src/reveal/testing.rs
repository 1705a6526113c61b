//! Hand-cranked frame schedulers for host tests.

use std::cell::{Cell, RefCell};

use super::driver::{FrameCallback, FrameHandle, FrameScheduler, SchedulerError};

#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    next_handle: Cell<FrameHandle>,
    pub cancelled: RefCell<Vec<FrameHandle>>,
    // Simulates a host that still delivers cancelled frames.
    pub ignore_cancel: Cell<bool>,
}

impl ManualFrames {
    /// Runs every queued callback once and returns how many ran.
    pub fn fire(&self, timestamp: f64) -> usize {
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }

    pub fn run_to_end(&self, step_ms: f64) {
        let mut now = 1_000.0;
        while self.fire(now) > 0 {
            now += step_ms;
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Frames ever requested, including ones later cancelled.
    pub fn requested(&self) -> usize {
        self.next_handle.get() as usize
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError> {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.queue.borrow_mut().push((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.cancelled.borrow_mut().push(handle);
        if !self.ignore_cancel.get() {
            self.queue.borrow_mut().retain(|(h, _)| *h != handle);
        }
    }
}

pub struct NoFrames;

impl FrameScheduler for NoFrames {
    fn request_frame(&self, _: FrameCallback) -> Result<FrameHandle, SchedulerError> {
        Err(SchedulerError::NoWindow)
    }

    fn cancel_frame(&self, _: FrameHandle) {}
}
