use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::easing::EasingFn;

pub type FrameHandle = i32;
pub type FrameCallback = Box<dyn FnOnce(f64)>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("no browser window to schedule frames on")]
    NoWindow,
    #[error("requestAnimationFrame failed: {0}")]
    RequestFailed(String),
}

/// Per-frame scheduling capability. Callbacks receive the frame timestamp in
/// milliseconds.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError>;
    fn cancel_frame(&self, handle: FrameHandle);
}

pub struct BrowserFrames {
    window: web_sys::Window,
}

impl BrowserFrames {
    pub fn new() -> Result<Self, SchedulerError> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or(SchedulerError::NoWindow)
    }
}

impl FrameScheduler for BrowserFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, SchedulerError> {
        // Freed by wasm-bindgen once invoked. A cancelled frame keeps its
        // closure alive, which is one small allocation per teardown.
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| SchedulerError::RequestFailed(format!("{:?}", e)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle, e);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub current_value: i64,
    pub start_timestamp: Option<f64>,
    pub is_running: bool,
    pub is_complete: bool,
}

#[derive(Default)]
struct Shared {
    state: AnimationState,
    pending: Option<FrameHandle>,
    // Bumped by every run and cancel; ticks from an older run are dropped.
    generation: u64,
}

struct Run<S: FrameScheduler + 'static> {
    shared: Rc<RefCell<Shared>>,
    scheduler: Rc<S>,
    generation: u64,
    target: i64,
    duration_ms: f64,
    easing: EasingFn,
    on_frame: RefCell<Box<dyn FnMut(i64)>>,
    on_complete: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl<S: FrameScheduler + 'static> Run<S> {
    fn is_current(&self) -> bool {
        self.shared.borrow().generation == self.generation
    }
}

/// Drives one integer from 0 to a target, one step per frame.
pub struct Animator<S: FrameScheduler + 'static> {
    shared: Rc<RefCell<Shared>>,
    scheduler: Rc<S>,
}

impl<S: FrameScheduler + 'static> Animator<S> {
    pub fn new(scheduler: Rc<S>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared::default())),
            scheduler,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.shared.borrow().state.clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().state.is_running
    }

    /// Starts animating towards `target`. A call while a run is in flight is
    /// ignored. Only the first frame request can fail here; later failures
    /// are logged and end the run.
    pub fn run(
        &self,
        target: i64,
        duration_ms: f64,
        easing: EasingFn,
        on_frame: impl FnMut(i64) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<(), SchedulerError> {
        let generation = {
            let mut shared = self.shared.borrow_mut();
            if shared.state.is_running {
                log::debug!("Animator already running, ignoring run({})", target);
                return Ok(());
            }
            shared.generation += 1;
            shared.state = AnimationState {
                is_running: true,
                ..AnimationState::default()
            };
            shared.generation
        };

        let run = Rc::new(Run {
            shared: Rc::clone(&self.shared),
            scheduler: Rc::clone(&self.scheduler),
            generation,
            target,
            duration_ms,
            easing,
            on_frame: RefCell::new(Box::new(on_frame)),
            on_complete: RefCell::new(Some(Box::new(on_complete))),
        });

        if let Err(e) = schedule(run) {
            self.shared.borrow_mut().state.is_running = false;
            return Err(e);
        }
        Ok(())
    }

    /// Stops any run and resets the state. Safe to call at any time.
    pub fn cancel(&self) {
        let pending = {
            let mut shared = self.shared.borrow_mut();
            shared.generation += 1;
            shared.state = AnimationState::default();
            shared.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<S: FrameScheduler + 'static> Drop for Animator<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule<S: FrameScheduler + 'static>(run: Rc<Run<S>>) -> Result<(), SchedulerError> {
    let next = Rc::clone(&run);
    let handle = run
        .scheduler
        .request_frame(Box::new(move |timestamp| tick(next, timestamp)))?;
    run.shared.borrow_mut().pending = Some(handle);
    Ok(())
}

fn tick<S: FrameScheduler + 'static>(run: Rc<Run<S>>, timestamp: f64) {
    let progress = {
        let mut shared = run.shared.borrow_mut();
        if shared.generation != run.generation || !shared.state.is_running {
            return;
        }
        shared.pending = None;
        let start = *shared.state.start_timestamp.get_or_insert(timestamp);
        if run.duration_ms > 0.0 {
            ((timestamp - start) / run.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    };

    if progress < 1.0 {
        let eased = (run.easing)(progress).clamp(0.0, 1.0);
        let value = (eased * run.target as f64).floor() as i64;
        run.shared.borrow_mut().state.current_value = value;
        {
            let mut on_frame = run.on_frame.borrow_mut();
            (*on_frame)(value);
        }
        if !run.is_current() {
            return;
        }
        if let Err(e) = schedule(Rc::clone(&run)) {
            log::error!("Stopping counter animation: {}", e);
            run.shared.borrow_mut().state.is_running = false;
        }
        return;
    }

    {
        let mut shared = run.shared.borrow_mut();
        shared.state.current_value = run.target;
        shared.state.is_running = false;
        shared.state.is_complete = true;
    }
    // Exact target last, so floor() never leaves the display short.
    {
        let mut on_frame = run.on_frame.borrow_mut();
        (*on_frame)(run.target);
    }
    if !run.is_current() {
        return;
    }
    let on_complete = run.on_complete.borrow_mut().take();
    if let Some(on_complete) = on_complete {
        on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::easing::{ease_out_cubic, ease_out_expo, linear};
    use crate::reveal::testing::{ManualFrames, NoFrames};
    use std::cell::Cell;

    #[derive(Debug, PartialEq)]
    enum Event {
        Frame(i64),
        Complete,
    }

    fn recorder() -> (Rc<RefCell<Vec<Event>>>, impl FnMut(i64), impl FnOnce()) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let frames = Rc::clone(&events);
        let done = Rc::clone(&events);
        (
            events,
            move |value| frames.borrow_mut().push(Event::Frame(value)),
            move || done.borrow_mut().push(Event::Complete),
        )
    }

    #[test]
    fn final_frame_is_the_exact_target() {
        let cases: [(i64, EasingFn); 3] = [(1_000, ease_out_expo), (7, ease_out_cubic), (2_400, linear)];
        for (target, easing) in cases {
            let frames = Rc::new(ManualFrames::default());
            let animator = Animator::new(Rc::clone(&frames));
            let (events, on_frame, on_complete) = recorder();

            animator.run(target, 100.0, easing, on_frame, on_complete).unwrap();
            frames.run_to_end(16.0);

            let events = events.borrow();
            let n = events.len();
            assert_eq!(events[n - 2], Event::Frame(target));
            assert_eq!(events[n - 1], Event::Complete);
            assert_eq!(events.iter().filter(|e| **e == Event::Complete).count(), 1);

            let state = animator.state();
            assert_eq!(state.current_value, target);
            assert!(state.is_complete);
            assert!(!state.is_running);
        }
    }

    #[test]
    fn values_never_decrease() {
        let frames = Rc::new(ManualFrames::default());
        let animator = Animator::new(Rc::clone(&frames));
        let (events, on_frame, on_complete) = recorder();

        animator.run(15_000, 2_000.0, ease_out_expo, on_frame, on_complete).unwrap();
        frames.run_to_end(16.7);

        let values: Vec<i64> = events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Frame(v) => Some(*v),
                Event::Complete => None,
            })
            .collect();
        assert_eq!(values.first(), Some(&0));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn cancel_resets_state() {
        let frames = Rc::new(ManualFrames::default());
        let animator = Animator::new(Rc::clone(&frames));
        let (events, on_frame, on_complete) = recorder();

        animator.run(1_000, 100.0, ease_out_expo, on_frame, on_complete).unwrap();
        frames.fire(0.0);
        frames.fire(50.0);
        assert!(animator.state().current_value > 0);

        animator.cancel();
        let state = animator.state();
        assert_eq!(state.current_value, 0);
        assert!(!state.is_running);
        assert!(!state.is_complete);
        assert_eq!(state.start_timestamp, None);
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.cancelled.borrow().len(), 1);

        let seen = events.borrow().len();
        frames.fire(200.0);
        assert_eq!(events.borrow().len(), seen);
    }

    #[test]
    fn stale_frames_after_cancel_are_ignored() {
        let frames = Rc::new(ManualFrames::default());
        frames.ignore_cancel.set(true);
        let animator = Animator::new(Rc::clone(&frames));
        let (events, on_frame, on_complete) = recorder();

        animator.run(500, 100.0, linear, on_frame, on_complete).unwrap();
        frames.fire(0.0);
        animator.cancel();
        assert_eq!(frames.fire(500.0), 1);

        assert_eq!(*events.borrow(), vec![Event::Frame(0)]);
        assert_eq!(animator.state(), AnimationState::default());
    }

    #[test]
    fn cancel_is_idempotent() {
        let frames = Rc::new(ManualFrames::default());
        let animator = Animator::new(Rc::clone(&frames));
        animator.cancel();
        animator.cancel();
        assert_eq!(animator.state(), AnimationState::default());
        assert!(frames.cancelled.borrow().is_empty());
    }

    #[test]
    fn second_run_while_running_is_ignored() {
        let frames = Rc::new(ManualFrames::default());
        let animator = Animator::new(Rc::clone(&frames));
        let completions = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let completions = Rc::clone(&completions);
            animator
                .run(100, 50.0, ease_out_expo, |_| {}, move || completions.set(completions.get() + 1))
                .unwrap();
        }
        assert_eq!(frames.pending(), 1);

        frames.run_to_end(16.0);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn can_run_again_after_completion() {
        let frames = Rc::new(ManualFrames::default());
        let animator = Animator::new(Rc::clone(&frames));

        animator.run(10, 0.0, linear, |_| {}, || {}).unwrap();
        frames.run_to_end(16.0);
        assert!(animator.state().is_complete);

        let (events, on_frame, on_complete) = recorder();
        animator.run(20, 0.0, linear, on_frame, on_complete).unwrap();
        frames.run_to_end(16.0);
        assert_eq!(*events.borrow(), vec![Event::Frame(20), Event::Complete]);
    }

    #[test]
    fn dropping_cancels_the_pending_frame() {
        let frames = Rc::new(ManualFrames::default());
        let (events, on_frame, on_complete) = recorder();
        {
            let animator = Animator::new(Rc::clone(&frames));
            animator.run(100, 100.0, linear, on_frame, on_complete).unwrap();
        }
        assert_eq!(frames.pending(), 0);
        frames.fire(0.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn scheduler_failure_is_reported() {
        let animator = Animator::new(Rc::new(NoFrames));
        let result = animator.run(10, 100.0, linear, |_| {}, || {});
        assert_eq!(result, Err(SchedulerError::NoWindow));
        assert!(!animator.is_running());
    }
}
