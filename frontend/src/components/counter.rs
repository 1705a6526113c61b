use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

use crate::config;
use crate::reveal::driver::{Animator, BrowserFrames, FrameScheduler};
use crate::reveal::easing::Easing;
use crate::reveal::format::format;
use crate::reveal::parser::{parse, ParsedMagnitude, RawValue};
use crate::reveal::visibility::{OnceLatch, VisibilityObserver};

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub value: RawValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub prefix: AttrValue,
    #[prop_or_default]
    pub suffix: AttrValue,
    #[prop_or(config::COUNTER_DURATION_MS)]
    pub duration_ms: u32,
    #[prop_or_default]
    pub start_delay_ms: u32,
    #[prop_or(Easing::OUT_EXPO)]
    pub easing: Easing,
}

/// Runs a callback once after a delay. Dropping the returned handle
/// cancels the callback if it has not run yet.
pub trait StartDelay {
    type Pending;

    fn after(&self, ms: u32, callback: Box<dyn FnOnce()>) -> Self::Pending;
}

pub struct BrowserTimers;

impl StartDelay for BrowserTimers {
    type Pending = Timeout;

    fn after(&self, ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(ms, callback)
    }
}

/// Everything a counter owns between mount and unmount.
struct Reveal<S: FrameScheduler + 'static, D: StartDelay> {
    frames: Rc<S>,
    timers: D,
    latch: OnceLatch,
    observer: Option<VisibilityObserver>,
    delay: Option<D::Pending>,
    animator: Option<Animator<S>>,
}

impl<S: FrameScheduler + 'static, D: StartDelay> Reveal<S, D> {
    fn new(frames: Rc<S>, timers: D) -> Self {
        Self {
            frames,
            timers,
            latch: OnceLatch::default(),
            observer: None,
            delay: None,
            animator: None,
        }
    }

    fn teardown(&mut self) {
        drop(self.observer.take());
        drop(self.delay.take());
        if let Some(animator) = self.animator.take() {
            if animator.is_running() {
                log::debug!("Counter unmounted mid-run at {}", animator.state().current_value);
            }
            animator.cancel();
        }
    }
}

#[derive(Clone)]
struct RevealContext {
    magnitude: ParsedMagnitude,
    display: Callback<String>,
    prefix: AttrValue,
    suffix: AttrValue,
    duration_ms: u32,
    start_delay_ms: u32,
    easing: Easing,
}

impl RevealContext {
    fn render(&self, value: i64) -> String {
        format(value, &self.magnitude, &self.prefix, &self.suffix)
    }

    fn show_final(&self) {
        self.display.emit(self.render(self.magnitude.animation_target()));
    }
}

fn on_visible<S, D>(reveal: &Weak<RefCell<Reveal<S, D>>>, ctx: &RevealContext, visible: bool)
where
    S: FrameScheduler + 'static,
    D: StartDelay + 'static,
{
    let reveal = match reveal.upgrade() {
        Some(reveal) => reveal,
        None => return,
    };
    if !reveal.borrow_mut().latch.observe(visible) {
        return;
    }

    if ctx.start_delay_ms == 0 {
        start(&reveal, ctx);
        return;
    }

    let weak = Rc::downgrade(&reveal);
    let delayed = ctx.clone();
    let pending = reveal.borrow().timers.after(
        ctx.start_delay_ms,
        Box::new(move || {
            if let Some(reveal) = weak.upgrade() {
                start(&reveal, &delayed);
            }
        }),
    );
    reveal.borrow_mut().delay = Some(pending);
}

fn start<S, D>(reveal: &Rc<RefCell<Reveal<S, D>>>, ctx: &RevealContext)
where
    S: FrameScheduler + 'static,
    D: StartDelay,
{
    let target = ctx.magnitude.animation_target();
    let (mantissa, scale) = (ctx.magnitude.mantissa(), ctx.magnitude.scale());
    let animator = Animator::new(Rc::clone(&reveal.borrow().frames));
    let frame_ctx = ctx.clone();
    let result = animator.run(
        target,
        ctx.duration_ms as f64,
        ctx.easing.curve(),
        move |value| frame_ctx.display.emit(frame_ctx.render(value)),
        move || log::debug!("Counter reached {} ({:?})", mantissa, scale),
    );
    if let Err(e) = result {
        log::error!("Cannot animate counter: {}", e);
        ctx.show_final();
        return;
    }
    reveal.borrow_mut().animator = Some(animator);
}

#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let node = use_node_ref();
    let parsed = (*use_state(|| parse(&props.value))).clone();
    let display = {
        let parsed = parsed.clone();
        let raw = props.value.to_string();
        let (prefix, suffix) = (props.prefix.clone(), props.suffix.clone());
        use_state(move || match parsed {
            Ok(magnitude) => format(0, &magnitude, &prefix, &suffix),
            Err(_) => raw,
        })
    };

    {
        let node = node.clone();
        let parsed = parsed.clone();
        let setter = display.clone();
        let ctx = parsed.as_ref().ok().map(|magnitude| RevealContext {
            magnitude: *magnitude,
            display: Callback::from(move |text: String| setter.set(text)),
            prefix: props.prefix.clone(),
            suffix: props.suffix.clone(),
            duration_ms: props.duration_ms,
            start_delay_ms: props.start_delay_ms,
            easing: props.easing,
        });
        let raw = props.value.clone();
        use_effect_with_deps(
            move |_| {
                let mut mounted = None;
                match (ctx, node.cast::<Element>()) {
                    (Some(ctx), Some(element)) => match BrowserFrames::new() {
                        Ok(frames) => {
                            let reveal = Rc::new(RefCell::new(Reveal::new(Rc::new(frames), BrowserTimers)));
                            let weak = Rc::downgrade(&reveal);
                            let observer_ctx = ctx.clone();
                            let observed = VisibilityObserver::observe(&element, move |visible| {
                                on_visible(&weak, &observer_ctx, visible)
                            });
                            match observed {
                                Ok(observer) => reveal.borrow_mut().observer = Some(observer),
                                Err(e) => {
                                    log::warn!("IntersectionObserver unavailable ({:?}), revealing now", e);
                                    on_visible(&Rc::downgrade(&reveal), &ctx, true);
                                }
                            }
                            mounted = Some(reveal);
                        }
                        Err(e) => {
                            log::error!("Cannot animate counter: {}", e);
                            ctx.show_final();
                        }
                    },
                    (Some(_), None) => log::warn!("Counter mounted without an element"),
                    (None, _) => {
                        if let Err(e) = parsed {
                            log::warn!("Counter value {:?} not animated: {}", raw.to_string(), e);
                        }
                    }
                }
                move || {
                    if let Some(reveal) = mounted {
                        reveal.borrow_mut().teardown();
                    }
                }
            },
            (),
        );
    }

    html! {
        <div class={classes!("counter", parsed.is_err().then(|| "counter-invalid"))} ref={node}>
            <span class="counter-value">{(*display).clone()}</span>
            <span class="counter-label">{props.label.clone()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::testing::ManualFrames;
    use std::cell::Cell;

    type Queued = (u32, Rc<Cell<bool>>, Box<dyn FnOnce()>);

    /// Delays that run only when the test says so.
    #[derive(Clone, Default)]
    struct ManualDelays {
        queue: Rc<RefCell<Vec<Queued>>>,
    }

    struct PendingDelay(Rc<Cell<bool>>);

    impl Drop for PendingDelay {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    impl ManualDelays {
        /// Runs every queued callback that was not cancelled.
        fn fire(&self) -> usize {
            let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            let mut ran = 0;
            for (_, cancelled, callback) in due {
                if !cancelled.get() {
                    callback();
                    ran += 1;
                }
            }
            ran
        }

        fn waiting(&self) -> usize {
            self.queue.borrow().iter().filter(|(_, cancelled, _)| !cancelled.get()).count()
        }
    }

    impl StartDelay for ManualDelays {
        type Pending = PendingDelay;

        fn after(&self, ms: u32, callback: Box<dyn FnOnce()>) -> PendingDelay {
            let cancelled = Rc::new(Cell::new(false));
            self.queue.borrow_mut().push((ms, Rc::clone(&cancelled), callback));
            PendingDelay(cancelled)
        }
    }

    struct Harness {
        frames: Rc<ManualFrames>,
        delays: ManualDelays,
        reveal: Rc<RefCell<Reveal<ManualFrames, ManualDelays>>>,
        shown: Rc<RefCell<Vec<String>>>,
        ctx: RevealContext,
    }

    fn harness(value: &str, start_delay_ms: u32) -> Harness {
        let frames = Rc::new(ManualFrames::default());
        let delays = ManualDelays::default();
        let reveal = Rc::new(RefCell::new(Reveal::new(Rc::clone(&frames), delays.clone())));
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shown);
        let ctx = RevealContext {
            magnitude: parse(&RawValue::from(value)).unwrap(),
            display: Callback::from(move |text: String| sink.borrow_mut().push(text)),
            prefix: AttrValue::default(),
            suffix: AttrValue::from("+"),
            duration_ms: 100,
            start_delay_ms,
            easing: Easing::OUT_EXPO,
        };
        Harness { frames, delays, reveal, shown, ctx }
    }

    impl Harness {
        fn visible(&self, visible: bool) {
            on_visible(&Rc::downgrade(&self.reveal), &self.ctx, visible);
        }
    }

    #[test]
    fn only_the_first_entry_starts_the_count() {
        let h = harness("15K+", 0);
        for visible in [true, false, true, false, true, false] {
            h.visible(visible);
        }
        assert!(h.reveal.borrow().animator.is_some());
        assert_eq!(h.frames.requested(), 1);
        assert_eq!(h.frames.pending(), 1);

        h.frames.run_to_end(16.0);
        assert_eq!(h.shown.borrow().last().map(String::as_str), Some("15K+"));
    }

    #[test]
    fn exits_before_the_first_entry_do_nothing() {
        let h = harness("15K+", 0);
        h.visible(false);
        h.visible(false);
        assert!(h.reveal.borrow().animator.is_none());
        assert_eq!(h.frames.requested(), 0);
    }

    #[test]
    fn teardown_cancels_the_pending_frame() {
        let h = harness("2.4B", 0);
        h.visible(true);
        h.frames.fire(0.0);
        h.frames.fire(16.0);
        assert_eq!(h.frames.pending(), 1);

        h.reveal.borrow_mut().teardown();
        assert_eq!(h.frames.pending(), 0);
        assert!(h.reveal.borrow().animator.is_none());

        let seen = h.shown.borrow().len();
        h.frames.fire(500.0);
        assert_eq!(h.shown.borrow().len(), seen);
    }

    #[test]
    fn start_delay_waits_then_counts() {
        let h = harness("500", 300);
        h.visible(true);
        assert_eq!(h.frames.requested(), 0);
        assert_eq!(h.delays.queue.borrow()[0].0, 300);

        assert_eq!(h.delays.fire(), 1);
        assert_eq!(h.frames.pending(), 1);
        h.frames.run_to_end(16.0);
        assert_eq!(h.shown.borrow().last().map(String::as_str), Some("500+"));
    }

    #[test]
    fn teardown_cancels_the_start_delay() {
        let h = harness("500", 300);
        h.visible(true);
        assert_eq!(h.delays.waiting(), 1);

        h.reveal.borrow_mut().teardown();
        assert_eq!(h.delays.waiting(), 0);
        assert_eq!(h.delays.fire(), 0);
        assert_eq!(h.frames.requested(), 0);
        assert!(h.shown.borrow().is_empty());
    }

    #[test]
    fn unmounted_counter_ignores_late_visibility() {
        let h = harness("500", 0);
        let weak = Rc::downgrade(&h.reveal);
        drop(h.reveal);
        on_visible(&weak, &h.ctx, true);
        assert_eq!(h.frames.requested(), 0);
    }
}
