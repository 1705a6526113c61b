use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config;

/// Watches one element and reports when it crosses the visibility
/// threshold. Disconnects when dropped.
pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    pub fn observe(element: &Element, mut on_change: impl FnMut(bool) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                on_change(is_visible(entry.is_intersecting(), entry.intersection_ratio()));
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config::VISIBILITY_THRESHOLD));
        options.set_root_margin(config::VISIBILITY_ROOT_MARGIN);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// Browsers report ratios a hair under the threshold on the crossing frame.
fn is_visible(is_intersecting: bool, ratio: f64) -> bool {
    is_intersecting && ratio + 1e-3 >= config::VISIBILITY_THRESHOLD
}

/// One-shot latch over a stream of visibility changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OnceLatch {
    has_intersected: bool,
}

impl OnceLatch {
    /// Returns `true` exactly once: for the first `visible == true`.
    pub fn observe(&mut self, visible: bool) -> bool {
        if visible && !self.has_intersected {
            self.has_intersected = true;
            return true;
        }
        false
    }

    pub fn has_intersected(&self) -> bool {
        self.has_intersected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_fires_on_first_entry_only() {
        let mut latch = OnceLatch::default();
        let mut starts = 0;
        for _ in 0..3 {
            if latch.observe(true) {
                starts += 1;
            }
            assert!(!latch.observe(false));
        }
        assert_eq!(starts, 1);
        assert!(latch.has_intersected());
    }

    #[test]
    fn hidden_events_do_not_trip_the_latch() {
        let mut latch = OnceLatch::default();
        assert!(!latch.observe(false));
        assert!(!latch.has_intersected());
        assert!(latch.observe(true));
    }

    #[test]
    fn visibility_respects_threshold() {
        assert!(is_visible(true, 0.1));
        assert!(is_visible(true, 0.0995));
        assert!(is_visible(true, 1.0));
        assert!(!is_visible(true, 0.05));
        assert!(!is_visible(false, 0.5));
    }
}
