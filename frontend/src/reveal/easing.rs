/// Maps normalized time in `[0, 1]` to normalized progress in `[0, 1]`.
pub type EasingFn = fn(f64) -> f64;

/// An easing curve as a component prop. Compared by function address.
#[derive(Clone, Copy, Debug)]
pub struct Easing(pub EasingFn);

impl Easing {
    pub const OUT_CUBIC: Easing = Easing(ease_out_cubic);
    pub const OUT_EXPO: Easing = Easing(ease_out_expo);

    pub fn curve(self) -> EasingFn {
        self.0
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.0, other.0)
    }
}

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        for easing in [linear as EasingFn, ease_out_cubic, ease_out_expo] {
            assert_eq!(easing(0.0), 0.0);
            assert_eq!(easing(1.0), 1.0);
        }
    }

    #[test]
    fn ease_out_front_loads_progress() {
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert!((ease_out_expo(0.5) - (1.0 - 1.0 / 32.0)).abs() < 1e-12);
        assert!(ease_out_expo(0.5) > ease_out_cubic(0.5));
    }

    #[test]
    fn monotonic() {
        let mut previous = (0.0, 0.0);
        for step in 1..=100 {
            let t = step as f64 / 100.0;
            let now = (ease_out_cubic(t), ease_out_expo(t));
            assert!(now.0 >= previous.0);
            assert!(now.1 >= previous.1);
            previous = now;
        }
    }

    #[test]
    fn easing_props_compare_by_curve() {
        assert_eq!(Easing::OUT_EXPO, Easing(ease_out_expo));
        assert_ne!(Easing::OUT_EXPO, Easing::OUT_CUBIC);
        assert_eq!((Easing::OUT_CUBIC.curve())(0.5), ease_out_cubic(0.5));
    }
}
