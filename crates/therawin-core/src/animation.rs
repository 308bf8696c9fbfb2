use std::time::Duration;

/// Symmetric ease-in-out on `t` in `0..=1`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
}

impl AnimationSpec {
    /// The slow ease-in-out used for scene transitions (sky, sun).
    pub fn scene(duration_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Value that transitions smoothly toward its target. Time is passed in by
/// the caller as epoch milliseconds.
#[derive(Clone, Debug)]
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_ms: Option<i64>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_ms: None,
        }
    }

    pub fn set_target(&mut self, target: T, now_ms: i64) {
        // Retarget from wherever we are right now.
        self.update(now_ms);
        self.start = self.current.clone();
        self.target = target;
        self.start_ms = Some(now_ms);
    }

    /// Advances to `now_ms`. Returns `true` while still animating.
    pub fn update(&mut self, now_ms: i64) -> bool {
        let Some(start) = self.start_ms else {
            return false;
        };

        let elapsed = Duration::from_millis(u64::try_from(now_ms.saturating_sub(start)).unwrap_or(0));
        if elapsed >= self.spec.duration {
            self.current = self.target.clone();
            self.start_ms = None;
            return false;
        }

        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.current = self.start.interpolate(&self.target, ease_in_out(t));
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_is_deterministic() {
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::scene(1000));
        a.set_target(10.0, 5_000);

        assert!(a.update(5_250));
        assert!((*a.get() - 1.25).abs() < 0.01);

        assert!(a.update(5_500));
        assert!((*a.get() - 5.0).abs() < 0.01);

        assert!(!a.update(6_000));
        assert!((*a.get() - 10.0).abs() < 0.001);
        assert!(!a.update(7_000));
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::scene(1000));
        a.set_target(100.0, 0);
        a.update(500);
        let midway = *a.get();
        assert!((midway - 50.0).abs() < 0.01);

        a.set_target(0.0, 500);
        assert!((*a.get() - midway).abs() < 0.01);
        assert_eq!(*a.target(), 0.0);
        a.update(1_500);
        assert_eq!(*a.get(), 0.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::scene(0));
        a.set_target(4.0, 10);
        assert!(!a.update(10));
        assert_eq!(*a.get(), 4.0);
    }
}
