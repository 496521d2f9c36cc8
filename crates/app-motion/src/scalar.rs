//! Animated scalar
//!
//! A single float driven toward a target over a duration. Starting,
//! retargeting or resetting only records state; the value moves when the
//! owner calls [`AnimatedScalar::tick`]. A new animation always replaces the
//! current one (last writer wins); animations never queue or compose.

use std::time::Duration;

use crate::easing::Easing;

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing was animating
    Idle,
    /// Still animating
    Running,
    /// Reached the target on this tick
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

/// Float value animated by an external frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedScalar {
    value: f32,
    animation: Option<Animation>,
}

impl Default for AnimatedScalar {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimatedScalar {
    /// Create a resting scalar
    pub fn new(value: f32) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the value is heading (the value itself when at rest)
    pub fn target(&self) -> f32 {
        self.animation.map_or(self.value, |a| a.to)
    }

    /// Whether an animation is in flight
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Set the value directly, cancelling any animation
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.animation = None;
    }

    /// Animate from the current value to `to`
    pub fn animate_to(&mut self, to: f32, duration: Duration, easing: Easing) {
        self.animation = Some(Animation {
            from: self.value,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        });
    }

    /// Jump to `from`, then animate to `to`
    pub fn restart(&mut self, from: f32, to: f32, duration: Duration, easing: Easing) {
        self.value = from;
        self.animate_to(to, duration, easing);
    }

    /// Freeze at the current value
    pub fn stop(&mut self) {
        self.animation = None;
    }

    /// Advance by `dt`
    pub fn tick(&mut self, dt: Duration) -> Tick {
        let Some(animation) = self.animation.as_mut() else {
            return Tick::Idle;
        };

        animation.elapsed += dt;
        if animation.elapsed >= animation.duration {
            self.value = animation.to;
            self.animation = None;
            return Tick::Finished;
        }

        let t = animation.elapsed.as_secs_f32() / animation.duration.as_secs_f32();
        let eased = animation.easing.apply(t);
        self.value = animation.from + (animation.to - animation.from) * eased;
        Tick::Running
    }

    /// Map the value from `[0, 1]` onto `[start, end]`
    pub fn interpolate(&self, start: f32, end: f32) -> f32 {
        start + (end - start) * self.value
    }
}
