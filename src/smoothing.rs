//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use tracing::trace;

/// Fraction of the remaining distance covered per frame.
pub const DEFAULT_SPEED: f64 = 0.01;

/// Distance below which the value counts as arrived.
pub const SETTLE_THRESHOLD: f64 = 0.00001;

/// A number that eases exponentially toward a target, one step per display frame.
///
/// The owner drives it: call [`set_target`](Self::set_target) when the source
/// value changes and [`step`](Self::step) on every animation frame. Both return
/// whether another frame should be requested, so the owner only re-arms its
/// frame callback while the value is still moving.
///
/// ```
/// use xilem_param_control::SmoothedValue;
///
/// let mut v = SmoothedValue::new(0.0).with_speed(0.5);
/// assert!(v.set_target(100.0));
/// assert_eq!(v.get(), 50.0);
/// v.step();
/// assert_eq!(v.get(), 75.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedValue {
    current: f64,
    target: f64,
    speed: f64,
}

impl SmoothedValue {
    pub fn new(initial: f64) -> Self {
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            current: initial,
            target: initial,
            speed: DEFAULT_SPEED,
        }
    }

    /// Speeds outside (0, 1] are clamped; 1 jumps straight to the target.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_nan() {
            DEFAULT_SPEED
        } else {
            speed.clamp(f64::EPSILON, 1.0)
        };
    }

    pub fn get(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target || (self.target - self.current).abs() <= SETTLE_THRESHOLD
    }

    /// Retarget and take one step right away. Non-finite targets are ignored.
    ///
    /// Returns `true` while more frames are needed.
    pub fn set_target(&mut self, target: f64) -> bool {
        if target.is_finite() {
            self.target = target;
        }
        self.step()
    }

    /// Move `speed` of the remaining distance toward the target.
    ///
    /// Returns `true` while more frames are needed. A step that no longer
    /// changes the value in floating point lands on the target, so the
    /// animation always ends.
    pub fn step(&mut self) -> bool {
        // The weighted sum never forms `target - current`, which overflows for
        // far-apart values. Clamping absorbs rounding at either end.
        let next = self.current * (1.0 - self.speed) + self.target * self.speed;
        let next = next.clamp(self.current.min(self.target), self.current.max(self.target));
        if next == self.current {
            self.current = self.target;
        } else {
            self.current = next;
        }
        let moving = !self.is_settled();
        trace!(current = self.current, target = self.target, moving, "smoothing step");
        moving
    }

    /// Jump to the target without animating.
    pub fn snap(&mut self) {
        self.current = self.target;
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
