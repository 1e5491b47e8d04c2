//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use crate::range::ParamRange;

/// Vertical pointer travel, in logical pixels, that sweeps the whole range.
pub const DRAG_TRAVEL: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Anchor {
    y: f64,
    norm: f64,
}

/// Turns vertical pointer drags into parameter values.
///
/// Dragging up increases the value. Movement is relative to where the press
/// happened, so grabbing the control never makes the value jump.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragGesture {
    anchor: Option<Anchor>,
    last: f64,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at pointer height `y` from the current `value`.
    pub fn press(&mut self, y: f64, value: f64, range: &ParamRange) {
        self.anchor = Some(Anchor { y, norm: range.normalize(value) });
        self.last = range.clamp(value);
    }

    /// Follow the pointer to height `y`.
    ///
    /// Returns the new value only when it differs from the last one reported.
    pub fn drag(&mut self, y: f64, range: &ParamRange) -> Option<f64> {
        let anchor = self.anchor?;
        let norm = (anchor.norm + (anchor.y - y) / DRAG_TRAVEL).clamp(0.0, 1.0);
        let value = range.quantize(range.denormalize(norm));
        if (value - self.last).abs() > f64::EPSILON {
            self.last = value;
            Some(value)
        } else {
            None
        }
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}
