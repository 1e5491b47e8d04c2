//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use thiserror::Error;

/// Errors from building a [`ParamRange`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("range bounds must be finite, got {0}..{1}")]
    NonFinite(f64, f64),

    #[error("range {0}..{0} is empty")]
    Empty(f64),

    #[error("exponential range needs positive bounds, got {0}..{1}")]
    NonPositiveExponential(f64, f64),
}

/// How positions along the control map onto parameter values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// Equal travel gives equal value change.
    Linear,
    /// Equal travel gives equal ratio change. Suited for frequencies.
    Exponential,
}

/// Bounds and display rules of a parameter.
///
/// `start` may be larger than `end` for inverted parameters. Positions are
/// always expressed as a normalized 0..1 fraction from `start` to `end`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamRange {
    start: f64,
    end: f64,
    scale: Scale,
    step: Option<f64>,
    unit: String,
    precision: usize,
    floor_text: Option<String>,
}

impl ParamRange {
    /// The normalized 0..1 range.
    pub fn unit() -> Self {
        Self::build(0.0, 1.0, Scale::Linear)
    }

    pub fn linear(start: f64, end: f64) -> Result<Self, RangeError> {
        Self::check_bounds(start, end)?;
        Ok(Self::build(start, end, Scale::Linear))
    }

    pub fn exponential(start: f64, end: f64) -> Result<Self, RangeError> {
        Self::check_bounds(start, end)?;
        if start <= 0.0 || end <= 0.0 {
            return Err(RangeError::NonPositiveExponential(start, end));
        }
        Ok(Self::build(start, end, Scale::Exponential))
    }

    fn check_bounds(start: f64, end: f64) -> Result<(), RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFinite(start, end));
        }
        if start == end {
            return Err(RangeError::Empty(start));
        }
        Ok(())
    }

    fn build(start: f64, end: f64, scale: Scale) -> Self {
        Self {
            start,
            end,
            scale,
            step: None,
            unit: String::new(),
            precision: 2,
            floor_text: None,
        }
    }

    /// Snap values to multiples of `step` counted from `start`. Non-positive steps are ignored.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = (step > 0.0 && step.is_finite()).then_some(step);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Text shown instead of the number when the value sits at or beyond `start`,
    /// e.g. `-inf` for a gain fader.
    pub fn with_floor_text(mut self, text: impl Into<String>) -> Self {
        self.floor_text = Some(text.into());
        self
    }

    pub fn start(&self) -> f64 { self.start }
    pub fn end(&self) -> f64 { self.end }
    pub fn scale(&self) -> Scale { self.scale }
    pub fn step(&self) -> Option<f64> { self.step }

    fn lo(&self) -> f64 { self.start.min(self.end) }
    fn hi(&self) -> f64 { self.start.max(self.end) }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.start;
        }
        value.clamp(self.lo(), self.hi())
    }

    /// Position of `value` as a 0..1 fraction from `start` to `end`.
    pub fn normalize(&self, value: f64) -> f64 {
        let v = self.clamp(value);
        let n = match self.scale {
            Scale::Linear => (v - self.start) / (self.end - self.start),
            Scale::Exponential => (v / self.start).ln() / (self.end / self.start).ln(),
        };
        n.clamp(0.0, 1.0)
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, norm: f64) -> f64 {
        let n = if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) };
        let v = match self.scale {
            Scale::Linear => self.start + n * (self.end - self.start),
            Scale::Exponential => self.start * (self.end / self.start).powf(n),
        };
        self.clamp(v)
    }

    pub fn quantize(&self, value: f64) -> f64 {
        match self.step {
            Some(step) => {
                let steps = ((value - self.start) / step).round();
                self.clamp(self.start + steps * step)
            }
            None => self.clamp(value),
        }
    }

    /// Human-readable text for `value`, used as the accessible value text.
    pub fn value_text(&self, value: f64) -> String {
        let at_floor = if self.start <= self.end {
            value <= self.start
        } else {
            value >= self.start
        };
        let number = match &self.floor_text {
            Some(text) if at_floor => text.clone(),
            _ => format!("{:.*}", self.precision, value),
        };
        if self.unit.is_empty() {
            number
        } else {
            format!("{number} {}", self.unit)
        }
    }
}

impl Default for ParamRange {
    fn default() -> Self {
        Self::unit()
    }
}
