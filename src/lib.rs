//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

mod widgets;
mod views;
pub mod gesture;
pub mod range;
pub mod smoothing;
pub mod theme;

pub use gesture::DragGesture;
pub use range::{ParamRange, RangeError, Scale};
pub use smoothing::SmoothedValue;
pub use views::control::{control, Control};
pub use views::meter::{meter, Meter};
pub use widgets::control::{ControlAction, ControlAttributes};

pub use xilem;
