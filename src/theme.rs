//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::peniko::Color;

/// Default tint color: a shining orange.
pub const DEFAULT_TINT: Color = Color::from_rgb8(0xFF, 0x8C, 0x00);

/// Unlit groove behind meters.
pub const TRACK_COLOR: Color = Color::from_rgb8(0x30, 0x30, 0x30);
