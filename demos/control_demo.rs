//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::properties::types::{AsUnit, CrossAxisAlignment};
use xilem::masonry::vello::peniko::Color;
use xilem::style::Style;
use xilem::view::{flex_col, flex_row, label};
use xilem::{EventLoop, WidgetView, WindowOptions, Xilem};

use tracing_subscriber::EnvFilter;

use xilem_param_control::{control, meter, ParamRange};

const TEXT_COLOR: Color = Color::from_rgb8(0xDD, 0xCC, 0xCC);
const DIM_TEXT: Color = Color::from_rgb8(0xAA, 0x99, 0x99);
const CYAN: Color = Color::from_rgb8(0x00, 0xC8, 0xE0);

struct DemoState {
    volume_db: f64,
    cutoff_hz: f64,
    dragging: bool,
    gestures: u32,
    volume_range: ParamRange,
    cutoff_range: ParamRange,
}

impl DemoState {
    fn new() -> Result<Self, xilem_param_control::RangeError> {
        Ok(Self {
            volume_db: -12.0,
            cutoff_hz: 1000.0,
            dragging: false,
            gestures: 0,
            volume_range: ParamRange::linear(-60.0, 6.0)?
                .with_step(0.5)
                .with_unit("dB")
                .with_precision(1)
                .with_floor_text("-inf"),
            cutoff_range: ParamRange::exponential(20.0, 20000.0)?
                .with_unit("Hz")
                .with_precision(0),
        })
    }
}

fn app_logic(state: &mut DemoState) -> impl WidgetView<DemoState> + use<> {
    let volume_text = state.volume_range.value_text(state.volume_db);
    let cutoff_text = state.cutoff_range.value_text(state.cutoff_hz);
    let status = if state.dragging {
        "dragging".to_string()
    } else {
        format!("{} gestures", state.gestures)
    };

    flex_col((
        flex_row((
            flex_col((
                label(volume_text).text_size(11.0).color(TEXT_COLOR),
                control(
                    state.volume_db,
                    state.volume_range.clone(),
                    |s: &mut DemoState, v| s.volume_db = v,
                    meter(state.volume_range.normalize(state.volume_db)).speed(0.2),
                )
                .label("Volume")
                .default_value(-12.0)
                .on_gesture_start(|s: &mut DemoState| s.dragging = true)
                .on_gesture_end(|s: &mut DemoState| {
                    s.dragging = false;
                    s.gestures += 1;
                }),
                label("Volume").text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
            flex_col((
                label(cutoff_text).text_size(11.0).color(TEXT_COLOR),
                control(
                    state.cutoff_hz,
                    state.cutoff_range.clone(),
                    |s: &mut DemoState, v| s.cutoff_hz = v,
                    meter(state.cutoff_range.normalize(state.cutoff_hz))
                        .speed(0.05)
                        .tint(CYAN),
                )
                .label("Cutoff")
                .id("cutoff")
                .description("Filter cutoff frequency")
                .tint(CYAN)
                .default_value(1000.0)
                .on_gesture_start(|s: &mut DemoState| s.dragging = true)
                .on_gesture_end(|s: &mut DemoState| {
                    s.dragging = false;
                    s.gestures += 1;
                }),
                label("Cutoff").text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
        ))
        .gap(12.0.px()),
        label("Drag up/down to adjust, double-click to reset").text_size(10.0).color(DIM_TEXT),
        label(status).text_size(10.0).color(DIM_TEXT),
    ))
    .cross_axis_alignment(CrossAxisAlignment::Center)
    .gap(6.0.px())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = Xilem::new_simple(
        DemoState::new()?,
        app_logic,
        WindowOptions::new("Parameter Control Demo")
            .with_initial_inner_size(xilem::winit::dpi::LogicalSize::new(320.0, 260.0)),
    );
    app.run_in(EventLoop::with_user_event())?;
    Ok(())
}
