//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, EventCtx, LayoutCtx, PaintCtx, PointerEvent, PropertiesMut,
    PropertiesRef, RegisterCtx, Update, UpdateCtx, Widget, WidgetId, WidgetMut,
};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke};
use xilem::masonry::vello::peniko::{Color, Fill};

use smallvec::SmallVec;
use tracing::trace_span;

use crate::smoothing::SmoothedValue;
use crate::theme::{DEFAULT_TINT, TRACK_COLOR};

const METER_WIDTH: f64 = 24.0;
const METER_HEIGHT: f64 = 120.0;
const INSET: f64 = 3.0;
const CORNER_RADIUS: f64 = 3.0;

/// A vertical bar showing a 0..1 level.
///
/// The drawn level eases toward the set level through a [`SmoothedValue`],
/// stepped once per animation frame until it settles.
pub struct Meter {
    level: SmoothedValue,
    tint: Color,
}

impl Meter {
    pub fn new(level: f64) -> Self {
        Self {
            level: SmoothedValue::new(level.clamp(0.0, 1.0)),
            tint: DEFAULT_TINT,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.level.set_speed(speed);
        self
    }

    pub fn with_tint(mut self, color: Color) -> Self {
        self.tint = color;
        self
    }

    /// Level being drawn right now.
    pub fn displayed_level(&self) -> f64 {
        self.level.get()
    }

    /// Returns `true` while the bar needs another frame.
    fn retarget(&mut self, level: f64) -> bool {
        self.level.set_target(level.clamp(0.0, 1.0))
    }

    /// One animation frame. Returns `true` while the bar needs another.
    fn advance(&mut self) -> bool {
        self.level.step()
    }

    pub fn set_level(this: &mut WidgetMut<'_, Self>, level: f64) {
        if this.widget.retarget(level) {
            this.ctx.request_anim_frame();
        }
        this.ctx.request_render();
        this.ctx.request_accessibility_update();
    }

    pub fn set_speed(this: &mut WidgetMut<'_, Self>, speed: f64) {
        this.widget.level.set_speed(speed);
    }

    pub fn set_tint(this: &mut WidgetMut<'_, Self>, color: Color) {
        this.widget.tint = color;
        this.ctx.request_render();
    }
}

impl Widget for Meter {
    type Action = ();

    fn on_pointer_event(
        &mut self,
        _ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &PointerEvent,
    ) {
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn on_anim_frame(
        &mut self,
        ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _interval: u64,
    ) {
        if self.advance() {
            ctx.request_anim_frame();
        }
        ctx.request_render();
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        if matches!(event, Update::WidgetAdded) && !self.level.is_settled() {
            ctx.request_anim_frame();
        }
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        bc.constrain(Size::new(METER_WIDTH, METER_HEIGHT))
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let size = ctx.size();
        let bounds = Rect::from_origin_size(Point::ZERO, size);
        let frame = RoundedRect::from_rect(bounds, CORNER_RADIUS);
        scene.fill(Fill::NonZero, Affine::IDENTITY, TRACK_COLOR, None, &frame);

        // Lit fill grows from the bottom
        let inner_h = (size.height - INSET * 2.0).max(0.0);
        let lit_h = inner_h * self.level.get().clamp(0.0, 1.0);
        if lit_h > 0.0 {
            let bottom = size.height - INSET;
            let lit = Rect::new(INSET, bottom - lit_h, size.width - INSET, bottom);
            scene.fill(Fill::NonZero, Affine::IDENTITY, self.tint, None, &lit);
        }

        let border = if ctx.is_hovered() {
            Color::from_rgb8(0x80, 0x80, 0x80)
        } else {
            Color::from_rgb8(0x60, 0x60, 0x60)
        };
        scene.stroke(&Stroke::new(1.0), Affine::IDENTITY, border, None, &frame);
    }

    fn accessibility_role(&self) -> Role {
        Role::Meter
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_numeric_value(self.level.target());
        node.set_min_numeric_value(0.0);
        node.set_max_numeric_value(1.0);
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> {
        SmallVec::new()
    }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("Meter", id = id.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_loop_stops_once_settled() {
        let mut meter = Meter::new(0.0).with_speed(0.5);
        let mut frames = 0;
        let mut more = meter.retarget(1.0);
        assert_eq!(meter.displayed_level(), 0.5);
        while more {
            more = meter.advance();
            frames += 1;
            assert!(frames < 100);
        }
        assert!((meter.displayed_level() - 1.0).abs() <= 1e-5);
        assert!(!meter.advance());
    }

    #[test]
    fn level_is_clamped_to_unit_range() {
        let mut meter = Meter::new(3.0).with_speed(1.0);
        assert_eq!(meter.displayed_level(), 1.0);
        assert!(!meter.retarget(-2.0));
        assert_eq!(meter.displayed_level(), 0.0);
    }
}
