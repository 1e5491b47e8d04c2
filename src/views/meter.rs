//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::{MessageContext, Mut, View, ViewMarker};
use xilem::core::MessageResult;
use xilem::{Pod, ViewCtx};

use crate::widgets::meter::Meter as MeterWidget;

/// A vertical level meter view.
///
/// Level changes animate smoothly; the widget eases toward the new level on
/// animation frames instead of jumping, so it can sit inside a
/// [`control`](crate::control) as its visual.
pub struct Meter {
    level: f64,
    speed: Option<f64>,
    tint: Option<xilem::masonry::vello::peniko::Color>,
}

/// Create a meter showing `level` in 0..1.
pub fn meter(level: f64) -> Meter {
    Meter { level, speed: None, tint: None }
}

impl Meter {
    /// Fraction of the remaining distance covered per frame.
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn tint(mut self, color: xilem::masonry::vello::peniko::Color) -> Self {
        self.tint = Some(color);
        self
    }
}

impl ViewMarker for Meter {}

impl<State, Action> View<State, Action, ViewCtx> for Meter
where
    State: 'static,
    Action: 'static,
{
    type Element = Pod<MeterWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let mut w = MeterWidget::new(self.level);
        if let Some(s) = self.speed { w = w.with_speed(s); }
        if let Some(c) = self.tint { w = w.with_tint(c); }
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self, prev: &Self, _: &mut (), _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>, _: &mut State,
    ) {
        if prev.speed != self.speed {
            if let Some(s) = self.speed { MeterWidget::set_speed(&mut element, s); }
        }
        if prev.level != self.level { MeterWidget::set_level(&mut element, self.level); }
        if prev.tint != self.tint {
            if let Some(c) = self.tint { MeterWidget::set_tint(&mut element, c); }
        }
    }

    fn teardown(&self, _: &mut (), ctx: &mut ViewCtx, element: Mut<'_, Self::Element>) {
        ctx.teardown_leaf(element);
    }

    fn message(
        &self, _: &mut (), _message: &mut MessageContext,
        _: Mut<'_, Self::Element>, _: &mut State,
    ) -> MessageResult<Action> {
        MessageResult::Stale
    }
}
