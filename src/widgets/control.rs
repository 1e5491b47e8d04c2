//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::accesskit::{Action, ActionData, Node, Role};
use xilem::masonry::core::{
    AccessCtx, AccessEvent, BoxConstraints, EventCtx, LayoutCtx, NewWidget, PaintCtx,
    PointerButtonEvent, PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx,
    Update, UpdateCtx, Widget, WidgetId, WidgetMut, WidgetPod,
};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Point, Rect, RoundedRect, Size, Stroke};
use xilem::masonry::vello::peniko::Color;

use smallvec::SmallVec;
use tracing::{debug, trace_span};

use crate::gesture::DragGesture;
use crate::range::ParamRange;
use crate::theme::DEFAULT_TINT;

const OUTLINE_RADIUS: f64 = 3.0;
const OUTLINE_WIDTH: f64 = 1.0;
/// Fraction of the range moved by an accessibility increment when the range has no step.
const ACCESS_STEP_FRACTION: f64 = 0.01;

/// Messages a [`Control`] widget sends to its view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    /// A press began. Sent before [`Start`](Self::Start).
    GestureStart,
    /// The drag gesture took hold of the value.
    Start,
    /// The value should become this.
    Change(f64),
    /// The press that sent `GestureStart` was released.
    GestureEnd,
}

/// Attributes passed through untouched to the root widget.
///
/// Pointer handling is not part of this set: the control's own press,
/// drag and release handling always applies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlAttributes {
    /// Stable id exposed to assistive technology and UI automation.
    pub id: Option<String>,
    pub description: Option<String>,
    pub tint: Option<Color>,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PressState {
    Idle,
    Active,
}

/// The value a double press resets to.
///
/// Zero and NaN count as "no default configured", the same as `None`.
pub(crate) fn reset_target(default_value: Option<f64>) -> Option<f64> {
    default_value.filter(|d| *d != 0.0 && !d.is_nan())
}

/// Press/drag/release bookkeeping, free of any widget context.
#[derive(Clone, Debug)]
pub(crate) struct ControlState {
    pub(crate) value: f64,
    pub(crate) range: ParamRange,
    pub(crate) default_value: Option<f64>,
    press: PressState,
    drag: DragGesture,
    disabled: bool,
}

impl ControlState {
    pub(crate) fn new(value: f64, range: ParamRange, default_value: Option<f64>) -> Self {
        Self {
            value,
            range,
            default_value,
            press: PressState::Idle,
            drag: DragGesture::new(),
            disabled: false,
        }
    }

    pub(crate) fn press_state(&self) -> PressState {
        self.press
    }

    /// A disabled control ignores presses, drags and accessibility actions.
    ///
    /// A press that is already active stays active so its release still ends
    /// the gesture.
    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Take the value the owner reports. Returns `true` if it differs from ours.
    pub(crate) fn sync_value(&mut self, value: f64) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    /// Pointer down at height `y`. `double` marks the second press of a double click.
    pub(crate) fn press(&mut self, y: f64, double: bool) -> SmallVec<[ControlAction; 3]> {
        let mut actions = SmallVec::new();
        if self.disabled {
            return actions;
        }
        if self.press == PressState::Idle {
            self.press = PressState::Active;
            actions.push(ControlAction::GestureStart);
        }
        actions.push(ControlAction::Start);
        if double {
            if let Some(default) = reset_target(self.default_value) {
                debug!(default, "control reset to default");
                self.value = default;
                actions.push(ControlAction::Change(default));
            }
        }
        self.drag.press(y, self.value, &self.range);
        actions
    }

    pub(crate) fn drag_to(&mut self, y: f64) -> Option<ControlAction> {
        if self.press != PressState::Active || self.disabled {
            return None;
        }
        let value = self.drag.drag(y, &self.range)?;
        self.value = value;
        Some(ControlAction::Change(value))
    }

    /// First release after a press ends the gesture; later ones are ignored.
    ///
    /// Pointer cancel and losing the press to a disabled ancestor end it the same way.
    pub(crate) fn release(&mut self) -> Option<ControlAction> {
        self.drag.release();
        match self.press {
            PressState::Active => {
                self.press = PressState::Idle;
                Some(ControlAction::GestureEnd)
            }
            PressState::Idle => None,
        }
    }

    fn access_step(&self) -> f64 {
        let span = (self.range.end() - self.range.start()).abs();
        self.range.step().unwrap_or(span * ACCESS_STEP_FRACTION)
    }

    /// Increment, decrement and set-value requests from assistive technology.
    ///
    /// Non-finite set-value requests are ignored.
    pub(crate) fn access(
        &mut self,
        action: Action,
        data: Option<&ActionData>,
    ) -> Option<ControlAction> {
        if self.disabled {
            return None;
        }
        let direction = if self.range.start() <= self.range.end() { 1.0 } else { -1.0 };
        let target = match (action, data) {
            (Action::Increment, _) => self.value + direction * self.access_step(),
            (Action::Decrement, _) => self.value - direction * self.access_step(),
            (Action::SetValue, Some(ActionData::NumericValue(v))) if v.is_finite() => *v,
            _ => return None,
        };
        let value = self.range.quantize(target);
        if (value - self.value).abs() > f64::EPSILON {
            self.value = value;
            Some(ControlAction::Change(value))
        } else {
            None
        }
    }
}

/// Fill the slider node: name, bounds, value, value text, step and passthrough attributes.
pub(crate) fn write_slider_node(
    state: &ControlState,
    label: Option<&str>,
    attributes: &ControlAttributes,
    node: &mut Node,
) {
    let range = &state.range;
    if let Some(label) = label {
        node.set_label(label);
    }
    node.set_min_numeric_value(range.start());
    node.set_max_numeric_value(range.end());
    node.set_numeric_value(state.value);
    node.set_value(range.value_text(state.value));
    if let Some(step) = range.step() {
        node.set_numeric_value_step(step);
    }
    if let Some(id) = &attributes.id {
        node.set_author_id(id.clone());
    }
    if let Some(description) = &attributes.description {
        node.set_description(description.clone());
    }
    if state.disabled {
        node.set_disabled();
    } else {
        node.add_action(Action::Increment);
        node.add_action(Action::Decrement);
        node.add_action(Action::SetValue);
    }
}

/// An accessible slider container.
///
/// The child draws the control; this widget owns the interaction. Press and
/// drag vertically to change the value, double-click to reset to the default.
/// The press is tracked through pointer capture, so the release is seen even
/// when it happens outside the widget.
pub struct Control {
    child: WidgetPod<dyn Widget>,
    state: ControlState,
    label: Option<String>,
    attributes: ControlAttributes,
    ancestor_disabled: bool,
}

impl Control {
    pub fn new(
        value: f64,
        range: ParamRange,
        default_value: Option<f64>,
        child: NewWidget<impl Widget + ?Sized>,
    ) -> Self {
        Self {
            child: child.erased().to_pod(),
            state: ControlState::new(value, range, default_value),
            label: None,
            attributes: ControlAttributes::default(),
            ancestor_disabled: false,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_attributes(mut self, attributes: ControlAttributes) -> Self {
        self.attributes = attributes;
        self.sync_disabled();
        self
    }

    pub fn child_mut<'t>(this: &'t mut WidgetMut<'_, Self>) -> WidgetMut<'t, dyn Widget> {
        this.ctx.get_mut(&mut this.widget.child)
    }

    /// Adopt the owner's value, including one that rejects or adjusts a change
    /// this widget reported.
    pub fn set_value(this: &mut WidgetMut<'_, Self>, value: f64) {
        if this.widget.state.sync_value(value) {
            this.ctx.request_accessibility_update();
        }
    }

    pub fn set_range(this: &mut WidgetMut<'_, Self>, range: ParamRange) {
        this.widget.state.range = range;
        this.ctx.request_accessibility_update();
    }

    pub fn set_default_value(this: &mut WidgetMut<'_, Self>, default_value: Option<f64>) {
        this.widget.state.default_value = default_value;
    }

    pub fn set_label(this: &mut WidgetMut<'_, Self>, label: Option<String>) {
        this.widget.label = label;
        this.ctx.request_accessibility_update();
    }

    /// Disabling mid-press keeps the pointer captured, so the release still
    /// arrives and ends the gesture.
    pub fn set_attributes(this: &mut WidgetMut<'_, Self>, attributes: ControlAttributes) {
        this.widget.attributes = attributes;
        this.widget.sync_disabled();
        this.ctx.request_render();
        this.ctx.request_accessibility_update();
    }

    fn sync_disabled(&mut self) {
        self.state.set_disabled(self.ancestor_disabled || self.attributes.disabled);
    }
}

impl Widget for Control {
    type Action = ControlAction;

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent { state, .. }) => {
                if self.state.is_disabled() {
                    return;
                }
                ctx.request_focus();
                ctx.capture_pointer();
                let pos = ctx.local_position(state.position);
                debug!(double = state.count == 2, "control gesture start");
                for action in self.state.press(pos.y, state.count == 2) {
                    ctx.submit_action::<ControlAction>(action);
                }
                ctx.request_render();
            }
            PointerEvent::Move(PointerUpdate { current, .. }) => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    if let Some(action) = self.state.drag_to(pos.y) {
                        ctx.submit_action::<ControlAction>(action);
                        ctx.request_accessibility_update();
                    }
                }
            }
            PointerEvent::Up(..) | PointerEvent::Cancel(..) => {
                if ctx.is_active() {
                    ctx.release_pointer();
                }
                if let Some(action) = self.state.release() {
                    debug!("control gesture end");
                    ctx.submit_action::<ControlAction>(action);
                    ctx.request_render();
                }
            }
            _ => {}
        }
    }

    fn on_access_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &AccessEvent,
    ) {
        if let Some(action) = self.state.access(event.action, event.data.as_ref()) {
            ctx.submit_action::<ControlAction>(action);
            ctx.request_accessibility_update();
        }
    }

    fn accepts_pointer_interaction(&self) -> bool {
        true
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn register_children(&mut self, ctx: &mut RegisterCtx<'_>) {
        ctx.register_child(&mut self.child);
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        match event {
            Update::HoveredChanged(_) => ctx.request_render(),
            Update::DisabledChanged(disabled) => {
                self.ancestor_disabled = *disabled;
                self.sync_disabled();
                // Disabled widgets get no pointer events, so the release would never come.
                if *disabled {
                    if let Some(action) = self.state.release() {
                        debug!("control gesture end on disable");
                        ctx.submit_action::<ControlAction>(action);
                    }
                }
                ctx.request_render();
                ctx.request_accessibility_update();
            }
            _ => {}
        }
    }

    fn layout(
        &mut self,
        ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let child_size = ctx.run_layout(&mut self.child, bc);
        ctx.place_child(&mut self.child, Point::ZERO);
        bc.constrain(child_size)
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        if !(self.state.press_state() == PressState::Active || ctx.is_hovered()) {
            return;
        }
        let size = ctx.size();
        let rect = Rect::from_origin_size(Point::ZERO, size).inset(-OUTLINE_WIDTH / 2.0);
        let outline = RoundedRect::from_rect(rect, OUTLINE_RADIUS);
        let tint = self.attributes.tint.unwrap_or(DEFAULT_TINT);
        scene.stroke(&Stroke::new(OUTLINE_WIDTH), Affine::IDENTITY, tint, None, &outline);
    }

    fn accessibility_role(&self) -> Role {
        Role::Slider
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        write_slider_node(&self.state, self.label.as_deref(), &self.attributes, node);
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> {
        SmallVec::from_slice(&[self.child.id()])
    }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("Control", id = id.trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(default_value: Option<f64>) -> ControlState {
        let range = ParamRange::linear(0.0, 10.0).unwrap().with_step(0.5);
        ControlState::new(1.0, range, default_value)
    }

    #[test]
    fn press_release_cycle_fires_start_then_end_once() {
        let mut s = state(None);
        for _ in 0..2 {
            let actions = s.press(0.0, false);
            assert_eq!(actions.as_slice(), &[ControlAction::GestureStart, ControlAction::Start]);
            assert_eq!(s.press_state(), PressState::Active);
            assert_eq!(s.release(), Some(ControlAction::GestureEnd));
            assert_eq!(s.release(), None);
            assert_eq!(s.press_state(), PressState::Idle);
        }
    }

    #[test]
    fn second_press_while_active_does_not_restart_gesture() {
        let mut s = state(None);
        s.press(0.0, false);
        assert_eq!(s.press(0.0, false).as_slice(), &[ControlAction::Start]);
        assert_eq!(s.release(), Some(ControlAction::GestureEnd));
        assert_eq!(s.release(), None);
    }

    #[test]
    fn double_press_resets_to_default() {
        let mut s = state(Some(5.0));
        s.press(0.0, false);
        s.release();
        let actions = s.press(0.0, true);
        assert_eq!(
            actions.as_slice(),
            &[ControlAction::GestureStart, ControlAction::Start, ControlAction::Change(5.0)]
        );
        assert_eq!(s.value, 5.0);
    }

    #[test]
    fn zero_default_does_not_reset() {
        let mut s = state(Some(0.0));
        let actions = s.press(0.0, true);
        assert!(!actions.iter().any(|a| matches!(a, ControlAction::Change(_))));
        assert_eq!(s.value, 1.0);

        assert_eq!(reset_target(None), None);
        assert_eq!(reset_target(Some(f64::NAN)), None);
        assert_eq!(reset_target(Some(-3.0)), Some(-3.0));
    }

    #[test]
    fn drag_after_reset_starts_from_default() {
        let mut s = state(Some(5.0));
        s.press(100.0, true);
        assert_eq!(s.drag_to(80.0), Some(ControlAction::Change(6.0)));
    }

    #[test]
    fn drag_only_while_active() {
        let mut s = state(None);
        assert_eq!(s.drag_to(-50.0), None);
        s.press(0.0, false);
        assert_eq!(s.drag_to(-20.0), Some(ControlAction::Change(2.0)));
        s.release();
        assert_eq!(s.drag_to(-100.0), None);
        assert_eq!(s.value, 2.0);
    }

    #[test]
    fn accessibility_actions() {
        let range = ParamRange::linear(0.0, 10.0).unwrap().with_step(1.0);
        let mut s = ControlState::new(5.0, range, None);
        assert_eq!(s.access(Action::Increment, None), Some(ControlAction::Change(6.0)));
        assert_eq!(s.access(Action::Decrement, None), Some(ControlAction::Change(5.0)));
        assert_eq!(
            s.access(Action::SetValue, Some(&ActionData::NumericValue(42.0))),
            Some(ControlAction::Change(10.0))
        );
        assert_eq!(s.access(Action::Increment, None), None);
        assert_eq!(s.access(Action::SetValue, None), None);
        assert_eq!(s.access(Action::Click, None), None);
    }

    #[test]
    fn non_finite_set_value_is_ignored() {
        let mut s = state(None);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let data = ActionData::NumericValue(v);
            assert_eq!(s.access(Action::SetValue, Some(&data)), None);
            assert_eq!(s.value, 1.0);
        }
    }

    #[test]
    fn cancel_ends_drag() {
        let mut s = state(None);
        s.press(0.0, false);
        assert_eq!(s.drag_to(-20.0), Some(ControlAction::Change(2.0)));
        // pointer cancel takes the same path as release
        assert_eq!(s.release(), Some(ControlAction::GestureEnd));
        assert_eq!(s.drag_to(-40.0), None);
        assert_eq!(s.press(0.0, false).first(), Some(&ControlAction::GestureStart));
    }

    #[test]
    fn disable_mid_press_still_ends_gesture() {
        let mut s = state(Some(5.0));
        s.press(0.0, false);
        s.set_disabled(true);
        assert_eq!(s.drag_to(-20.0), None);
        assert!(s.press(0.0, true).is_empty());
        assert_eq!(s.access(Action::Increment, None), None);
        assert_eq!(s.release(), Some(ControlAction::GestureEnd));
        assert_eq!(s.press_state(), PressState::Idle);

        s.set_disabled(false);
        assert_eq!(
            s.press(0.0, false).as_slice(),
            &[ControlAction::GestureStart, ControlAction::Start]
        );
    }

    #[test]
    fn owner_value_replaces_rejected_change() {
        let mut s = state(None);
        s.press(0.0, false);
        assert_eq!(s.drag_to(-20.0), Some(ControlAction::Change(2.0)));
        // the owner kept 1.0
        assert!(s.sync_value(1.0));
        assert!(!s.sync_value(1.0));
        assert_eq!(s.value, 1.0);
        assert_eq!(s.access(Action::Increment, None), Some(ControlAction::Change(1.5)));
    }

    #[test]
    fn slider_node_carries_value_and_attributes() {
        let range = ParamRange::linear(0.0, 10.0).unwrap().with_step(0.5).with_unit("dB");
        let s = ControlState::new(2.5, range.clone(), None);
        let attrs = ControlAttributes {
            id: Some("gain".into()),
            description: Some("Output gain".into()),
            ..ControlAttributes::default()
        };
        let mut node = Node::new(Role::Slider);
        write_slider_node(&s, Some("Gain"), &attrs, &mut node);
        assert_eq!(node.label(), Some("Gain"));
        assert_eq!(node.min_numeric_value(), Some(0.0));
        assert_eq!(node.max_numeric_value(), Some(10.0));
        assert_eq!(node.numeric_value(), Some(2.5));
        assert_eq!(node.numeric_value_step(), Some(0.5));
        assert_eq!(node.value(), Some(range.value_text(2.5).as_str()));
        assert_eq!(node.author_id(), Some("gain"));
        assert_eq!(node.description(), Some("Output gain"));
        assert!(node.supports_action(Action::SetValue));
        assert!(!node.is_disabled());
    }

    #[test]
    fn disabled_slider_node_offers_no_actions() {
        let mut s = state(None);
        s.set_disabled(true);
        let mut node = Node::new(Role::Slider);
        write_slider_node(&s, None, &ControlAttributes::default(), &mut node);
        assert!(node.is_disabled());
        assert!(!node.supports_action(Action::Increment));
        assert_eq!(node.label(), None);
    }

    #[test]
    fn attributes_default_to_empty() {
        let attrs = ControlAttributes::default();
        assert_eq!(attrs.id, None);
        assert!(!attrs.disabled);
    }
}
