//! This file is part of the xilem_param_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::{MessageContext, Mut, View, ViewId, ViewMarker, ViewPathTracker};
use xilem::core::MessageResult;
use xilem::{Pod, ViewCtx, WidgetView};

use crate::range::ParamRange;
use crate::widgets::control::{Control as ControlWidget, ControlAction, ControlAttributes};

const CHILD_VIEW_ID: ViewId = ViewId::new(0);

type Hook<State, Action> = Box<dyn Fn(&mut State) -> Action + Send + Sync + 'static>;

/// An accessible drag-to-adjust control around a child view.
///
/// The child draws the control; see [`control`].
pub struct Control<V, F, State, Action> {
    value: f64,
    range: ParamRange,
    on_change: F,
    on_start: Option<Hook<State, Action>>,
    default_value: Option<f64>,
    label: Option<String>,
    on_gesture_start: Option<Hook<State, Action>>,
    on_gesture_end: Option<Hook<State, Action>>,
    attributes: ControlAttributes,
    child: V,
}

/// Create a parameter control.
///
/// Press and drag vertically over `child` to change `value` within `range`;
/// each new value is reported to `on_change`. The control is announced to
/// assistive technology as a slider with the range bounds and
/// [`ParamRange::value_text`] as its value text.
pub fn control<State, Action, V: WidgetView<State, Action>>(
    value: f64,
    range: ParamRange,
    on_change: impl Fn(&mut State, f64) -> Action + Send + Sync + 'static,
    child: V,
) -> Control<V, impl Fn(&mut State, f64) -> Action + Send + Sync + 'static, State, Action> {
    Control {
        value,
        range,
        on_change,
        on_start: None,
        default_value: None,
        label: None,
        on_gesture_start: None,
        on_gesture_end: None,
        attributes: ControlAttributes::default(),
        child,
    }
}

impl<V, F, State, Action> Control<V, F, State, Action> {
    /// Value restored on double-click.
    ///
    /// A default of `0.0` counts as unset and disables the reset.
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Accessible name of the control.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Called when a drag takes hold of the value.
    pub fn on_start(mut self, f: impl Fn(&mut State) -> Action + Send + Sync + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called on every press, before [`on_start`](Self::on_start).
    pub fn on_gesture_start(
        mut self,
        f: impl Fn(&mut State) -> Action + Send + Sync + 'static,
    ) -> Self {
        self.on_gesture_start = Some(Box::new(f));
        self
    }

    /// Called once when the pointer is released after a press, wherever that happens.
    pub fn on_gesture_end(
        mut self,
        f: impl Fn(&mut State) -> Action + Send + Sync + 'static,
    ) -> Self {
        self.on_gesture_end = Some(Box::new(f));
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.attributes.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.attributes.description = Some(description.into());
        self
    }

    pub fn tint(mut self, color: xilem::masonry::vello::peniko::Color) -> Self {
        self.attributes.tint = Some(color);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.attributes.disabled = disabled;
        self
    }

    /// Replace all passthrough attributes at once.
    pub fn attributes(mut self, attributes: ControlAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

impl<V, F, State, Action> Control<V, F, State, Action>
where
    F: Fn(&mut State, f64) -> Action,
{
    fn dispatch(&self, action: ControlAction, state: &mut State) -> MessageResult<Action> {
        let hook = match action {
            ControlAction::Change(value) => {
                return MessageResult::Action((self.on_change)(state, value));
            }
            ControlAction::Start => &self.on_start,
            ControlAction::GestureStart => &self.on_gesture_start,
            ControlAction::GestureEnd => &self.on_gesture_end,
        };
        match hook {
            Some(f) => MessageResult::Action(f(state)),
            None => MessageResult::Nop,
        }
    }
}

impl<V, F, State, Action> ViewMarker for Control<V, F, State, Action> {}

impl<V, F, State, Action> View<State, Action, ViewCtx> for Control<V, F, State, Action>
where
    V: WidgetView<State, Action>,
    F: Fn(&mut State, f64) -> Action + Send + Sync + 'static,
    State: 'static,
    Action: 'static,
{
    type Element = Pod<ControlWidget>;
    type ViewState = V::ViewState;

    fn build(
        &self,
        ctx: &mut ViewCtx,
        app_state: &mut State,
    ) -> (Self::Element, Self::ViewState) {
        let (child_pod, child_state) = ctx.with_id(CHILD_VIEW_ID, |ctx| {
            self.child.build(ctx, app_state)
        });
        let w = ControlWidget::new(
            self.value,
            self.range.clone(),
            self.default_value,
            child_pod.new_widget,
        )
        .with_label(self.label.clone())
        .with_attributes(self.attributes.clone());
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, child_state)
    }

    fn rebuild(
        &self,
        prev: &Self,
        view_state: &mut Self::ViewState,
        ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) {
        // Always resync: the widget may hold a change the owner did not accept.
        ControlWidget::set_value(&mut element, self.value);
        if prev.range != self.range {
            ControlWidget::set_range(&mut element, self.range.clone());
        }
        if prev.default_value != self.default_value {
            ControlWidget::set_default_value(&mut element, self.default_value);
        }
        if prev.label != self.label {
            ControlWidget::set_label(&mut element, self.label.clone());
        }
        if prev.attributes != self.attributes {
            ControlWidget::set_attributes(&mut element, self.attributes.clone());
        }
        ctx.with_id(CHILD_VIEW_ID, |ctx| {
            self.child.rebuild(
                &prev.child,
                view_state,
                ctx,
                ControlWidget::child_mut(&mut element).downcast(),
                app_state,
            );
        });
    }

    fn teardown(
        &self,
        view_state: &mut Self::ViewState,
        ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
    ) {
        ctx.with_id(CHILD_VIEW_ID, |ctx| {
            self.child.teardown(
                view_state,
                ctx,
                ControlWidget::child_mut(&mut element).downcast(),
            );
        });
        ctx.teardown_leaf(element);
    }

    fn message(
        &self,
        view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        mut element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<Action> {
        match message.take_first() {
            Some(CHILD_VIEW_ID) => self.child.message(
                view_state,
                message,
                ControlWidget::child_mut(&mut element).downcast(),
                app_state,
            ),
            Some(_) => MessageResult::Stale,
            None => match message.take_message::<ControlAction>() {
                Some(action) => self.dispatch(*action, app_state),
                None => MessageResult::Stale,
            },
        }
    }
}
