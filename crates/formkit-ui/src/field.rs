//! Animated text input.
//!
//! `Input` keeps no value of its own beyond what the control currently
//! shows. Its presentation is a pure function of `InteractionState`
//! (focused, value, error); every transition recomputes the targets and the
//! springs carry the label and border there.

use std::rc::Rc;
use std::time::Duration;

use formkit_core::*;
use smallvec::smallvec;

use crate::form::{FormHandle, current_form};
use crate::style::{BASE_FONT_PX, InputStyle, ResolvedInputStyle};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub focused: bool,
    pub value: String,
    pub error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPosition {
    /// Large, sitting inside the box where the text will go.
    Placeholder,
    /// Small, above the text.
    Active,
}

/// Label geometry (in em) and color.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelVisual {
    pub font_size: f32,
    pub line_height: f32,
    pub translate_y: f32,
    pub color: Color,
}

impl LabelVisual {
    pub fn placeholder(color: Color) -> Self {
        Self {
            font_size: 1.5,
            line_height: 1.0,
            translate_y: 1.15,
            color,
        }
    }

    pub fn active(color: Color) -> Self {
        Self {
            font_size: 1.0,
            line_height: 1.5,
            translate_y: 0.0,
            color,
        }
    }
}

impl Animatable for LabelVisual {
    fn components(&self) -> formkit_core::animation::Components {
        smallvec![
            self.font_size,
            self.line_height,
            self.translate_y,
            self.color.0 as f32,
            self.color.1 as f32,
            self.color.2 as f32,
            self.color.3 as f32,
        ]
    }

    fn from_components(c: &[f32]) -> Self {
        let at = |i: usize| c.get(i).copied().unwrap_or_default();
        Self {
            font_size: at(0),
            line_height: at(1),
            translate_y: at(2),
            color: Color::from_components(c.get(3..).unwrap_or_default()),
        }
    }
}

pub fn label_position(state: &InteractionState) -> LabelPosition {
    if state.focused || !state.value.is_empty() {
        LabelPosition::Active
    } else {
        LabelPosition::Placeholder
    }
}

pub fn label_target(state: &InteractionState, style: &ResolvedInputStyle) -> LabelVisual {
    let color = if state.focused {
        style.label_highlight_color
    } else {
        style.label_subtle_color
    };
    match label_position(state) {
        LabelPosition::Placeholder => LabelVisual::placeholder(color),
        LabelPosition::Active => LabelVisual::active(color),
    }
}

/// Error wins over focus.
pub fn border_target(state: &InteractionState, style: &ResolvedInputStyle) -> Color {
    if state.error {
        style.error_color
    } else if state.focused {
        style.border_highlight_color
    } else {
        style.border_subtle_color
    }
}

pub type ChangeHandler = Rc<dyn Fn(&ChangeEvent)>;

pub struct Input {
    label: String,
    on_change: ChangeHandler,
    resolved: ResolvedInputStyle,
    name: Option<String>,
    id: Option<String>,
    class: Option<String>,
    input_type: Option<String>,
    error_text: Option<String>,
    required: bool,
    state: InteractionState,
    label_anim: AnimatedValue<LabelVisual>,
    border_anim: AnimatedValue<Color>,
    form: Option<FormHandle>,
}

impl Input {
    /// `on_change` receives every raw change event. The input does not know
    /// which form key it feeds; the handler decides.
    pub fn new(label: impl Into<String>, on_change: impl Fn(&ChangeEvent) + 'static) -> Self {
        let resolved = InputStyle::default().resolve(&theme());
        let state = InteractionState::default();
        Self {
            label: label.into(),
            on_change: Rc::new(on_change),
            label_anim: AnimatedValue::new(label_target(&state, &resolved), SpringSpec::default()),
            border_anim: AnimatedValue::new(border_target(&state, &resolved), SpringSpec::default()),
            resolved,
            name: None,
            id: None,
            class: None,
            input_type: None,
            error_text: None,
            required: false,
            state,
            form: current_form(),
        }
    }

    /// Overrides resolve against the theme current at this call.
    pub fn style(mut self, style: InputStyle) -> Self {
        self.resolved = style.resolve(&theme());
        self.snap();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn input_type(mut self, t: impl Into<String>) -> Self {
        self.input_type = Some(t.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.state.error = error;
        self.snap();
        self
    }

    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    /// Initial content of the control.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.state.value = value.into();
        self.snap();
        self
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn resolved_style(&self) -> &ResolvedInputStyle {
        &self.resolved
    }

    /// The form this input was created in, if any.
    pub fn form(&self) -> Option<&FormHandle> {
        self.form.as_ref()
    }

    pub fn focus(&mut self) {
        self.state.focused = true;
        self.retarget();
    }

    /// Blur using the value tracked from change events.
    pub fn blur(&mut self) {
        self.state.focused = false;
        self.retarget();
    }

    /// Blur as reported by a host whose event carries the control's value,
    /// which may differ from the last change (autofill, programmatic edits).
    pub fn blur_with_value(&mut self, value: impl Into<String>) {
        self.state.value = value.into();
        self.blur();
    }

    /// A raw edit of the control. The event is tagged with this input's
    /// name and id when it carries none, handed to `on_change`, then
    /// bubbles to the enclosing form's change observer.
    pub fn change(&mut self, mut event: ChangeEvent) {
        if event.target.name.is_none() {
            event.target.name = self.name.clone();
        }
        if event.target.id.is_none() {
            event.target.id = self.id.clone();
        }
        self.state.value = event.target.value.clone();
        self.retarget();

        (self.on_change)(&event);
        if let Some(form) = &self.form {
            form.observe_change(&event);
        }
    }

    pub fn set_error(&mut self, error: bool) {
        if self.state.error != error {
            self.state.error = error;
            self.retarget();
        }
    }

    pub fn set_error_text(&mut self, text: Option<String>) {
        self.error_text = text;
    }

    pub fn label_position(&self) -> LabelPosition {
        label_position(&self.state)
    }

    /// Current (animated) label visual.
    pub fn label_visual(&self) -> &LabelVisual {
        self.label_anim.get()
    }

    /// Where the label is heading.
    pub fn label_target(&self) -> &LabelVisual {
        self.label_anim.target()
    }

    /// Current (animated) border color.
    pub fn border_color(&self) -> Color {
        *self.border_anim.get()
    }

    pub fn border_target(&self) -> Color {
        *self.border_anim.target()
    }

    pub fn is_animating(&self) -> bool {
        self.label_anim.is_animating() || self.border_anim.is_animating()
    }

    fn retarget(&mut self) {
        self.label_anim
            .set_target(label_target(&self.state, &self.resolved));
        self.border_anim
            .set_target(border_target(&self.state, &self.resolved));
    }

    fn snap(&mut self) {
        self.label_anim
            .snap_to(label_target(&self.state, &self.resolved));
        self.border_anim
            .snap_to(border_target(&self.state, &self.resolved));
    }

    pub fn view(&self) -> View {
        let s = &self.resolved;
        let lv = self.label_anim.get();
        let label_px = lv.font_size * BASE_FONT_PX;

        let mut label_row = Row(Modifier::new()).child(Text(
            self.label.clone(),
            TextStyle {
                color: lv.color,
                font_size: Length::Em(lv.font_size),
                line_height: Some(Length::Em(lv.line_height)),
                font_family: Some(s.label_font_family.clone()),
                font_weight: FontWeight::NORMAL,
            },
        ));
        if self.required {
            label_row = label_row.push_child(
                Text(
                    "*",
                    TextStyle {
                        color: s.asterisk_color,
                        font_size: Length::Em(lv.font_size),
                        font_family: Some(s.label_font_family.clone()),
                        ..TextStyle::default()
                    },
                )
                .modifier(Modifier::new().translate(0.2 * label_px, 0.0)),
            );
        }

        let label = Box(Modifier::new()
            .translate(0.0, lv.translate_y * label_px)
            .z_index(-1.0)
            .class("label"))
        .child(label_row);

        let aria = self.input_type.clone().unwrap_or_else(|| "text".to_string());
        let control = View::new(
            0,
            ViewKind::TextInput {
                value: self.state.value.clone(),
                input_type: aria.clone(),
                name: self.name.clone(),
                id: self.id.clone(),
                style: TextStyle {
                    color: s.text_color,
                    font_size: Length::Em(1.5),
                    font_family: Some(s.font_family.clone()),
                    ..TextStyle::default()
                },
            },
        )
        .modifier(Modifier::new().fill_max_width().z_index(1.0))
        .semantics(
            Semantics::new(Role::TextField)
                .label(aria)
                .focused(self.state.focused),
        );

        let border = Box(Modifier::new()
            .border(1.0, self.border_color(), Length::Px(5.0))
            .class("border"));

        let error = self.state.error.then(|| {
            Text(
                self.error_text.clone().unwrap_or_default(),
                TextStyle {
                    color: s.error_color,
                    font_family: Some(s.error_font_family.clone()),
                    ..TextStyle::default()
                },
            )
            .modifier(Modifier::new().class("error"))
        });

        let mut wrapper = Modifier::new().width(s.width);
        if let Some(class) = &self.class {
            wrapper = wrapper.class(class.clone());
        }
        Column(wrapper).child((label, control, border, error))
    }
}

impl Animate for Input {
    fn tick(&mut self, dt: Duration) -> bool {
        let label = self.label_anim.tick(dt);
        let border = self.border_anim.tick(dt);
        label || border
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("label", &self.label)
            .field("state", &self.state)
            .field("required", &self.required)
            .finish()
    }
}
