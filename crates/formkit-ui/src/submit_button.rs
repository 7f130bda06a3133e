use std::collections::BTreeMap;
use std::time::Duration;

use formkit_core::*;

use crate::form::{FormHandle, current_form};
use crate::style::{ButtonStyle, ResolvedButtonStyle};

pub const PRESSED_SCALE: f32 = 0.9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressState {
    #[default]
    Released,
    Pressed,
}

impl PressState {
    pub fn scale(self) -> f32 {
        match self {
            PressState::Released => 1.0,
            PressState::Pressed => PRESSED_SCALE,
        }
    }
}

/// Submit trigger that shrinks while held.
///
/// The press tracks pointer-down/up rather than clicks, so the scale follows
/// how long the button is held. A release anywhere ends the press.
pub struct SubmitButton {
    label: String,
    attributes: BTreeMap<String, String>,
    resolved: ResolvedButtonStyle,
    state: PressState,
    scale: AnimatedValue<f32>,
    form: Option<FormHandle>,
}

impl SubmitButton {
    /// Picks up the enclosing form, if constructed inside one.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: BTreeMap::new(),
            resolved: ButtonStyle::default().resolve(&theme()),
            state: PressState::Released,
            scale: AnimatedValue::new(PressState::Released.scale(), SpringSpec::default()),
            form: current_form(),
        }
    }

    /// Pass-through attribute for the underlying button.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.resolved = style.resolve(&theme());
        self
    }

    pub fn resolved_style(&self) -> &ResolvedButtonStyle {
        &self.resolved
    }

    pub fn press_state(&self) -> PressState {
        self.state
    }

    pub fn scale(&self) -> f32 {
        *self.scale.get()
    }

    pub fn target_scale(&self) -> f32 {
        *self.scale.target()
    }

    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled")
    }

    pub fn pointer_down(&mut self) {
        self.set_state(PressState::Pressed);
    }

    pub fn pointer_up(&mut self) {
        self.set_state(PressState::Released);
    }

    /// Route a pointer event given the button's on-screen bounds. Presses
    /// start only inside the bounds with the primary button; any release or
    /// cancel ends them. Returns true when the press state changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: Rect) -> bool {
        let before = self.state;
        match event.event {
            PointerEventKind::Down(PointerButton::Primary) if bounds.contains(event.position) => {
                self.pointer_down()
            }
            PointerEventKind::Up(_) | PointerEventKind::Cancel => self.pointer_up(),
            _ => {}
        }
        before != self.state
    }

    /// Activate the button: submits the enclosing form. Returns the event so
    /// the host can see whether native handling was suppressed, or `None`
    /// when there is nothing to submit.
    pub fn click(&self) -> Option<SubmitEvent> {
        if self.is_disabled() {
            log::debug!("submit button '{}' is disabled", self.label);
            return None;
        }
        let Some(form) = &self.form else {
            log::debug!("submit button '{}' has no enclosing form", self.label);
            return None;
        };
        let event = SubmitEvent::new();
        form.submit(&event);
        Some(event)
    }

    fn set_state(&mut self, state: PressState) {
        if self.state != state {
            self.state = state;
            self.scale.set_target(state.scale());
        }
    }

    pub fn view(&self) -> View {
        let s = &self.resolved;
        let button = View::new(
            0,
            ViewKind::Button {
                button_type: "submit".to_string(),
                attributes: self.attributes.clone(),
                style: TextStyle {
                    color: s.color,
                    font_weight: s.font_weight,
                    font_family: Some(s.font_family.clone()),
                    ..TextStyle::default()
                },
            },
        )
        .modifier(
            Modifier::new()
                .fill_max_width()
                .padding(s.padding)
                .scale(self.scale()),
        )
        .semantics(Semantics {
            enabled: !self.is_disabled(),
            ..Semantics::new(Role::Button).label("submit")
        })
        .child(Text(
            self.label.clone(),
            TextStyle {
                color: s.color,
                font_weight: s.font_weight,
                font_family: Some(s.font_family.clone()),
                ..TextStyle::default()
            },
        ));

        Box(Modifier::new()
            .width(s.width)
            .margin(Length::Em(1.0))
            .background(s.background_color)
            .clip_rounded(s.border_radius))
        .child(button)
    }
}

impl Animate for SubmitButton {
    fn tick(&mut self, dt: Duration) -> bool {
        self.scale.tick(dt)
    }
}
