use crate::{Color, Length, Transform};

#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: Length,
}

/// Presentation attributes attached to a view. Later calls win, mirroring
/// the cascade of the styling layer: nothing here is validated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub width: Option<Length>,
    pub padding: Option<Length>,
    pub margin: Option<Length>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub radius: Option<Length>,
    pub transform: Option<Transform>,
    pub z_index: f32,
    pub class: Option<String>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn width(mut self, w: impl Into<Length>) -> Self {
        self.width = Some(w.into());
        self
    }
    pub fn fill_max_width(self) -> Self {
        self.width(Length::FULL)
    }
    pub fn padding(mut self, p: impl Into<Length>) -> Self {
        self.padding = Some(p.into());
        self
    }
    pub fn margin(mut self, m: impl Into<Length>) -> Self {
        self.margin = Some(m.into());
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: impl Into<Length>) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius: radius.into(),
        });
        self
    }
    pub fn clip_rounded(mut self, radius: impl Into<Length>) -> Self {
        self.radius = Some(radius.into());
        self
    }
    pub fn transform(mut self, t: Transform) -> Self {
        self.transform = Some(t);
        self
    }
    pub fn scale(self, s: f32) -> Self {
        self.transform(Transform::scale(s))
    }
    pub fn translate(self, x: f32, y: f32) -> Self {
        self.transform(Transform::translate(x, y))
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}
