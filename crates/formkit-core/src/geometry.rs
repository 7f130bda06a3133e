use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// CSS-like length used by width, padding and radius props.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Em(f32),
    Percent(f32),
}

impl Length {
    pub const FULL: Length = Length::Percent(100.0);

    /// Resolve to pixels given the current font size and the container extent.
    pub fn to_px(self, font_px: f32, container_px: f32) -> f32 {
        match self {
            Length::Px(v) => v,
            Length::Em(v) => v * font_px,
            Length::Percent(v) => v * container_px / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Em(v) => write!(f, "{v}em"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let err = || StyleError::InvalidLength(s.to_string());
        let (num, ctor): (&str, fn(f32) -> Length) = if let Some(n) = t.strip_suffix("px") {
            (n, Length::Px)
        } else if let Some(n) = t.strip_suffix("em") {
            (n, Length::Em)
        } else if let Some(n) = t.strip_suffix('%') {
            (n, Length::Percent)
        } else {
            // bare numbers are pixels
            (t, Length::Px)
        };
        let v: f32 = num.trim().parse().map_err(|_| err())?;
        if !v.is_finite() {
            return Err(err());
        }
        Ok(ctor(v))
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Length::Px(px)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::identity()
        }
    }

    pub fn scale(s: f32) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..Self::identity()
        }
    }

    /// Scales around the rect's center, then translates.
    pub fn apply_to_rect(&self, r: Rect) -> Rect {
        let w = r.w * self.scale_x;
        let h = r.h * self.scale_y;
        Rect {
            x: r.x + (r.w - w) / 2.0 + self.translate_x,
            y: r.y + (r.h - h) / 2.0 + self.translate_y,
            w,
            h,
        }
    }
}
