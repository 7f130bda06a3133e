//! Per-widget style overrides and their resolution against the theme.
//!
//! Every override is independent: leaving one unset never changes how
//! another resolves.

use formkit_core::{Color, FontWeight, Length, Theme};

/// Nominal pixel size of `1em` when converting label offsets.
pub const BASE_FONT_PX: f32 = 16.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputStyle {
    pub label_subtle_color: Option<Color>,
    pub label_highlight_color: Option<Color>,
    pub label_font_family: Option<String>,
    pub border_subtle_color: Option<Color>,
    pub border_highlight_color: Option<Color>,
    pub text_color: Option<Color>,
    pub asterisk_color: Option<Color>,
    pub error_color: Option<Color>,
    pub width: Option<Length>,
    pub font_family: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedInputStyle {
    pub label_subtle_color: Color,
    pub label_highlight_color: Color,
    pub label_font_family: String,
    pub border_subtle_color: Color,
    pub border_highlight_color: Color,
    pub text_color: Color,
    pub asterisk_color: Color,
    pub error_color: Color,
    pub width: Length,
    pub font_family: String,
    pub error_font_family: String,
}

impl InputStyle {
    pub fn resolve(&self, theme: &Theme) -> ResolvedInputStyle {
        ResolvedInputStyle {
            label_subtle_color: self.label_subtle_color.unwrap_or(theme.subtle),
            label_highlight_color: self.label_highlight_color.unwrap_or(theme.highlight),
            label_font_family: self
                .label_font_family
                .clone()
                .unwrap_or_else(|| theme.font_standard.clone()),
            border_subtle_color: self.border_subtle_color.unwrap_or(theme.subtle),
            border_highlight_color: self.border_highlight_color.unwrap_or(theme.highlight),
            text_color: self.text_color.unwrap_or(theme.text),
            asterisk_color: self.asterisk_color.unwrap_or(theme.asterisk),
            error_color: self.error_color.unwrap_or(theme.error),
            width: self.width.unwrap_or(Length::FULL),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| theme.font_standard.clone()),
            error_font_family: theme.font_error.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonStyle {
    pub background_color: Option<Color>,
    pub font_weight: Option<FontWeight>,
    pub color: Option<Color>,
    pub width: Option<Length>,
    pub border_radius: Option<Length>,
    pub padding: Option<Length>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedButtonStyle {
    pub background_color: Color,
    pub font_weight: FontWeight,
    pub color: Color,
    pub width: Length,
    pub border_radius: Length,
    pub padding: Length,
    pub font_family: String,
}

impl ButtonStyle {
    pub fn resolve(&self, theme: &Theme) -> ResolvedButtonStyle {
        ResolvedButtonStyle {
            background_color: self.background_color.unwrap_or(theme.button_bg),
            font_weight: self.font_weight.unwrap_or(FontWeight::BOLD),
            color: self.color.unwrap_or(theme.on_button),
            width: self.width.unwrap_or(Length::Percent(10.0)),
            border_radius: self.border_radius.unwrap_or(Length::Em(0.3)),
            padding: self.padding.unwrap_or(Length::Em(0.3)),
            font_family: theme.font_standard.clone(),
        }
    }
}
