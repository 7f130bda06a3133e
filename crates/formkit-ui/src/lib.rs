#![allow(non_snake_case)]
//! Form widgets: a `Form` that aggregates field values, an animated text
//! `Input`, and a `SubmitButton` that shrinks while pressed.
//!
//! Widgets built inside `Form::provide` find the form through
//! `current_form()`, so fields report upward without holding a reference
//! to their parent.

pub mod field;
pub mod form;
pub mod style;
pub mod submit_button;

pub use field::*;
pub use form::*;
pub use style::*;
pub use submit_button::*;
