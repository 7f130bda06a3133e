//! # Theming and locals
//!
//! Formkit uses thread‑local “composition locals” for values a subtree can
//! read without threading them through every constructor:
//!
//! - `Theme`: palette and font families the widgets fall back to.
//! - any `Clone + 'static` value installed with `provide`, which is how a
//!   `Form` hands its store handle to the fields composed inside it.
//!
//! Locals are scoped to the closure passed to `with_theme` / `provide`:
//!
//! ```rust
//! use formkit_core::*;
//!
//! let dark = Theme {
//!     highlight: Color::from_hex("#88CCFF"),
//!     ..Theme::default()
//! };
//!
//! with_theme(dark, || {
//!     assert_eq!(theme().highlight, Color::from_hex("#88CCFF"));
//! });
//! assert_eq!(theme().highlight, Theme::default().highlight);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        let mut st = st.borrow_mut();
        if let Some(top) = st.last_mut() {
            top.insert(t, v);
        } else {
            // no frame: create a temporary one
            let mut m = HashMap::new();
            m.insert(t, v);
            st.push(m);
        }
    });
}

/// Makes `value` visible to `local::<T>()` for the duration of `f`.
/// Inner `provide` calls shadow outer ones of the same type.
pub fn provide<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Nearest provided value of type `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

/// Palette and fonts the form widgets fall back to when a style override is
/// absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Resting label and border color.
    pub subtle: Color,
    /// Focused label and border color.
    pub highlight: Color,
    /// Border and message color for fields in error.
    pub error: Color,
    /// Input text.
    pub text: Color,
    /// Required-field marker.
    pub asterisk: Color,
    pub button_bg: Color,
    pub on_button: Color,
    pub font_standard: String,
    pub font_error: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            subtle: Color::from_hex("#9E9E9E"),
            highlight: Color::from_hex("#0994CC"),
            error: Color::from_hex("#ae3636"),
            text: Color::BLACK,
            asterisk: Color::BLACK,
            button_bg: Color::from_hex("#0994CC"),
            on_button: Color::WHITE,
            font_standard: "Roboto, sans-serif".to_string(),
            font_error: "Roboto Mono, monospace".to_string(),
        }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    provide(theme, f)
}

pub fn theme() -> Theme {
    local::<Theme>().unwrap_or_default()
}
