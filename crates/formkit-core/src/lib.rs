#![allow(non_snake_case)]
//! # State, Signals, and Motion
//!
//! Formkit widgets are plain structs that own their interaction state and
//! rebuild an immutable `View` every frame. The core supplies the pieces
//! they share:
//!
//! - `Signal<T>`: observable, cloneable value with subscriptions.
//! - `Scope` / `Dispose`: teardown of subscriptions on unmount.
//! - `provide` / `local`: composition locals, the channel a container uses
//!   to hand a handle to whatever is composed inside it.
//! - `AnimatedValue`: spring motion toward a target, driven per frame.
//!
//! ## Signals
//!
//! ```rust
//! use formkit_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! `subscribe` returns a `SubId`; listeners run after the value is stored.
//!
//! ## Scopes and cleanup
//!
//! ```rust
//! use formkit_core::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let ran = Rc::new(Cell::new(false));
//! let scope = Scope::new();
//! scope.run(|| {
//!     let ran = ran.clone();
//!     effect(move || on_unmount(move || ran.set(true)));
//! });
//! scope.dispose();
//! assert!(ran.get());
//! ```
//!
//! ## Springs
//!
//! ```rust
//! use formkit_core::*;
//! use std::time::Duration;
//!
//! let mut scale = AnimatedValue::new(1.0f32, SpringSpec::default());
//! scale.set_target(0.9);
//! while scale.tick(Duration::from_millis(16)) {}
//! assert_eq!(*scale.get(), 0.9);
//! ```

pub mod animation;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use locals::*;
pub use modifier::*;
pub use prelude::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
