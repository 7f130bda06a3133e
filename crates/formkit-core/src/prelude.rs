pub use crate::animation::{
    Animatable, AnimatedValue, AnimationController, Clock, SpringSpec, TestClock, reset_clock,
    set_clock,
};
pub use crate::color::Color;
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::{StyleError, StyleResult};
pub use crate::geometry::{Length, Rect, Transform, Vec2};
pub use crate::input::*;
pub use crate::locals::{Theme, local, provide, theme, with_theme};
pub use crate::modifier::Modifier;
pub use crate::runtime::{Animate, Frame, Scheduler};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Signal, SubId, signal};
pub use crate::view::{
    Box, Column, FontWeight, IntoChildren, Row, Text, TextStyle, View, ViewExt, ViewId, ViewKind,
};
