use std::collections::BTreeMap;

use crate::{Color, Length, Modifier, semantics::Semantics};

pub type ViewId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: Length,
    pub line_height: Option<Length>,
    pub font_family: Option<String>,
    pub font_weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: Length::Em(1.0),
            line_height: None,
            font_family: None,
            font_weight: FontWeight::NORMAL,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Form {
        name: Option<String>,
        id: Option<String>,
        method: String,
        no_validate: bool,
    },
    Box,
    Row,
    Column,
    Text {
        text: String,
        style: TextStyle,
    },
    TextInput {
        value: String,
        input_type: String,
        name: Option<String>,
        id: Option<String>,
        style: TextStyle,
    },
    Button {
        button_type: String,
        attributes: BTreeMap<String, String>,
        style: TextStyle,
    },
}

/// Immutable description of one rendered node. Widgets rebuild their views
/// every frame; a host paints them.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn push_child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }
    pub fn semantics(mut self, s: Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first, pre-order walk.
    pub fn walk(&self) -> impl Iterator<Item = &View> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let v = stack.pop()?;
            stack.extend(v.children.iter().rev());
            Some(v)
        })
    }

    /// Concatenated text of every `Text` node in this subtree.
    pub fn text_content(&self) -> String {
        self.walk()
            .filter_map(|v| match &v.kind {
                ViewKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn find_by_class(&self, class: &str) -> Option<&View> {
        self.walk()
            .find(|v| v.modifier.class.as_deref() == Some(class))
    }
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Text(text: impl Into<String>, style: TextStyle) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            style,
        },
    )
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
