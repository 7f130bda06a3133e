//! # Forms
//!
//! A `Form` owns one aggregate: a map from field key to the field's latest
//! value. Fields never talk to the form directly. While the form composes
//! its content it provides a `FormHandle` as a composition local; anything
//! built inside picks it up with `current_form()` and calls `update`.
//!
//! ```rust
//! use formkit_ui::*;
//! use formkit_core::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let form = Form::new().on_change({
//!     let seen = seen.clone();
//!     move |agg| seen.borrow_mut().push(agg.clone())
//! });
//!
//! form.provide(|| {
//!     let handle = current_form().unwrap();
//!     handle.update("name", "Alice");
//!     handle.update("email", "a@x.com");
//! });
//!
//! assert_eq!(seen.borrow().len(), 2);
//! assert_eq!(seen.borrow()[1].len(), 2);
//! ```
//!
//! Aggregates are immutable snapshots. `update` builds a new map with one
//! key replaced; anyone still holding an older aggregate keeps seeing the
//! old values.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::rc::{Rc, Weak};

use formkit_core::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value stored under one field key. Integers stay integers; nested
/// records are kept as maps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Null,
    Bool(bool),
    // Tried before `Number` so whole numbers round-trip exactly.
    Int(i64),
    Number(f64),
    Text(String),
    List(Vec<FormValue>),
    Map(BTreeMap<String, FormValue>),
}

impl FormValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FormValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FormValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric value; integers beyond 2^53 lose precision here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FormValue::Int(n) => Some(*n as f64),
            FormValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FormValue>> {
        match self {
            FormValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Bool(b)
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        FormValue::Number(n)
    }
}

impl From<i64> for FormValue {
    fn from(n: i64) -> Self {
        FormValue::Int(n)
    }
}

impl From<i32> for FormValue {
    fn from(n: i32) -> Self {
        FormValue::Int(n.into())
    }
}

impl From<BTreeMap<String, FormValue>> for FormValue {
    fn from(m: BTreeMap<String, FormValue>) -> Self {
        FormValue::Map(m)
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FormValue::Null)
    }
}

impl<T: Into<FormValue>> From<Vec<T>> for FormValue {
    fn from(v: Vec<T>) -> Self {
        FormValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// Immutable snapshot of every field value a form has seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormAggregate(Rc<BTreeMap<String, FormValue>>);

impl FormAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new aggregate equal to `self` with `key` set to `value`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        let mut map = (*self.0).clone();
        map.insert(key.into(), value.into());
        Self(Rc::new(map))
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FormValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FormValue> {
        self.0.iter()
    }

    /// True when both are the same snapshot, not merely equal.
    pub fn ptr_eq(&self, other: &FormAggregate) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormAggregate {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Rc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl Serialize for FormAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormAggregate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::deserialize(deserializer).map(|m| Self(Rc::new(m)))
    }
}

pub type AggregateCallback = Rc<dyn Fn(&FormAggregate)>;
pub type RenderFn = Rc<dyn Fn(&FormAggregate) -> View>;

struct FormStore {
    state: Signal<FormAggregate>,
    on_change: RefCell<Option<AggregateCallback>>,
    on_submit: RefCell<Option<AggregateCallback>>,
    label: RefCell<String>,
    mounted: Cell<bool>,
}

impl FormStore {
    fn teardown(&self) {
        log::debug!("{}: unmounted", self.label.borrow());
        self.mounted.set(false);
        self.on_change.borrow_mut().take();
        self.on_submit.borrow_mut().take();
    }
}

/// Shared handle to a form's store; the value a form provides to its
/// content.
#[derive(Clone)]
pub struct FormHandle(Rc<FormStore>);

impl FormHandle {
    fn new() -> Self {
        Self(Rc::new(FormStore {
            state: Signal::new(FormAggregate::new()),
            on_change: RefCell::new(None),
            on_submit: RefCell::new(None),
            label: RefCell::new("form".to_string()),
            mounted: Cell::new(true),
        }))
    }

    /// The current aggregate.
    pub fn aggregate(&self) -> FormAggregate {
        self.0.state.get()
    }

    /// Set one key. The new aggregate is stored and broadcast to
    /// subscribers before the form's `on_change` sees it.
    pub fn update(&self, key: impl Into<String>, value: impl Into<FormValue>) {
        if !self.0.mounted.get() {
            log::warn!("{}: update after unmount ignored", self.0.label.borrow());
            return;
        }
        let key = key.into();
        let next = self.0.state.with(|agg| agg.with(key.clone(), value));
        log::debug!("{}: update '{}' ({} keys)", self.0.label.borrow(), key, next.len());
        self.0.state.set(next.clone());

        let on_change = self.0.on_change.borrow().clone();
        if let Some(cb) = on_change {
            cb(&next);
        }
    }

    /// Listen for aggregate changes. The listener is removed when the
    /// returned guard runs or, if subscribed while a scope is current, when
    /// that scope is disposed.
    pub fn subscribe(&self, listener: impl Fn(&FormAggregate) + 'static) -> Dispose {
        let state = self.0.state.clone();
        effect(move || {
            let id = state.subscribe(listener);
            on_unmount(move || {
                state.unsubscribe(id);
            })
        })
    }

    /// Handle a submission: suppress native navigation and report the
    /// current aggregate. Never emits `on_change`.
    pub fn submit(&self, event: &SubmitEvent) {
        event.prevent_default();
        let agg = self.aggregate();
        log::debug!("{}: submit ({} keys)", self.0.label.borrow(), agg.len());
        let on_submit = self.0.on_submit.borrow().clone();
        if let Some(cb) = on_submit {
            cb(&agg);
        }
    }

    /// Change events bubbling up from controls. Logged only; the aggregate
    /// changes solely through `update`.
    pub fn observe_change(&self, event: &ChangeEvent) {
        log::debug!(
            "{}: change from {:?} (id {:?}): {:?}",
            self.0.label.borrow(),
            event.target.name,
            event.target.id,
            event.target.value
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.0.mounted.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.state.subscriber_count()
    }

    pub fn ptr_eq(&self, other: &FormHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for FormHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormHandle")
            .field("label", &self.0.label.borrow())
            .field("aggregate", &self.aggregate())
            .finish()
    }
}

/// The handle of the nearest enclosing form, if any.
pub fn current_form() -> Option<FormHandle> {
    local::<FormHandle>()
}

/// A change handler that stores the event's value under `key` in the form
/// composing the caller. Outside a form it only logs.
pub fn update_on_change(key: impl Into<String>) -> impl Fn(&ChangeEvent) + 'static {
    let key = key.into();
    let form = current_form();
    if form.is_none() {
        log::warn!("update_on_change('{key}') created outside a form");
    }
    move |event: &ChangeEvent| match &form {
        Some(form) => form.update(key.clone(), event.value()),
        None => log::debug!("no form for '{key}'; change dropped"),
    }
}

/// What a form displays inside itself.
#[derive(Clone)]
pub enum Content {
    /// Shown as-is.
    Static(View),
    /// Rebuilt from the current aggregate every time the form renders.
    Render(RenderFn),
}

impl Content {
    pub fn render(f: impl Fn(&FormAggregate) -> View + 'static) -> Self {
        Content::Render(Rc::new(f))
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Static(Column(Modifier::new()))
    }
}

impl From<View> for Content {
    fn from(v: View) -> Self {
        Content::Static(v)
    }
}

/// The form container.
pub struct Form {
    handle: FormHandle,
    name: Option<String>,
    id: Option<String>,
    class: Option<String>,
    render: Option<RenderFn>,
    content: Content,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// An empty form. Created inside a scope, it tears down with it.
    pub fn new() -> Self {
        let handle = FormHandle::new();
        if let Some(scope) = current_scope() {
            let store: Weak<FormStore> = Rc::downgrade(&handle.0);
            scope.add_disposer(move || {
                if let Some(store) = store.upgrade() {
                    store.teardown();
                }
            });
        }
        Self {
            handle,
            name: None,
            id: None,
            class: None,
            render: None,
            content: Content::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        *self.handle.0.label.borrow_mut() = format!("form '{name}'");
        self.name = Some(name);
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

    pub fn on_change(self, f: impl Fn(&FormAggregate) + 'static) -> Self {
        *self.handle.0.on_change.borrow_mut() = Some(Rc::new(f));
        self
    }

    pub fn on_submit(self, f: impl Fn(&FormAggregate) + 'static) -> Self {
        *self.handle.0.on_submit.borrow_mut() = Some(Rc::new(f));
        self
    }

    /// Render prop. Takes precedence over `content`. Receives the aggregate
    /// only; the mutator is reachable through `current_form()`.
    pub fn render(mut self, f: impl Fn(&FormAggregate) -> View + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = content.into();
        self
    }

    pub fn handle(&self) -> FormHandle {
        self.handle.clone()
    }

    pub fn aggregate(&self) -> FormAggregate {
        self.handle.aggregate()
    }

    pub fn update(&self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.handle.update(key, value)
    }

    pub fn submit(&self, event: &SubmitEvent) {
        self.handle.submit(event)
    }

    /// Run `f` with this form as the enclosing form, e.g. to construct the
    /// fields and buttons that belong to it.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        provide(self.handle.clone(), f)
    }

    pub fn view(&self) -> View {
        let agg = self.handle.aggregate();
        let content = self.provide(|| match (&self.render, &self.content) {
            (Some(render), _) => render(&agg),
            (None, Content::Render(f)) => f(&agg),
            (None, Content::Static(v)) => v.clone(),
        });

        let mut modifier = Modifier::new();
        if let Some(class) = &self.class {
            modifier = modifier.class(class.clone());
        }
        let mut semantics = Semantics::new(Role::Form);
        semantics.label = self.name.clone();

        View::new(
            0,
            ViewKind::Form {
                name: self.name.clone(),
                id: self.id.clone(),
                method: "POST".to_string(),
                no_validate: true,
            },
        )
        .modifier(modifier)
        .semantics(semantics)
        .child(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<FormAggregate>>>, impl Fn(&FormAggregate) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let log = log.clone();
            move |agg: &FormAggregate| log.borrow_mut().push(agg.clone())
        };
        (log, sink)
    }

    #[test]
    fn test_update_overwrites_one_key() {
        let form = Form::new();
        form.update("name", "Alice");
        form.update("email", "a@x.com");
        form.update("name", "Bob");

        let agg = form.aggregate();
        assert_eq!(agg.get_str("name"), Some("Bob"));
        assert_eq!(agg.get_str("email"), Some("a@x.com"));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_snapshots_are_copy_on_write() {
        let form = Form::new();
        form.update("name", "Alice");
        let before = form.aggregate();

        form.update("name", "Bob");
        form.update("age", 30i64);

        assert_eq!(before.get_str("name"), Some("Alice"));
        assert!(!before.contains_key("age"));
        assert_eq!(before.len(), 1);
        assert!(!before.ptr_eq(&form.aggregate()));
    }

    #[test]
    fn test_on_change_sees_every_update() {
        let (log, sink) = recorder();
        let form = Form::new().on_change(sink);
        form.update("name", "Alice");
        form.update("email", "a@x.com");

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].len(), 1);
        let expected: FormAggregate = [("name", "Alice"), ("email", "a@x.com")]
            .into_iter()
            .collect();
        assert_eq!(log[1], expected);
    }

    #[test]
    fn test_submit_prevents_default_and_skips_on_change() {
        let (changes, on_change) = recorder();
        let (submits, on_submit) = recorder();
        let form = Form::new().on_change(on_change).on_submit(on_submit);
        form.update("name", "Alice");

        let event = SubmitEvent::new();
        form.submit(&event);

        assert!(event.default_prevented());
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(submits.borrow().len(), 1);
        assert_eq!(submits.borrow()[0].get_str("name"), Some("Alice"));
    }

    #[test]
    fn test_submit_without_listener_still_prevents_default() {
        let form = Form::new();
        let event = SubmitEvent::new();
        form.submit(&event);
        assert!(event.default_prevented());
    }

    #[test]
    fn test_subscribers_observe_before_on_change() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let form = Form::new().on_change({
            let order = order.clone();
            move |_| order.borrow_mut().push("on_change")
        });
        let sub = form.handle().subscribe({
            let order = order.clone();
            move |agg| {
                assert_eq!(agg.get_str("k"), Some("v"));
                order.borrow_mut().push("subscriber")
            }
        });
        form.update("k", "v");
        assert_eq!(*order.borrow(), vec!["subscriber", "on_change"]);

        sub.run();
        assert_eq!(form.handle().subscriber_count(), 0);
        form.update("k", "w");
        assert_eq!(order.borrow().len(), 3);
    }

    #[test]
    fn test_render_prop_wins_over_content() {
        let form = Form::new()
            .content(Content::render(|_| Text("child fn", TextStyle::default())))
            .render(|agg| Text(format!("render {}", agg.len()), TextStyle::default()));
        form.update("a", 1i64);
        assert_eq!(form.view().text_content(), "render 1");
    }

    #[test]
    fn test_function_child_gets_current_aggregate() {
        let form = Form::new().content(Content::render(|agg| {
            Text(
                agg.get_str("name").unwrap_or("nobody").to_string(),
                TextStyle::default(),
            )
        }));
        assert_eq!(form.view().text_content(), "nobody");
        form.update("name", "Alice");
        assert_eq!(form.view().text_content(), "Alice");
    }

    #[test]
    fn test_static_content_is_unmodified() {
        let child = Text("static", TextStyle::default());
        let form = Form::new().content(child.clone());
        form.update("x", true);
        let view = form.view();
        assert_eq!(view.children, vec![child]);
    }

    #[test]
    fn test_form_view_disables_native_validation() {
        let view = Form::new().name("signup").id("f1").view();
        match view.kind {
            ViewKind::Form {
                name,
                id,
                method,
                no_validate,
            } => {
                assert_eq!(name.as_deref(), Some("signup"));
                assert_eq!(id.as_deref(), Some("f1"));
                assert_eq!(method, "POST");
                assert!(no_validate);
            }
            other => panic!("expected form node, got {other:?}"),
        }
    }

    #[test]
    fn test_content_sees_form_through_context() {
        let form = Form::new().render(|_| {
            let handle = current_form().expect("form context");
            Text(format!("{}", handle.aggregate().len()), TextStyle::default())
        });
        assert!(current_form().is_none());
        form.update("a", "b");
        assert_eq!(form.view().text_content(), "1");
        assert!(current_form().is_none());
    }

    #[test]
    fn test_update_on_change_routes_event_value() {
        let form = Form::new();
        let handler = form.provide(|| update_on_change("email"));
        handler(&ChangeEvent::new("a@x.com"));
        assert_eq!(form.aggregate().get_str("email"), Some("a@x.com"));
    }

    #[test]
    fn test_observe_change_does_not_touch_aggregate() {
        let (log, sink) = recorder();
        let form = Form::new().on_change(sink);
        let before = form.aggregate();
        form.handle().observe_change(&ChangeEvent::new("typed"));
        assert!(form.aggregate().ptr_eq(&before));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unmount_tears_down_store() {
        let (log, sink) = recorder();
        let scope = Scope::new();
        let form = scope.run(|| Form::new().on_change(sink));
        let handle = form.handle();
        let _sub = scope.run(|| handle.subscribe(|_| {}));
        assert_eq!(handle.subscriber_count(), 1);

        scope.dispose();
        assert!(!handle.is_mounted());
        assert_eq!(handle.subscriber_count(), 0);
        handle.update("late", "value");
        assert!(log.borrow().is_empty());
        assert!(!form.aggregate().contains_key("late"));
    }

    #[test]
    fn test_aggregate_serializes_as_map() {
        let agg: FormAggregate = [
            ("name", FormValue::from("Alice")),
            ("age", FormValue::from(30i64)),
            ("tos", FormValue::from(true)),
            ("nick", FormValue::from(None::<String>)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&agg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Alice", "age": 30, "tos": true, "nick": null})
        );
        let back: FormAggregate = serde_json::from_value(json).unwrap();
        assert_eq!(back, agg);
    }

    #[test]
    fn test_large_integers_are_stored_exactly() {
        let form = Form::new();
        form.update("id", 9_007_199_254_740_993i64);
        let agg = form.aggregate();
        assert_eq!(
            agg.get("id").and_then(FormValue::as_i64),
            Some(9_007_199_254_740_993)
        );

        let json = serde_json::to_string(&agg).unwrap();
        assert_eq!(json, r#"{"id":9007199254740993}"#);
        let back: FormAggregate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, agg);

        let price: FormAggregate = serde_json::from_str(r#"{"price":9.5}"#).unwrap();
        assert_eq!(price.get("price"), Some(&FormValue::Number(9.5)));
    }

    #[test]
    fn test_nested_records_deserialize_as_maps() {
        let agg: FormAggregate =
            serde_json::from_str(r#"{"address":{"city":"Oslo","zip":150,"lines":["a","b"]}}"#)
                .unwrap();
        let address = agg.get("address").and_then(FormValue::as_map).unwrap();
        assert_eq!(address.get("city").and_then(FormValue::as_str), Some("Oslo"));
        assert_eq!(address.get("zip").and_then(FormValue::as_i64), Some(150));
        assert_eq!(
            address.get("lines"),
            Some(&FormValue::from(vec!["a", "b"]))
        );

        let form = Form::new();
        form.update("address", address.clone());
        assert_eq!(form.aggregate().get("address"), agg.get("address"));
    }
}
