//! The declarative tree that gets mounted.

use core::{
	fmt::{self, Debug, Formatter},
	iter::FromIterator,
};
use std::rc::Rc;

/// Describes one native node: its kind, its properties and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
	/// The native node kind, for example an HTML tag name.
	pub tag: String,
	pub props: Props,
	/// [`None`] renders no children.
	pub children: Option<Box<Child>>,
}

impl ElementNode {
	#[must_use]
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			props: Props::new(),
			children: None,
		}
	}

	/// Sets a property, replacing an earlier value for the same key.
	#[must_use]
	pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.props.insert(key, value);
		self
	}

	/// Replaces the children.
	#[must_use]
	pub fn children(mut self, children: impl Into<Child>) -> Self {
		self.children = Some(Box::new(children.into()));
		self
	}

	/// Appends one child, turning existing children into a [`Child::Sequence`] where necessary.
	#[must_use]
	pub fn child(mut self, child: impl Into<Child>) -> Self {
		let child = child.into();
		self.children = Some(Box::new(match self.children.take().map(|children| *children) {
			None => child,
			Some(Child::Sequence(mut children)) => {
				children.push(child);
				Child::Sequence(children)
			}
			Some(existing) => Child::Sequence(vec![existing, child]),
		}));
		self
	}
}

/// The children of an [`ElementNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
	/// Rendered as one text node.
	Text(String),
	/// Rendered as one text node, formatted the way JavaScript's `String(n)` would.
	Number(f64),
	/// Rendered recursively into its own native node.
	Element(ElementNode),
	/// Each entry is mounted in order.
	Sequence(Vec<Child>),
	/// A callable in child position. This can't be rendered and always fails with
	/// [`RenderError::UnsupportedChildType`](`crate::RenderError::UnsupportedChildType`).
	Handler(Handler),
}

impl Child {
	/// A short name for the variant, for logs and errors.
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Child::Text(_) => "text",
			Child::Number(_) => "number",
			Child::Element(_) => "element",
			Child::Sequence(_) => "sequence",
			Child::Handler(_) => "handler",
		}
	}

	/// Collapses a list of loaded child nodes the way a caller would most likely have written them:
	/// no children become [`None`], a single child stands alone and anything more becomes a [`Child::Sequence`].
	#[must_use]
	pub fn from_loaded(mut children: Vec<Child>) -> Option<Self> {
		match children.len() {
			0 => None,
			1 => children.pop(),
			_ => Some(Child::Sequence(children)),
		}
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Child::Text(text.to_owned())
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Child::Text(text)
	}
}

impl From<f64> for Child {
	fn from(number: f64) -> Self {
		Child::Number(number)
	}
}

impl From<i32> for Child {
	fn from(number: i32) -> Self {
		Child::Number(number.into())
	}
}

impl From<ElementNode> for Child {
	fn from(element: ElementNode) -> Self {
		Child::Element(element)
	}
}

impl From<Vec<Child>> for Child {
	fn from(children: Vec<Child>) -> Self {
		Child::Sequence(children)
	}
}

impl From<Handler> for Child {
	fn from(handler: Handler) -> Self {
		Child::Handler(handler)
	}
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	Str(String),
	Number(f64),
	Bool(bool),
	/// Event-handler-like callable.
	Handler(Handler),
}

impl PropValue {
	/// The value as attribute text, or [`None`] if it has no attribute form.
	///
	/// `false` has none since boolean attributes are expressed by presence.
	#[must_use]
	pub fn to_attribute_value(&self) -> Option<String> {
		match self {
			PropValue::Str(value) => Some(value.clone()),
			PropValue::Number(number) => Some(number_to_string(*number)),
			PropValue::Bool(true) => Some(String::new()),
			PropValue::Bool(false) | PropValue::Handler(_) => None,
		}
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		PropValue::Str(value.to_owned())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		PropValue::Str(value)
	}
}

impl From<f64> for PropValue {
	fn from(value: f64) -> Self {
		PropValue::Number(value)
	}
}

impl From<i32> for PropValue {
	fn from(value: i32) -> Self {
		PropValue::Number(value.into())
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		PropValue::Bool(value)
	}
}

impl From<Handler> for PropValue {
	fn from(handler: Handler) -> Self {
		PropValue::Handler(handler)
	}
}

/// Property map with unique keys, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(String, PropValue)>);

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Inserts `value` under `key`.
	///
	/// An existing entry keeps its position and has its value replaced, which is then returned.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
		let key = key.into();
		let value = value.into();
		match self.0.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => Some(core::mem::replace(existing, value)),
			None => {
				self.0.push((key, value));
				None
			}
		}
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&PropValue> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut props = Self::new();
		for (key, value) in iter {
			props.insert(key, value);
		}
		props
	}
}

/// A shared callable, compared by identity.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn()>);

impl Handler {
	pub fn new(f: impl Fn() + 'static) -> Self {
		Self(Rc::new(f))
	}

	pub fn call(&self) {
		(self.0)();
	}

	/// Stable for as long as any clone of this [`Handler`] is alive.
	#[must_use]
	pub fn identity(&self) -> usize {
		Rc::as_ptr(&self.0).cast::<()>() as usize
	}
}

impl Debug for Handler {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Handler").field(&format_args!("{:#x}", self.identity())).finish()
	}
}

impl PartialEq for Handler {
	fn eq(&self, other: &Self) -> bool {
		self.identity() == other.identity()
	}
}

/// Formats `number` like JavaScript's `String(number)` does for the cases that show up in markup.
#[must_use]
pub fn number_to_string(number: f64) -> String {
	if number.is_nan() {
		return "NaN".to_owned();
	}
	if number.is_infinite() {
		return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
	}
	if number == 0.0 {
		// Also covers -0.
		return "0".to_owned();
	}

	let magnitude = number.abs();
	if magnitude >= 1e21 || magnitude < 1e-6 {
		let formatted = format!("{:e}", number);
		match formatted.find('e') {
			Some(e) if !formatted[e + 1..].starts_with('-') => format!("{}e+{}", &formatted[..e], &formatted[e + 1..]),
			_ => formatted,
		}
	} else {
		format!("{}", number)
	}
}
