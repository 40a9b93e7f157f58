//! Mounting into the browser DOM through [`web_sys`].

use crate::{element::PropValue, error::Result, Handler, RenderError, Target};
use hashbrown::{hash_map::Entry, HashMap};
use js_sys::{Function, Reflect};
use tracing::{error, instrument, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// A [`Target`] that creates nodes through a [`web_sys::Document`].
///
/// Props are assigned as JavaScript properties where the element has a property of that name (`key in element`),
/// and written as attributes otherwise.
///
/// # Event handlers
///
/// [`PropValue::Handler`]s are always assigned as properties (for example `onclick`).
/// Each distinct [`Handler`] is wrapped in one [`Closure`] which this [`DomTarget`] keeps alive.
///
/// Dropping the [`DomTarget`] frees those closures,
/// after which the corresponding handlers start throwing errors into JavaScript when invoked.
#[derive(Debug)]
pub struct DomTarget {
	document: web_sys::Document,
	handlers: HashMap<usize, Closure<dyn Fn()>>,
}

impl DomTarget {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self {
			document,
			handlers: HashMap::new(),
		}
	}

	/// Targets the current window's document, if there is one.
	#[must_use]
	pub fn for_window() -> Option<Self> {
		Some(Self::new(web_sys::window()?.document()?))
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// The number of distinct handlers currently kept alive.
	#[must_use]
	pub fn handler_count(&self) -> usize {
		self.handlers.len()
	}

	fn publish(&mut self, handler: &Handler) -> Function {
		let closure = match self.handlers.entry(handler.identity()) {
			Entry::Occupied(occupied) => occupied.into_mut(),
			Entry::Vacant(vacant) => {
				// The clone moved into the closure keeps the identity key valid.
				let handler = handler.clone();
				trace!("Created Closure.");
				vacant.insert(Closure::wrap(Box::new(move || handler.call()) as Box<dyn Fn()>))
			}
		};
		let closure: &Closure<dyn Fn()> = closure;
		let function: &JsValue = closure.as_ref();
		function.unchecked_ref::<Function>().clone()
	}
}

impl Target for DomTarget {
	type Node = web_sys::Node;

	fn is_mount_target(&self, node: &web_sys::Node) -> bool {
		matches!(
			node.node_type(),
			web_sys::Node::ELEMENT_NODE | web_sys::Node::DOCUMENT_NODE | web_sys::Node::DOCUMENT_FRAGMENT_NODE
		)
	}

	#[instrument(skip(self))]
	fn create_node(&mut self, tag: &str) -> Result<web_sys::Node> {
		match self.document.create_element(tag) {
			Ok(element) => Ok(element.into()),
			Err(error) => {
				error!("Failed to create element: {:?}", error);
				Err(RenderError::InvalidElementType { tag: tag.to_owned() })
			}
		}
	}

	fn create_text_node(&mut self, text: &str) -> Result<web_sys::Node> {
		Ok(self.document.create_text_node(text).into())
	}

	#[instrument(skip(self, value))]
	fn set_native_property(&mut self, node: &web_sys::Node, key: &str, value: &PropValue) -> Result<()> {
		let rejected = || RenderError::PropertyRejected { key: key.to_owned() };

		let element = match node.dyn_ref::<web_sys::Element>() {
			Some(element) => element.clone(),
			None => {
				error!("Expected `web_sys::Element` but found {:?}.", node);
				return Err(rejected());
			}
		};
		let js_key = JsValue::from_str(key);

		let js_value: JsValue = match value {
			PropValue::Handler(handler) => self.publish(handler).into(),
			PropValue::Str(_) | PropValue::Number(_) | PropValue::Bool(_) if !Reflect::has(&element, &js_key).unwrap_or(false) => {
				return match value.to_attribute_value() {
					Some(attribute) => element.set_attribute(key, &attribute).map_err(|error| {
						error!("Failed to set attribute: {:?}", error);
						rejected()
					}),
					None => {
						trace!("No attribute form. Nothing to write.");
						Ok(())
					}
				};
			}
			PropValue::Str(value) => JsValue::from_str(value),
			PropValue::Number(value) => JsValue::from_f64(*value),
			PropValue::Bool(value) => JsValue::from_bool(*value),
		};

		match Reflect::set(&element, &js_key, &js_value) {
			Ok(true) => Ok(()),
			Ok(false) => {
				error!("Property is read-only.");
				Err(rejected())
			}
			Err(error) => {
				error!("Failed to set property: {:?}", error);
				Err(rejected())
			}
		}
	}

	fn append_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) -> Result<()> {
		parent.append_child(child).map(drop).map_err(|error| {
			error!("Failed to append child: {:?}", error);
			RenderError::InvalidMountTarget
		})
	}
}
