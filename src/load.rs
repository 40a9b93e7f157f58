//! Reads existing DOM content back into [`ElementNode`] trees.

use crate::{
	element::{Child, ElementNode, Props},
	error::Result,
	RenderError,
};
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Attr, Element, NamedNodeMap, NodeList, Text};

/// Loads each element or text node in `child_nodes`.
///
/// # Errors
///
/// [`RenderError::UnsupportedChildType`] for any other kind of node, for example a comment.
pub fn load_child_nodes(child_nodes: &NodeList) -> Result<Vec<Child>> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.map(|child| {
			if let Some(element) = child.dyn_ref::<Element>() {
				load_element(element).map(Child::Element)
			} else if let Some(text) = child.dyn_ref::<Text>() {
				Ok(Child::Text(text.data()))
			} else {
				error!("Unrecognised child node: {:?}", child);
				Err(RenderError::UnsupportedChildType { kind: "non-element node" })
			}
		})
		.collect()
}

/// Loads `element` and its subtree. Attributes become [`PropValue::Str`](`crate::PropValue::Str`) props.
///
/// # Errors
///
/// As [`load_child_nodes`].
pub fn load_element(element: &Element) -> Result<ElementNode> {
	let node: &web_sys::Node = element.as_ref();
	Ok(ElementNode {
		tag: element.local_name(),
		props: load_attributes(&element.attributes()),
		children: Child::from_loaded(load_child_nodes(&node.child_nodes())?).map(Box::new),
	})
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Props {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> (String, String) {
	(attribute.local_name(), attribute.value())
}
