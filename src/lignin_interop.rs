//! Conversion of [`lignin`] VDOM trees into mountable [`Child`] values.
//!
//! Only the parts of [`lignin::Node`] with a meaning in a one-shot HTML mount are converted:
//!
//! | [`lignin::Node`] | [`Child`] |
//! |---|---|
//! | `Text` | [`Child::Text`] |
//! | `HtmlElement` | [`Child::Element`], with attributes as string props |
//! | `Multi` | [`Child::Sequence`] |
//! | `Keyed` | [`Child::Sequence`] of the fragments' contents, in order |
//! | `Memoized` | its content |
//!
//! Event bindings are skipped with a warning.
//! Everything else (comments, SVG and MathML elements, …) fails with [`RenderError::UnsupportedChildType`].

use crate::{
	element::{Child, ElementNode},
	RenderError,
};
use core::convert::TryFrom;
use lignin::ThreadBound;
use tracing::{error, warn};

impl<'a> TryFrom<&lignin::Node<'a, ThreadBound>> for Child {
	type Error = RenderError;

	#[allow(unreachable_patterns)] // Future `lignin::Node` variants.
	fn try_from(node: &lignin::Node<'a, ThreadBound>) -> Result<Self, Self::Error> {
		match *node {
			lignin::Node::Text { text, .. } => Ok(Child::Text(text.to_owned())),
			lignin::Node::HtmlElement { element, .. } => ElementNode::try_from(element).map(Child::Element),
			lignin::Node::Multi(nodes) => nodes.iter().map(Child::try_from).collect::<Result<_, _>>().map(Child::Sequence),
			lignin::Node::Keyed(fragments) => fragments
				.iter()
				.map(|fragment| Child::try_from(&fragment.content))
				.collect::<Result<_, _>>()
				.map(Child::Sequence),
			lignin::Node::Memoized { content, .. } => Child::try_from(content),
			lignin::Node::Comment { .. } => unsupported("comment"),
			lignin::Node::SvgElement { .. } => unsupported("SVG element"),
			lignin::Node::MathMlElement { .. } => unsupported("MathML element"),
			_ => unsupported("lignin node"),
		}
	}
}

impl<'a> TryFrom<&lignin::Element<'a, ThreadBound>> for ElementNode {
	type Error = RenderError;

	fn try_from(element: &lignin::Element<'a, ThreadBound>) -> Result<Self, Self::Error> {
		if !element.event_bindings.is_empty() {
			warn!(
				"Skipping {} event binding(s) on <{}>. These can't be mounted without a differ.",
				element.event_bindings.len(),
				element.name
			);
		}

		let children = match Child::try_from(&element.content)? {
			Child::Sequence(children) if children.is_empty() => None,
			children => Some(Box::new(children)),
		};

		Ok(ElementNode {
			tag: element.name.to_owned(),
			props: element.attributes.iter().map(|attribute| (attribute.name, attribute.value)).collect(),
			children,
		})
	}
}

fn unsupported(kind: &'static str) -> Result<Child, RenderError> {
	error!(kind, "Can't convert lignin node.");
	Err(RenderError::UnsupportedChildType { kind })
}
