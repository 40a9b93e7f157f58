use crate::{
	element::{number_to_string, Child, ElementNode},
	error::Result,
	RenderError, Target,
};
use tracing::{error, instrument, trace, trace_span, warn};

/// Mounts [`ElementNode`] trees into a [`Target`].
///
/// Each call to [`Renderer::render`] is a single, non-diffing pass.
/// The [`Renderer`] itself keeps no record of what it mounted,
/// so rendering the same element twice appends two independent subtrees.
#[derive(Debug)]
pub struct Renderer<T: Target> {
	target: T,
	depth_limit: Option<usize>,
}

impl<T: Target> Renderer<T> {
	#[must_use]
	pub fn new(target: T) -> Self {
		Self { target, depth_limit: None }
	}

	/// Fails rendering with [`RenderError::DepthLimitReached`] once elements are nested deeper than `limit`.
	///
	/// The root element is at depth 1.
	/// Without a limit, recursion depth is bounded only by the input tree.
	#[must_use]
	pub fn with_depth_limit(mut self, limit: usize) -> Self {
		self.depth_limit = Some(limit);
		self
	}

	pub fn target(&self) -> &T {
		&self.target
	}

	pub fn target_mut(&mut self) -> &mut T {
		&mut self.target
	}

	pub fn into_target(self) -> T {
		self.target
	}

	/// Builds the native subtree for `element` and appends it to `container` as its last child.
	///
	/// Returns the root of the new subtree. It's already attached, so don't append it again.
	///
	/// # Errors
	///
	/// - [`RenderError::InvalidMountTarget`] if `container` can't receive children.
	/// - [`RenderError::InvalidElementType`] for an empty or uncreatable tag anywhere in the tree.
	/// - [`RenderError::UnsupportedChildType`] for a [`Child::Handler`] anywhere in the tree.
	/// - Any error the [`Target`] reports.
	///
	/// On error nothing is attached to `container`.
	/// Nodes mounted into the partially built subtree before the error stay where they are.
	#[instrument(skip_all, fields(tag = %element.tag))]
	pub fn render(&mut self, element: &ElementNode, container: &T::Node) -> Result<T::Node> {
		if !self.target.is_mount_target(container) {
			error!(?container, "Can't mount into container.");
			return Err(RenderError::InvalidMountTarget);
		}
		self.mount_element(element, container, 1)
	}

	/// Builds the native subtree for `element` without attaching it anywhere.
	///
	/// Use this to mount all-or-nothing: append the returned node yourself once it's complete.
	///
	/// # Errors
	///
	/// As [`Renderer::render`], except for [`RenderError::InvalidMountTarget`] on the (absent) container.
	#[instrument(skip_all, fields(tag = %element.tag))]
	pub fn render_detached(&mut self, element: &ElementNode) -> Result<T::Node> {
		self.build_element(element, 1)
	}

	/// Attachment happens here and only here, once per element.
	fn mount_element(&mut self, element: &ElementNode, container: &T::Node, depth: usize) -> Result<T::Node> {
		let node = self.build_element(element, depth)?;
		self.target.append_child(container, &node)?;
		trace!(tag = %element.tag, "Attached element.");
		Ok(node)
	}

	fn build_element(&mut self, element: &ElementNode, depth: usize) -> Result<T::Node> {
		let span = trace_span!("Building element", tag = %element.tag, depth);
		let _enter = span.enter();

		if let Some(limit) = self.depth_limit {
			if depth > limit {
				error!(limit, "Depth limit reached.");
				return Err(RenderError::DepthLimitReached { limit });
			}
		}

		if element.tag.is_empty() {
			error!("Element tag is empty.");
			return Err(RenderError::InvalidElementType { tag: String::new() });
		}
		let node = self.target.create_node(&element.tag)?;

		for (key, value) in element.props.iter() {
			if key == "children" {
				warn!(
					"Ignoring `children` prop on <{}>. Children are taken from the element's `children` field only.",
					element.tag
				);
				continue;
			}
			if cfg!(feature = "dangerous-logging") {
				trace!(key, ?value, "Setting property.");
			} else {
				trace!(key, "Setting property.");
			}
			self.target.set_native_property(&node, key, value)?;
		}

		if let Some(children) = &element.children {
			self.mount_child(children, &node, depth)?;
		}

		Ok(node)
	}

	fn mount_child(&mut self, child: &Child, parent: &T::Node, depth: usize) -> Result<()> {
		match child {
			Child::Text(text) => self.mount_text(text, parent),
			Child::Number(number) => self.mount_text(&number_to_string(*number), parent),
			Child::Element(element) => self.mount_element(element, parent, depth + 1).map(drop),
			Child::Sequence(children) => {
				trace!(len = children.len(), "Mounting sequence.");
				for child in children {
					self.mount_child(child, parent, depth)?;
				}
				Ok(())
			}
			unsupported @ Child::Handler(_) => {
				error!(kind = unsupported.kind(), "Unsupported child.");
				Err(RenderError::UnsupportedChildType { kind: unsupported.kind() })
			}
		}
	}

	fn mount_text(&mut self, text: &str, parent: &T::Node) -> Result<()> {
		if cfg!(feature = "dangerous-logging") {
			trace!(text, "Creating text node.");
		} else {
			trace!(len = text.len(), "Creating text node.");
		}
		let node = self.target.create_text_node(text)?;
		self.target.append_child(parent, &node)
	}
}

/// Renders `element` into `container` once, see [`Renderer::render`].
///
/// # Errors
///
/// As [`Renderer::render`].
pub fn render<T: Target>(target: &mut T, element: &ElementNode, container: &T::Node) -> Result<T::Node> {
	Renderer::new(target).render(element, container)
}
