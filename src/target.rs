//! The seam between the renderer and whatever actually holds the nodes.

use crate::{error::Result, PropValue};
use core::fmt::Debug;

/// The node primitives a [`Renderer`](`crate::Renderer`) builds on.
///
/// Implemented for the browser DOM by [`DomTarget`](`crate::dom::DomTarget`)
/// and headlessly by [`MemoryTarget`](`crate::memory::MemoryTarget`).
pub trait Target {
	/// A handle to a native node. Cloning it must not clone the node itself.
	type Node: Clone + Debug;

	/// Whether `node` can currently receive appended children.
	fn is_mount_target(&self, node: &Self::Node) -> bool;

	/// Creates a detached node of kind `tag`.
	///
	/// # Errors
	///
	/// [`RenderError::InvalidElementType`](`crate::RenderError::InvalidElementType`) iff `tag` doesn't name a creatable node kind.
	fn create_node(&mut self, tag: &str) -> Result<Self::Node>;

	/// Creates a detached text node.
	///
	/// # Errors
	///
	/// Target-specific.
	fn create_text_node(&mut self, text: &str) -> Result<Self::Node>;

	/// Applies `value` to `node` under `key`, as a native property where one exists and as an attribute otherwise.
	///
	/// # Errors
	///
	/// [`RenderError::PropertyRejected`](`crate::RenderError::PropertyRejected`) if the target refuses the write.
	fn set_native_property(&mut self, node: &Self::Node, key: &str, value: &PropValue) -> Result<()>;

	/// Appends `child` as the last child of `parent`.
	///
	/// # Errors
	///
	/// [`RenderError::InvalidMountTarget`](`crate::RenderError::InvalidMountTarget`) if `parent` can't hold `child`.
	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;
}

impl<T: Target + ?Sized> Target for &mut T {
	type Node = T::Node;

	fn is_mount_target(&self, node: &Self::Node) -> bool {
		(**self).is_mount_target(node)
	}

	fn create_node(&mut self, tag: &str) -> Result<Self::Node> {
		(**self).create_node(tag)
	}

	fn create_text_node(&mut self, text: &str) -> Result<Self::Node> {
		(**self).create_text_node(text)
	}

	fn set_native_property(&mut self, node: &Self::Node, key: &str, value: &PropValue) -> Result<()> {
		(**self).set_native_property(node, key, value)
	}

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()> {
		(**self).append_child(parent, child)
	}
}
