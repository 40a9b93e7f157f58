//! A headless [`Target`] that keeps nodes in an arena.
//!
//! Every property write and every append is recorded as it happens,
//! so the result of a mount can be inspected exactly, duplicates included.

use crate::{
	element::{Child, ElementNode, PropValue, Props},
	error::Result,
	RenderError, Target,
};
use tracing::{error, trace};

/// Index of a node within its [`MemoryTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
	/// A container without markup of its own, like a document fragment.
	Root,
	Element { tag: String },
	Text(String),
}

#[derive(Debug)]
struct Entry {
	kind: NodeKind,
	props: Vec<(String, PropValue)>,
	children: Vec<NodeId>,
	parent: Option<NodeId>,
	append_count: usize,
}

impl Entry {
	fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			props: Vec::new(),
			children: Vec::new(),
			parent: None,
			append_count: 0,
		}
	}
}

#[derive(Debug, Default)]
pub struct MemoryTarget {
	nodes: Vec<Entry>,
}

impl MemoryTarget {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a detached [`NodeKind::Root`] to mount into.
	pub fn create_root(&mut self) -> NodeId {
		self.push(NodeKind::Root)
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		self.nodes.push(Entry::new(kind));
		NodeId(self.nodes.len() - 1)
	}

	fn entry(&self, id: NodeId) -> Option<&Entry> {
		self.nodes.get(id.0)
	}

	fn entry_mut(&mut self, id: NodeId) -> Option<&mut Entry> {
		self.nodes.get_mut(id.0)
	}

	/// Total number of nodes ever created, attached or not.
	#[must_use]
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	#[must_use]
	pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
		self.entry(id).map(|entry| &entry.kind)
	}

	#[must_use]
	pub fn tag(&self, id: NodeId) -> Option<&str> {
		match self.kind(id)? {
			NodeKind::Element { tag } => Some(tag),
			_ => None,
		}
	}

	#[must_use]
	pub fn text(&self, id: NodeId) -> Option<&str> {
		match self.kind(id)? {
			NodeKind::Text(text) => Some(text),
			_ => None,
		}
	}

	#[must_use]
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		match self.entry(id) {
			Some(entry) => &entry.children,
			None => &[],
		}
	}

	#[must_use]
	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.entry(id)?.parent
	}

	/// Every property write to `id` in order, including repeated writes to the same key.
	#[must_use]
	pub fn props(&self, id: NodeId) -> &[(String, PropValue)] {
		match self.entry(id) {
			Some(entry) => &entry.props,
			None => &[],
		}
	}

	/// How often `id` was passed to [`Target::append_child`] as the child.
	#[must_use]
	pub fn append_count(&self, id: NodeId) -> usize {
		self.entry(id).map_or(0, |entry| entry.append_count)
	}

	fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
		loop {
			if node == ancestor {
				return true;
			}
			match self.parent(node) {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	/// Reads the element at `id` back into an [`ElementNode`].
	///
	/// The last write per key wins. Text nodes load as [`Child::Text`], so numbers come back formatted.
	/// Returns [`None`] if `id` isn't an element.
	#[must_use]
	pub fn load(&self, id: NodeId) -> Option<ElementNode> {
		let tag = self.tag(id)?;
		let props: Props = self.props(id).iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
		let children = self
			.children(id)
			.iter()
			.filter_map(|&child| match self.kind(child)? {
				NodeKind::Text(text) => Some(Child::Text(text.clone())),
				NodeKind::Element { .. } => self.load(child).map(Child::Element),
				NodeKind::Root => None,
			})
			.collect();
		Some(ElementNode {
			tag: tag.to_owned(),
			props,
			children: Child::from_loaded(children).map(Box::new),
		})
	}

	/// Serializes the subtree at `id` as HTML-like markup.
	///
	/// Attributes are written in the order they were set. Handlers and `false` are left out.
	/// A [`NodeKind::Root`] contributes only its children.
	#[must_use]
	pub fn to_markup(&self, id: NodeId) -> String {
		let mut markup = String::new();
		self.write_markup(id, &mut markup);
		markup
	}

	fn write_markup(&self, id: NodeId, markup: &mut String) {
		match self.kind(id) {
			None => (),
			Some(NodeKind::Text(text)) => escape_into(text, false, markup),
			Some(NodeKind::Root) => {
				for &child in self.children(id) {
					self.write_markup(child, markup);
				}
			}
			Some(NodeKind::Element { tag }) => {
				markup.push('<');
				markup.push_str(tag);
				for (key, value) in self.props(id) {
					if let Some(value) = value.to_attribute_value() {
						markup.push(' ');
						markup.push_str(key);
						markup.push_str("=\"");
						escape_into(&value, true, markup);
						markup.push('"');
					}
				}
				markup.push('>');
				for &child in self.children(id) {
					self.write_markup(child, markup);
				}
				markup.push_str("</");
				markup.push_str(tag);
				markup.push('>');
			}
		}
	}
}

fn escape_into(text: &str, attribute: bool, markup: &mut String) {
	for c in text.chars() {
		match c {
			'&' => markup.push_str("&amp;"),
			'<' => markup.push_str("&lt;"),
			'>' => markup.push_str("&gt;"),
			'"' if attribute => markup.push_str("&quot;"),
			c => markup.push(c),
		}
	}
}

fn is_valid_tag(tag: &str) -> bool {
	let mut chars = tag.chars();
	chars.next().map_or(false, |first| first.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

impl Target for MemoryTarget {
	type Node = NodeId;

	fn is_mount_target(&self, node: &NodeId) -> bool {
		matches!(self.kind(*node), Some(NodeKind::Root) | Some(NodeKind::Element { .. }))
	}

	fn create_node(&mut self, tag: &str) -> Result<NodeId> {
		if !is_valid_tag(tag) {
			error!(tag, "Invalid tag.");
			return Err(RenderError::InvalidElementType { tag: tag.to_owned() });
		}
		let id = self.push(NodeKind::Element { tag: tag.to_owned() });
		trace!(?id, tag, "Created element.");
		Ok(id)
	}

	fn create_text_node(&mut self, text: &str) -> Result<NodeId> {
		let id = self.push(NodeKind::Text(text.to_owned()));
		trace!(?id, "Created text node.");
		Ok(id)
	}

	fn set_native_property(&mut self, node: &NodeId, key: &str, value: &PropValue) -> Result<()> {
		match self.entry_mut(*node) {
			Some(entry) if matches!(entry.kind, NodeKind::Element { .. }) => {
				entry.props.push((key.to_owned(), value.clone()));
				Ok(())
			}
			_ => {
				error!(?node, key, "Properties can only be set on elements.");
				Err(RenderError::PropertyRejected { key: key.to_owned() })
			}
		}
	}

	fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
		let (parent, child) = (*parent, *child);
		if !self.is_mount_target(&parent) || self.entry(child).is_none() || self.is_ancestor_or_self(child, parent) {
			error!(?parent, ?child, "Can't append child.");
			return Err(RenderError::InvalidMountTarget);
		}

		// Like the DOM, appending an attached node moves it.
		if let Some(previous) = self.parent(child) {
			if let Some(entry) = self.entry_mut(previous) {
				entry.children.retain(|&c| c != child);
			}
		}

		if let Some(entry) = self.entry_mut(child) {
			entry.parent = Some(parent);
			entry.append_count += 1;
		}
		if let Some(entry) = self.entry_mut(parent) {
			entry.children.push(child);
		}
		trace!(?parent, ?child, "Appended child.");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tags_are_validated() {
		assert!(is_valid_tag("div"));
		assert!(is_valid_tag("my-element"));
		assert!(is_valid_tag("svg:rect"));
		assert!(!is_valid_tag(""));
		assert!(!is_valid_tag("1div"));
		assert!(!is_valid_tag("di v"));
	}

	#[test]
	fn appending_into_own_subtree_fails() {
		let mut target = MemoryTarget::new();
		let outer = target.create_node("div").unwrap();
		let inner = target.create_node("span").unwrap();
		target.append_child(&outer, &inner).unwrap();

		assert_eq!(target.append_child(&inner, &outer), Err(RenderError::InvalidMountTarget));
		assert_eq!(target.append_child(&outer, &outer), Err(RenderError::InvalidMountTarget));
	}

	#[test]
	fn text_nodes_are_not_containers() {
		let mut target = MemoryTarget::new();
		let text = target.create_text_node("x").unwrap();
		let span = target.create_node("span").unwrap();
		assert!(!target.is_mount_target(&text));
		assert_eq!(target.append_child(&text, &span), Err(RenderError::InvalidMountTarget));
	}

	#[test]
	fn markup_escapes() {
		let mut target = MemoryTarget::new();
		let root = target.create_root();
		let a = target.create_node("a").unwrap();
		target.set_native_property(&a, "title", &PropValue::from("\"<&>\"")).unwrap();
		target.set_native_property(&a, "hidden", &PropValue::Bool(false)).unwrap();
		let text = target.create_text_node("1 < 2").unwrap();
		target.append_child(&a, &text).unwrap();
		target.append_child(&root, &a).unwrap();

		assert_eq!(target.to_markup(root), "<a title=\"&quot;&lt;&amp;&gt;&quot;\">1 &lt; 2</a>");
	}
}
