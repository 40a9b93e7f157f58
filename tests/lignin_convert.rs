use core::convert::TryFrom;
use element_mount::{memory::MemoryTarget, render, Child, ElementNode, RenderError};
use lignin::{Attribute, Element, ElementCreationOptions, Node, ReorderableFragment, ThreadBound};

#[test]
fn html_element() {
	let attributes = [Attribute { name: "class", value: "greeting" }];
	let content = [
		Node::Text { text: "Hello", dom_binding: None },
		Node::Text { text: " lignin!", dom_binding: None },
	];
	let element = Element {
		name: "p",
		creation_options: ElementCreationOptions::new(),
		attributes: &attributes,
		content: Node::Multi(&content),
		event_bindings: &[],
	};
	let vdom: Node<ThreadBound> = Node::HtmlElement { element: &element, dom_binding: None };

	let child = Child::try_from(&vdom).unwrap();
	assert_eq!(
		child,
		Child::Element(ElementNode::new("p").prop("class", "greeting").child("Hello").child(" lignin!"))
	);

	let mut target = MemoryTarget::new();
	let root = target.create_root();
	match child {
		Child::Element(element) => render(&mut target, &element, &root).unwrap(),
		other => panic!("expected element, got {:?}", other),
	};
	assert_eq!(target.to_markup(root), "<p class=\"greeting\">Hello lignin!</p>");
}

#[test]
fn empty_content_has_no_children() {
	let element = Element {
		name: "br",
		creation_options: ElementCreationOptions::new(),
		attributes: &[],
		content: Node::Multi(&[]),
		event_bindings: &[],
	};
	let vdom: Node<ThreadBound> = Node::HtmlElement { element: &element, dom_binding: None };

	assert_eq!(Child::try_from(&vdom), Ok(Child::Element(ElementNode::new("br"))));
}

#[test]
fn keyed_and_memoized_keep_order() {
	let memoized_content: Node<ThreadBound> = Node::Text { text: "c", dom_binding: None };
	let fragments = [
		ReorderableFragment {
			dom_key: 7,
			content: Node::Text { text: "a", dom_binding: None },
		},
		ReorderableFragment {
			dom_key: 3,
			content: Node::Text { text: "b", dom_binding: None },
		},
	];
	let nodes = [
		Node::Keyed(&fragments),
		Node::Memoized {
			state_key: 0,
			content: &memoized_content,
		},
	];
	let vdom: Node<ThreadBound> = Node::Multi(&nodes);

	assert_eq!(
		Child::try_from(&vdom),
		Ok(Child::Sequence(vec![
			Child::Sequence(vec![Child::from("a"), Child::from("b")]),
			Child::from("c"),
		]))
	);
}

#[test]
fn comment_is_unsupported() {
	let nodes = [Node::Comment {
		comment: "not mountable",
		dom_binding: None,
	}];
	let vdom: Node<ThreadBound> = Node::Multi(&nodes);

	assert_eq!(Child::try_from(&vdom), Err(RenderError::UnsupportedChildType { kind: "comment" }));
}
