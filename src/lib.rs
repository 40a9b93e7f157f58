#![doc(html_root_url = "https://docs.rs/element-mount/0.1.0")]
#![warn(clippy::pedantic)]

//! One-shot mounting of declarative element trees.
//!
//! An [`ElementNode`] describes a single native node by tag, [`Props`] and children.
//! [`Renderer::render`] walks that description depth-first, creates one native node per element through a [`Target`]
//! and appends the finished subtree to an existing mount container.
//!
//! There is no diffing: each call mounts a fresh, independent subtree.

pub use lignin;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod dom;
pub mod element;
mod error;
pub mod lignin_interop;
pub mod load;
pub mod memory;
mod render;
pub mod target;

pub use element::{Child, ElementNode, Handler, PropValue, Props};
pub use error::RenderError;
pub use render::{render, Renderer};
pub use target::Target;
