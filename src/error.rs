use thiserror::Error;

/// Reasons a mount can fail.
///
/// All of these are caller input errors. Rendering stops at the first one and nothing further is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
	#[error("element type {tag:?} can't be created by this target")]
	InvalidElementType { tag: String },

	#[error("unsupported child type: {kind}")]
	UnsupportedChildType { kind: &'static str },

	#[error("the mount container can't accept child nodes")]
	InvalidMountTarget,

	#[error("property {key:?} was rejected by the target")]
	PropertyRejected { key: String },

	#[error("element nesting exceeds the depth limit of {limit}")]
	DepthLimitReached { limit: usize },
}

pub type Result<T, E = RenderError> = core::result::Result<T, E>;
