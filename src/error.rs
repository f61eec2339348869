//! Error types for graph and form operations.

use thiserror::Error;

/// Result alias for graph store operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Rejections raised by the graph store. None of them are fatal: callers turn
/// them into advisory notices and keep the current snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// An edge with the same ordered (source, target) pair already exists.
	#[error("edge {from} -> {to} already exists")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},
	/// An edge endpoint does not name an existing node.
	#[error("unknown node: {0}")]
	UnknownNode(String),
	/// Source and target are the same node.
	#[error("cannot link node {0} to itself")]
	SelfLoop(String),
}

/// Validation failures at the form boundary, before anything reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
	/// Required label left blank.
	#[error("label must not be empty")]
	EmptyLabel,
	/// Color value could not be read as a hex or rgb() color.
	#[error("invalid color: {0}")]
	InvalidColor(String),
	/// Node type name not among the known types.
	#[error("unknown node type: {0}")]
	UnknownNodeType(String),
}

/// Failures while reading page-embedded configuration or data.
#[derive(Error, Debug)]
pub enum ConfigError {
	/// The embedded JSON did not parse.
	#[error("invalid JSON in #{element}: {source}")]
	Json {
		/// Id of the script element that was read.
		element: &'static str,
		/// Underlying parse error.
		#[source]
		source: serde_json::Error,
	},
}
