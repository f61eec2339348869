use std::collections::HashMap;

use crate::graph::GraphNode;

/// Visual state flags for one node. Several may be set at once; the renderer
/// layers them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeMarks {
	pub highlight: bool,
	pub dim: bool,
	pub selected: bool,
	pub source: bool,
}

impl NodeMarks {
	pub fn is_plain(&self) -> bool {
		*self == Self::default()
	}
}

/// Marks keyed by node id.
pub type MarkMap = HashMap<String, NodeMarks>;

/// Case-insensitive substring test used by the search box.
pub fn label_matches(label: &str, query: &str) -> bool {
	!query.is_empty() && label.to_lowercase().contains(&query.to_lowercase())
}

/// Highlight every node whose label contains `query` and dim the rest. An
/// empty query leaves every node unmarked.
pub fn search_marks(nodes: &[GraphNode], query: &str) -> MarkMap {
	nodes
		.iter()
		.map(|n| {
			let marks = if query.is_empty() {
				NodeMarks::default()
			} else {
				let hit = label_matches(&n.label, query);
				NodeMarks {
					highlight: hit,
					dim: !hit,
					..Default::default()
				}
			};
			(n.id.clone(), marks)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::seed::initial_data;

	#[test]
	fn empty_query_clears_everything() {
		let marks = search_marks(&initial_data().nodes, "");
		assert_eq!(marks.len(), 15);
		assert!(marks.values().all(NodeMarks::is_plain));
	}

	#[test]
	fn substring_highlights_and_dims_the_rest() {
		let marks = search_marks(&initial_data().nodes, "食管");
		let highlighted: Vec<_> = {
			let mut ids: Vec<_> = marks
				.iter()
				.filter(|(_, m)| m.highlight)
				.map(|(id, _)| id.as_str())
				.collect();
			ids.sort_unstable();
			ids
		};
		assert_eq!(highlighted, ["1", "14", "15"]);
		assert!(marks.values().all(|m| m.highlight != m.dim));
	}

	#[test]
	fn matching_ignores_case() {
		assert!(label_matches("CT扫描", "ct"));
		assert!(label_matches("ct扫描", "CT"));
		assert!(!label_matches("胃镜检查", "ct"));
		assert!(!label_matches("anything", ""));
	}
}
