//! The authoritative in-memory graph.
//!
//! Every mutation builds the next [`GraphData`] from the current one and swaps
//! it in whole, so a snapshot handed out earlier never changes underneath its
//! holder.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use super::types::{GraphData, GraphEdge, GraphNode, NodePatch, NodeType};
use crate::config::DEFAULT_EDGE_LABEL;
use crate::error::{GraphError, Result};

/// Owns the current graph snapshot and the operations that replace it.
#[derive(Clone, Debug)]
pub struct GraphStore {
	snapshot: Arc<GraphData>,
	default_edge_label: String,
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new(GraphData::default())
	}
}

impl GraphStore {
	/// Loads `data`, assigning ids to edges that lack one. Duplicate node ids,
	/// edges with dangling endpoints, self-loops and repeats of an already
	/// linked (source, target) pair are dropped.
	pub fn new(data: GraphData) -> Self {
		let mut seen = HashSet::new();
		let mut nodes = Vec::with_capacity(data.nodes.len());
		for node in data.nodes {
			if seen.insert(node.id.clone()) {
				nodes.push(node);
			} else {
				warn!("dropping duplicate node id {}", node.id);
			}
		}

		let mut edge_ids = HashSet::new();
		let mut pairs = HashSet::new();
		let mut edges = Vec::with_capacity(data.edges.len());
		for mut edge in data.edges {
			if !seen.contains(&edge.source) || !seen.contains(&edge.target) {
				warn!(
					"dropping edge {} -> {}: endpoint missing",
					edge.source, edge.target
				);
				continue;
			}
			if edge.source == edge.target {
				warn!("dropping self-loop on {}", edge.source);
				continue;
			}
			if !pairs.insert((edge.source.clone(), edge.target.clone())) {
				warn!(
					"dropping edge {} -> {}: pair already linked",
					edge.source, edge.target
				);
				continue;
			}
			if edge.id.is_empty() || edge_ids.contains(&edge.id) {
				edge.id = fresh_id(|id| edge_ids.contains(id));
			}
			edge_ids.insert(edge.id.clone());
			edges.push(edge);
		}

		debug!("graph store loaded: {} nodes, {} edges", nodes.len(), edges.len());
		Self {
			snapshot: Arc::new(GraphData { nodes, edges }),
			default_edge_label: DEFAULT_EDGE_LABEL.to_string(),
		}
	}

	/// Store loaded with the built-in esophageal cancer dataset.
	pub fn seeded() -> Self {
		Self::new(super::seed::initial_data())
	}

	/// Label used by [`add_edge`](Self::add_edge) when none is supplied.
	pub fn with_default_edge_label(mut self, label: impl Into<String>) -> Self {
		self.default_edge_label = label.into();
		self
	}

	/// The current snapshot. Cheap to clone, never mutated afterwards.
	pub fn snapshot(&self) -> Arc<GraphData> {
		Arc::clone(&self.snapshot)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.snapshot.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
		self.snapshot.edges.iter().find(|e| e.id == id)
	}

	/// Whether an edge already runs from `source` to `target`.
	pub fn has_edge(&self, source: &str, target: &str) -> bool {
		self.snapshot
			.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	}

	pub fn node_count(&self) -> usize {
		self.snapshot.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.snapshot.edges.len()
	}

	fn commit(&mut self, next: GraphData) {
		self.snapshot = Arc::new(next);
	}

	/// Appends a node with a fresh id and the type's default size.
	pub fn add_node(
		&mut self,
		label: impl Into<String>,
		node_type: NodeType,
		color: impl Into<String>,
	) -> &GraphNode {
		let mut next = GraphData::clone(&self.snapshot);
		let id = fresh_id(|id| next.nodes.iter().any(|n| n.id == id));
		debug!("add node {id} ({node_type})");
		next.nodes.push(GraphNode {
			id,
			label: label.into(),
			node_type,
			color: color.into(),
			size: Some(node_type.default_size()),
			x: None,
			y: None,
		});
		self.commit(next);
		// The node was pushed just above.
		&self.snapshot.nodes[self.snapshot.nodes.len() - 1]
	}

	/// Merges `patch` into the node. Returns `false`, changing nothing, when
	/// no node has that id.
	pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
		let Some(pos) = self.snapshot.nodes.iter().position(|n| n.id == id) else {
			debug!("update node {id}: not found");
			return false;
		};
		let mut next = GraphData::clone(&self.snapshot);
		let node = &mut next.nodes[pos];
		if let Some(label) = patch.label {
			node.label = label;
		}
		if let Some(node_type) = patch.node_type {
			node.node_type = node_type;
		}
		if let Some(color) = patch.color {
			node.color = color;
		}
		if let Some(size) = patch.size {
			node.size = Some(size);
		}
		debug!("update node {id}");
		self.commit(next);
		true
	}

	/// Removes the node and every edge that references it.
	pub fn delete_node(&mut self, id: &str) -> bool {
		if self.node(id).is_none() {
			debug!("delete node {id}: not found");
			return false;
		}
		let nodes = self
			.snapshot
			.nodes
			.iter()
			.filter(|n| n.id != id)
			.cloned()
			.collect();
		let edges: Vec<GraphEdge> = self
			.snapshot
			.edges
			.iter()
			.filter(|e| !e.touches(id))
			.cloned()
			.collect();
		debug!(
			"delete node {id}, cascading {} edges",
			self.edge_count() - edges.len()
		);
		self.commit(GraphData { nodes, edges });
		true
	}

	/// Adds `source -> target`. A blank or missing label falls back to the
	/// default edge label.
	pub fn add_edge(
		&mut self,
		source: &str,
		target: &str,
		label: Option<&str>,
	) -> Result<&GraphEdge> {
		for endpoint in [source, target] {
			if self.node(endpoint).is_none() {
				return Err(GraphError::UnknownNode(endpoint.to_string()));
			}
		}
		if source == target {
			return Err(GraphError::SelfLoop(source.to_string()));
		}
		if self.has_edge(source, target) {
			warn!("rejecting duplicate edge {source} -> {target}");
			return Err(GraphError::DuplicateEdge {
				from: source.to_string(),
				to: target.to_string(),
			});
		}

		let label = label
			.map(str::trim)
			.filter(|l| !l.is_empty())
			.unwrap_or(&self.default_edge_label)
			.to_string();
		let mut next = GraphData::clone(&self.snapshot);
		let id = fresh_id(|id| next.edges.iter().any(|e| e.id == id));
		debug!("add edge {id}: {source} -> {target} ({label})");
		next.edges.push(GraphEdge {
			id,
			source: source.to_string(),
			target: target.to_string(),
			label,
		});
		self.commit(next);
		Ok(&self.snapshot.edges[self.snapshot.edges.len() - 1])
	}

	/// Relabels the edge with identifier `id`.
	pub fn update_edge(&mut self, id: &str, label: impl Into<String>) -> bool {
		let Some(pos) = self.snapshot.edges.iter().position(|e| e.id == id) else {
			debug!("update edge {id}: not found");
			return false;
		};
		let mut next = GraphData::clone(&self.snapshot);
		next.edges[pos].label = label.into();
		debug!("update edge {id}");
		self.commit(next);
		true
	}

	pub fn delete_edge(&mut self, id: &str) -> bool {
		let Some(pos) = self.snapshot.edges.iter().position(|e| e.id == id) else {
			debug!("delete edge {id}: not found");
			return false;
		};
		let mut next = GraphData::clone(&self.snapshot);
		next.edges.remove(pos);
		debug!("delete edge {id}");
		self.commit(next);
		true
	}

	/// Records layout coordinates reported by the renderer. Unknown ids are
	/// ignored. Nothing is committed when no coordinate actually moved.
	pub fn set_positions<'a>(&mut self, positions: impl IntoIterator<Item = (&'a str, f64, f64)>) {
		let mut next: Option<GraphData> = None;
		for (id, x, y) in positions {
			let current = next.as_ref().unwrap_or(&*self.snapshot);
			let Some(pos) = current.nodes.iter().position(|n| n.id == id) else {
				continue;
			};
			if current.nodes[pos].x == Some(x) && current.nodes[pos].y == Some(y) {
				continue;
			}
			let data = next.get_or_insert_with(|| GraphData::clone(&self.snapshot));
			data.nodes[pos].x = Some(x);
			data.nodes[pos].y = Some(y);
		}
		if let Some(data) = next {
			self.commit(data);
		}
	}
}

fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
	loop {
		let id = Uuid::new_v4().simple().to_string();
		if !taken(&id) {
			return id;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: format!("node {id}"),
			node_type: NodeType::Symptom,
			color: NodeType::Symptom.color().into(),
			size: None,
			x: None,
			y: None,
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			label: "rel".into(),
		}
	}

	#[test]
	fn load_assigns_missing_edge_ids_and_drops_dangling() {
		let store = GraphStore::new(GraphData {
			nodes: vec![node("a"), node("b"), node("a")],
			edges: vec![
				edge("", "a", "b"),
				edge("", "b", "a"),
				edge("x", "a", "zzz"),
				edge("y", "a", "b"),
				edge("z", "a", "a"),
			],
		});
		assert_eq!(store.node_count(), 2);
		assert_eq!(store.edge_count(), 2);
		let snapshot = store.snapshot();
		let ids: HashSet<_> = snapshot.edges.iter().map(|e| e.id.clone()).collect();
		assert_eq!(ids.len(), 2);
		assert!(!ids.contains(""));
		assert!(!ids.contains("y"));
		assert!(snapshot.edges.iter().all(|e| e.source != e.target));
		assert_eq!(
			snapshot
				.edges
				.iter()
				.filter(|e| e.source == "a" && e.target == "b")
				.count(),
			1
		);
	}

	#[test]
	fn add_node_uses_type_size_and_fresh_id() {
		let mut store = GraphStore::new(GraphData {
			nodes: vec![node("a")],
			edges: vec![],
		});
		let disease = store.add_node("新病", NodeType::Disease, "#ff4d4f").clone();
		let symptom = store.add_node("新症状", NodeType::Symptom, "#fa8c16").clone();
		assert_eq!(disease.size, Some(50.0));
		assert_eq!(symptom.size, Some(40.0));
		assert_ne!(disease.id, symptom.id);
		assert_eq!(store.node_count(), 3);
	}

	#[test]
	fn update_missing_node_is_a_noop() {
		let mut store = GraphStore::seeded();
		let before = store.snapshot();
		let patch = NodePatch {
			label: Some("x".into()),
			..Default::default()
		};
		assert!(!store.update_node("nope", patch));
		assert!(Arc::ptr_eq(&before, &store.snapshot()));
	}

	#[test]
	fn mutations_leave_old_snapshots_intact() {
		let mut store = GraphStore::seeded();
		let before = store.snapshot();
		assert!(store.delete_node("1"));
		assert_eq!(before.nodes.len(), 15);
		assert_eq!(before.edges.len(), 14);
		assert_eq!(store.node_count(), 14);
	}

	#[test]
	fn add_edge_defaults_blank_label() {
		let mut store = GraphStore::seeded();
		let e = store.add_edge("2", "3", Some("  ")).unwrap();
		assert_eq!(e.label, DEFAULT_EDGE_LABEL);
		let mut store = GraphStore::seeded().with_default_edge_label("related");
		let e = store.add_edge("2", "3", None).unwrap();
		assert_eq!(e.label, "related");
	}

	#[test]
	fn add_edge_rejects_unknown_and_self_loops() {
		let mut store = GraphStore::seeded();
		assert_eq!(
			store.add_edge("2", "99", None).unwrap_err(),
			GraphError::UnknownNode("99".into())
		);
		assert_eq!(
			store.add_edge("2", "2", None).unwrap_err(),
			GraphError::SelfLoop("2".into())
		);
		assert_eq!(store.edge_count(), 14);
	}

	#[test]
	fn reverse_direction_is_not_a_duplicate() {
		let mut store = GraphStore::seeded();
		assert!(store.has_edge("1", "2"));
		assert!(store.add_edge("2", "1", Some("反向")).is_ok());
		assert_eq!(store.edge_count(), 15);
	}

	#[test]
	fn edges_are_addressed_by_id() {
		let mut store = GraphStore::seeded();
		let id = store.add_edge("2", "3", Some("a")).unwrap().id.clone();
		assert!(store.update_edge(&id, "b"));
		assert_eq!(store.edge(&id).map(|e| e.label.as_str()), Some("b"));
		assert!(store.delete_edge(&id));
		assert!(!store.delete_edge(&id));
		assert!(!store.update_edge(&id, "c"));
		assert_eq!(store.edge_count(), 14);
	}

	#[test]
	fn set_positions_skips_unchanged() {
		let mut store = GraphStore::seeded();
		store.set_positions([("1", 10.0, 20.0), ("missing", 0.0, 0.0)]);
		let after_first = store.snapshot();
		assert_eq!(store.node("1").and_then(|n| n.x), Some(10.0));
		store.set_positions([("1", 10.0, 20.0)]);
		assert!(Arc::ptr_eq(&after_first, &store.snapshot()));
	}
}
