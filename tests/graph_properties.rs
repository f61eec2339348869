use medkg_editor::graph::{GraphData, GraphEdge, GraphNode, GraphStore, NodePatch, NodeType};
use medkg_editor::interaction::search::search_marks;
use proptest::prelude::*;

fn arb_node_type() -> impl Strategy<Value = NodeType> {
	prop::sample::select(NodeType::ALL.to_vec())
}

/// Graphs of up to 12 nodes with ids "0".."n" and arbitrary edges between them.
fn arb_graph() -> impl Strategy<Value = GraphData> {
	(1usize..12).prop_flat_map(|n| {
		let nodes = prop::collection::vec(("[a-zA-Z食管癌]{0,6}", arb_node_type()), n);
		let edges = prop::collection::vec((0..n, 0..n, "[a-z]{1,4}"), 0..n * 2);
		(nodes, edges).prop_map(|(nodes, edges)| GraphData {
			nodes: nodes
				.into_iter()
				.enumerate()
				.map(|(i, (label, node_type))| GraphNode {
					id: i.to_string(),
					label,
					node_type,
					color: node_type.color().into(),
					size: None,
					x: None,
					y: None,
				})
				.collect(),
			edges: edges
				.into_iter()
				.map(|(s, t, label)| GraphEdge {
					id: String::new(),
					source: s.to_string(),
					target: t.to_string(),
					label,
				})
				.collect(),
		})
	})
}

proptest! {
	#[test]
	fn loaded_graphs_link_each_pair_at_most_once(data in arb_graph()) {
		let store = GraphStore::new(data);
		let snapshot = store.snapshot();
		let mut pairs = std::collections::HashSet::new();
		for edge in &snapshot.edges {
			prop_assert_ne!(&edge.source, &edge.target);
			prop_assert!(pairs.insert((edge.source.clone(), edge.target.clone())));
		}
	}

	#[test]
	fn delete_node_removes_exactly_its_edges(
		data in arb_graph(),
		pick in any::<prop::sample::Index>(),
	) {
		let mut store = GraphStore::new(data);
		let before = store.snapshot();
		let victim = before.nodes[pick.index(before.nodes.len())].id.clone();

		prop_assert!(store.delete_node(&victim));
		let after = store.snapshot();

		prop_assert!(after.edges.iter().all(|e| !e.touches(&victim)));
		let kept_nodes: Vec<_> =
			before.nodes.iter().filter(|n| n.id != victim).cloned().collect();
		let kept_edges: Vec<_> =
			before.edges.iter().filter(|e| !e.touches(&victim)).cloned().collect();
		prop_assert_eq!(&after.nodes, &kept_nodes);
		prop_assert_eq!(&after.edges, &kept_edges);
	}

	#[test]
	fn second_edge_between_same_pair_is_rejected(
		data in arb_graph(),
		s in any::<prop::sample::Index>(),
		t in any::<prop::sample::Index>(),
		first in "[a-z]{1,5}",
		second in "[a-z]{1,5}",
	) {
		let mut store = GraphStore::new(data);
		let n = store.node_count();
		let (s, t) = (s.index(n).to_string(), t.index(n).to_string());
		prop_assume!(s != t && !store.has_edge(&s, &t));

		store.add_edge(&s, &t, Some(&first)).unwrap();
		let after_first = store.snapshot();
		prop_assert!(store.add_edge(&s, &t, Some(&second)).is_err());
		prop_assert_eq!(&*store.snapshot(), &*after_first);

		let matching: Vec<_> = after_first
			.edges
			.iter()
			.filter(|e| e.source == s && e.target == t)
			.collect();
		prop_assert_eq!(matching.len(), 1);
		prop_assert_eq!(&matching[0].label, &first);
	}

	#[test]
	fn relabeling_a_node_is_idempotent(
		data in arb_graph(),
		pick in any::<prop::sample::Index>(),
		label in "\\PC{1,8}",
	) {
		let mut once = GraphStore::new(data);
		let id = once.snapshot().nodes[pick.index(once.node_count())].id.clone();
		let mut twice = once.clone();
		let patch = NodePatch { label: Some(label), ..Default::default() };

		once.update_node(&id, patch.clone());
		twice.update_node(&id, patch.clone());
		twice.update_node(&id, patch);
		prop_assert_eq!(once.node(&id), twice.node(&id));
	}

	#[test]
	fn search_marks_follow_label_containment(data in arb_graph(), query in "[a-zA-Z食管]{0,2}") {
		let marks = search_marks(&data.nodes, &query);
		for node in &data.nodes {
			let m = marks[&node.id];
			let hit =
				!query.is_empty() && node.label.to_lowercase().contains(&query.to_lowercase());
			prop_assert_eq!(m.highlight, hit);
			prop_assert_eq!(m.dim, !query.is_empty() && !hit);
		}
	}
}
