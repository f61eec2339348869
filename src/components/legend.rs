use leptos::prelude::*;

use super::editor_state::use_editor;
use crate::graph::NodeType;

/// Node type colors, with how many nodes of each type the graph holds.
#[component]
pub fn Legend() -> impl IntoView {
	let snapshot = use_editor().snapshot;

	let rows = NodeType::ALL
		.into_iter()
		.map(|node_type| {
			let count = move || {
				snapshot.with(|d| d.nodes.iter().filter(|n| n.node_type == node_type).count())
			};
			view! {
				<div class="legend-row">
					<span class="legend-dot" style:background-color=node_type.color()></span>
					<span class="legend-label">{node_type.label()}</span>
					<span class="legend-count">{count}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="legend">
			<h3>"图例 (Legend)"</h3>
			<div class="legend-rows">{rows}</div>
			<p class="legend-stats">
				{move || {
					snapshot.with(|d| {
						format!("{} 节点 · {} 连线", d.nodes.len(), d.edges.len())
					})
				}}
			</p>
		</div>
	}
}
