use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::editor_state::use_editor;
use crate::graph::NodeType;
use crate::interaction::forms::{EdgeForm, NodeForm};
use crate::interaction::Selection;

/// Right-hand panel editing the selected node or edge.
#[component]
pub fn EditDrawer() -> impl IntoView {
	let editor = use_editor();
	let (ui, store) = (editor.ui, editor.store);

	let label = RwSignal::new(String::new());
	let node_type = RwSignal::new(NodeType::Symptom);
	let color = RwSignal::new(String::new());

	let bound = Memo::new(move |_| ui.with(|c| c.drawer_open.then(|| c.selection.clone())));
	let is_node = move || matches!(bound.get(), Some(Selection::Node(_)));
	let bound_id = move || match bound.get() {
		Some(Selection::Node(id) | Selection::Edge(id)) => id,
		_ => String::new(),
	};

	// Refill the form whenever the drawer opens on something.
	Effect::new(move |_| {
		let Some(selection) = bound.get() else { return };
		store.with_untracked(|s| match selection {
			Selection::Node(id) => {
				if let Some(node) = s.node(&id) {
					let form = NodeForm::from_node(node);
					label.set(form.label);
					node_type.set(form.node_type);
					color.set(node.color.clone());
				}
			}
			Selection::Edge(id) => {
				if let Some(edge) = s.edge(&id) {
					label.set(EdgeForm::from_edge(edge).label);
				}
			}
			Selection::None => {}
		});
	});

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		editor.apply(|c, s| {
			if matches!(c.selection, Selection::Node(_)) {
				let form = NodeForm {
					label: label.get_untracked(),
					node_type: node_type.get_untracked(),
					color: color.get_untracked().into(),
				};
				c.submit_node_edit(&form, s)
			} else {
				let form = EdgeForm {
					label: label.get_untracked(),
				};
				c.submit_edge_edit(&form, s)
			}
		});
	};

	let type_options = move || {
		NodeType::ALL
			.into_iter()
			.map(|t| {
				view! {
					<option value=t.name() selected=move || node_type.get() == t>
						{t.label()}
					</option>
				}
			})
			.collect_view()
	};

	view! {
		<aside class=move || {
			if bound.get().is_some() { "drawer open" } else { "drawer" }
		}>
			<div class="drawer-header">
				<h2>
					{move || if is_node() { "编辑节点属性" } else { "编辑连线属性" }}
				</h2>
				<button
					class="btn btn-danger btn-small"
					on:click=move |_| {
						editor.apply_ui(|c| {
							c.request_delete();
						})
					}
				>
					"删除"
				</button>
				<button
					class="drawer-close"
					on:click=move |_| editor.apply_ui(|c| c.close_drawer())
				>
					"×"
				</button>
			</div>

			<form class="drawer-form" on:submit=on_submit>
				<label>
					"ID"
					<input type="text" disabled prop:value=bound_id />
				</label>

				<label>
					"名称/标签"
					<input
						type="text"
						required
						prop:value=move || label.get()
						on:input=move |ev| label.set(event_target_value(&ev))
					/>
				</label>

				<Show when=is_node>
					<label>
						"类型"
						<select
							prop:value=move || node_type.get().name()
							on:change=move |ev| {
								if let Ok(t) = event_target_value(&ev).parse::<NodeType>() {
									node_type.set(t);
								}
							}
						>
							{type_options()}
						</select>
					</label>
					<label>
						"颜色"
						<div class="color-field">
							<input
								type="color"
								prop:value=move || color.get()
								on:input=move |ev| color.set(event_target_value(&ev))
							/>
							<input
								type="text"
								prop:value=move || color.get()
								on:change=move |ev| color.set(event_target_value(&ev))
							/>
						</div>
					</label>
				</Show>

				<button type="submit" class="btn btn-primary btn-block">
					"保存更改"
				</button>
			</form>
		</aside>
	}
}
