use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::editor_state::use_editor;
use crate::graph::NodeType;
use crate::interaction::forms::{LinkForm, NodeForm};

#[component]
fn Modal(
	#[prop(into)] title: String,
	#[prop(into)] on_ok: Callback<()>,
	#[prop(into)] on_cancel: Callback<()>,
	#[prop(default = false)] danger: bool,
	children: Children,
) -> impl IntoView {
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		on_ok.run(());
	};

	view! {
		<div class="modal-mask" on:click=move |_| on_cancel.run(())>
			<form class="modal" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
				<div class="modal-header">
					<h2>{title}</h2>
					<button type="button" class="modal-close" on:click=move |_| on_cancel.run(())>
						"×"
					</button>
				</div>
				<div class="modal-body">{children()}</div>
				<div class="modal-footer">
					<button type="button" class="btn" on:click=move |_| on_cancel.run(())>
						"取消"
					</button>
					<button
						type="submit"
						class=if danger { "btn btn-danger" } else { "btn btn-primary" }
					>
						"确定"
					</button>
				</div>
			</form>
		</div>
	}
}

/// "New node" dialog. Choosing a type resets the color to that type's.
#[component]
pub fn NewNodeModal() -> impl IntoView {
	let editor = use_editor();
	let ui = editor.ui;
	let open = move || ui.with(|c| c.node_modal_open);

	let form = RwSignal::new(NodeForm::default());
	Effect::new(move |was_open: Option<bool>| {
		let now = open();
		if now && was_open != Some(true) {
			form.set(NodeForm::default());
		}
		now
	});

	let color_text = move || form.with(|f| f.color.to_hex().unwrap_or_default());

	view! {
		<Show when=open>
			<Modal
				title="新建节点"
				on_ok=move |_: ()| {
					let draft = form.get_untracked();
					editor.apply(|c, s| c.submit_new_node(&draft, s));
				}
				on_cancel=move |_: ()| editor.apply_ui(|c| c.close_node_modal())
			>
				<label>
					"节点名称"
					<input
						type="text"
						placeholder="例如: 吞咽疼痛"
						prop:value=move || form.with(|f| f.label.clone())
						on:input=move |ev| {
							let label = event_target_value(&ev);
							form.update(|f| f.label = label);
						}
					/>
				</label>
				<label>
					"类型"
					<select
						prop:value=move || form.with(|f| f.node_type.name())
						on:change=move |ev| {
							if let Ok(t) = event_target_value(&ev).parse::<NodeType>() {
								form.update(|f| f.set_type(t));
							}
						}
					>
						{NodeType::ALL
							.into_iter()
							.map(|t| {
								view! {
									<option
										value=t.name()
										selected=move || form.with(|f| f.node_type == t)
									>
										{t.label()}
									</option>
								}
							})
							.collect_view()}
					</select>
				</label>
				<label>
					"颜色"
					<div class="color-field">
						<input type="color" disabled prop:value=color_text />
						<span class="color-text">{color_text}</span>
					</div>
				</label>
			</Modal>
		</Show>
	}
}

/// Asks for the relationship label once link mode has picked two nodes.
#[component]
pub fn LinkModal() -> impl IntoView {
	let editor = use_editor();
	let ui = editor.ui;
	let pending = Memo::new(move |_| ui.with(|c| c.pending_link.clone()));
	let label = RwSignal::new(String::new());

	Effect::new(move |_| {
		if pending.get().is_some() {
			label.set(String::new());
		}
	});

	let endpoints = move || {
		pending
			.get()
			.map(|link| (editor.node_label(&link.source), editor.node_label(&link.target)))
			.unwrap_or_default()
	};

	view! {
		<Show when=move || pending.get().is_some()>
			<Modal
				title="创建连线"
				on_ok=move |_: ()| {
					let form = LinkForm {
						label: label.get_untracked(),
					};
					editor.apply(|c, s| c.confirm_link(&form, s));
				}
				on_cancel=move |_: ()| editor.apply_ui(|c| c.cancel_link())
			>
				<p class="link-endpoints">
					"连接: " <b>{move || endpoints().0}</b> " -> " <b>{move || endpoints().1}</b>
				</p>
				<label>
					"关系名称 (Label)"
					<input
						type="text"
						placeholder="例如: 导致, 属于, 治疗"
						prop:value=move || label.get()
						on:input=move |ev| label.set(event_target_value(&ev))
					/>
				</label>
			</Modal>
		</Show>
	}
}

/// Confirmation for a staged delete.
#[component]
pub fn ConfirmDeleteModal() -> impl IntoView {
	let editor = use_editor();
	let ui = editor.ui;
	let pending = Memo::new(move |_| ui.with(|c| c.pending_delete.clone()));

	view! {
		<Show when=move || pending.get().is_some()>
			<Modal
				title=pending.get_untracked().map(|p| p.title()).unwrap_or_default()
				danger=true
				on_ok=move |_: ()| editor.apply(|c, s| c.confirm_delete(s))
				on_cancel=move |_: ()| editor.apply_ui(|c| c.cancel_delete())
			>
				<p>{move || pending.get().map(|p| p.detail()).unwrap_or_default()}</p>
			</Modal>
		</Show>
	}
}
