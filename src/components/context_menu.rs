use leptos::prelude::*;

use super::editor_state::use_editor;
use crate::interaction::{ContextMenu, MenuTarget};

/// Right-click menu, pinned to where the pointer was.
#[component]
pub fn ContextMenuView() -> impl IntoView {
	let editor = use_editor();
	let ui = editor.ui;
	let menu = Memo::new(move |_| ui.with(|c| c.context_menu.clone()));

	let items = move |menu: ContextMenu| match menu.target {
		MenuTarget::Node(_) => view! {
			<button
				class="menu-item"
				on:click=move |ev| {
					ev.stop_propagation();
					editor.apply(|c, s| {
						c.context_edit(s);
						None
					});
				}
			>
				"编辑属性"
			</button>
			<button
				class="menu-item danger"
				on:click=move |ev| {
					ev.stop_propagation();
					editor.apply_ui(|c| c.context_delete());
				}
			>
				"删除节点"
			</button>
		}
		.into_any(),
		MenuTarget::Canvas => view! {
			<button
				class="menu-item"
				on:click=move |ev| {
					ev.stop_propagation();
					editor.apply_ui(|c| c.context_create_node());
				}
			>
				"新增节点"
			</button>
		}
		.into_any(),
	};

	move || {
		menu.get().map(|m| {
			view! {
				<div
					class="context-menu"
					style:left=format!("{}px", m.x)
					style:top=format!("{}px", m.y)
					on:contextmenu=|ev| ev.prevent_default()
				>
					{items(m.clone())}
				</div>
			}
		})
	}
}
