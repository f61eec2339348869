use leptos::prelude::*;

use super::editor_state::use_editor;

#[component]
pub fn Toolbar(#[prop(into)] title: String) -> impl IntoView {
	let editor = use_editor();
	let ui = editor.ui;
	let link_mode = move || ui.with(|c| c.link_mode);
	let search = move || ui.with(|c| c.search.clone());

	view! {
		<header class="toolbar">
			<div class="toolbar-title">
				<span class="toolbar-logo">"◎"</span>
				<h1>{title}</h1>
			</div>

			<div class="toolbar-actions">
				<div class="search-box">
					<span class="search-icon">"⌕"</span>
					<input
						type="text"
						placeholder="搜索节点..."
						prop:value=search
						on:input=move |ev| {
							let query = event_target_value(&ev);
							editor.apply_ui(|c| c.set_search(query));
						}
					/>
					<Show when=move || !search().is_empty()>
						<button
							class="search-clear"
							title="清除"
							on:click=move |_| editor.apply_ui(|c| c.set_search(""))
						>
							"×"
						</button>
					</Show>
				</div>

				<div class="divider"></div>

				<label class=move || if link_mode() { "link-switch on" } else { "link-switch" }>
					<span>"连线模式"</span>
					<input
						type="checkbox"
						prop:checked=link_mode
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							editor.apply_ui(|c| c.set_link_mode(on));
						}
					/>
					<span class="switch-track"></span>
				</label>

				<button
					class="btn btn-primary"
					prop:disabled=link_mode
					on:click=move |_| editor.apply_ui(|c| c.open_node_modal())
				>
					"+ 新建节点"
				</button>
			</div>
		</header>
	}
}
