use leptos::ev;
use leptos::prelude::*;
use leptos_meta::Title;
use log::info;
use web_sys::KeyboardEvent;

use crate::components::context_menu::ContextMenuView;
use crate::components::drawer::EditDrawer;
use crate::components::editor_state::EditorState;
use crate::components::force_graph::{ContextMenuEvent, ForceGraphCanvas, NodePosition};
use crate::components::legend::Legend;
use crate::components::modals::{ConfirmDeleteModal, LinkModal, NewNodeModal};
use crate::components::notice::NoticeStack;
use crate::components::toolbar::Toolbar;
use crate::config::{load_graph_data, EditorConfig};
use crate::graph::GraphStore;
use crate::interaction::MenuTarget;

/// True while a text field owns the keyboard.
fn text_input_focused() -> bool {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.active_element())
		.map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
		.unwrap_or(false)
}

/// The knowledge graph editor.
#[component]
pub fn Editor() -> impl IntoView {
	let config = EditorConfig::load();
	let store = match load_graph_data() {
		Some(data) => GraphStore::new(data),
		None => GraphStore::seeded(),
	}
	.with_default_edge_label(config.default_edge_label.clone());
	info!(
		"editor starting with {} nodes, {} edges",
		store.node_count(),
		store.edge_count()
	);

	let editor = EditorState::new(store, config.notice_ms);
	provide_context(editor);

	let ui = editor.ui;
	let marks = Signal::derive(move || {
		let data = editor.snapshot.get();
		ui.with(|c| c.marks(&data))
	});

	let _keydown = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if !matches!(ev.key().as_str(), "Delete" | "Backspace") {
			return;
		}
		let focused = text_input_focused();
		editor.apply_ui(|c| {
			c.key_delete(focused);
		});
	});

	let on_node_click = move |id: String| editor.apply(|c, s| c.click_node(&id, s));
	let on_edge_click = move |id: String| {
		editor.apply(|c, s| {
			c.click_edge(&id, s);
			None
		})
	};
	let on_canvas_click = move |_: ()| editor.apply_ui(|c| c.click_canvas());
	let on_context_menu = move |ev: ContextMenuEvent| {
		let target = ev.node.map_or(MenuTarget::Canvas, MenuTarget::Node);
		editor.apply_ui(|c| c.open_context_menu(ev.client_x, ev.client_y, target));
	};
	let on_positions = move |positions: Vec<NodePosition>| {
		editor
			.store
			.update(|s| s.set_positions(positions.iter().map(|p| (p.id.as_str(), p.x, p.y))));
	};

	view! {
		<Title text=config.title.clone() />
		<div class="editor" on:click=move |_| editor.apply_ui(|c| c.dismiss_context_menu())>
			<Toolbar title=config.title.clone() />
			<main class="editor-content">
				<ForceGraphCanvas
					data=editor.snapshot
					marks=marks
					config=config.clone()
					on_node_click=on_node_click
					on_edge_click=on_edge_click
					on_canvas_click=on_canvas_click
					on_context_menu=on_context_menu
					on_positions=on_positions
				/>
				<Legend />
				<ContextMenuView />
				<EditDrawer />
			</main>
			<NewNodeModal />
			<LinkModal />
			<ConfirmDeleteModal />
			<NoticeStack />
		</div>
	}
}
