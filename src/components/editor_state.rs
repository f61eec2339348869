//! Reactive handles shared by every editor widget through context.

use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};

use crate::graph::{GraphData, GraphStore};
use crate::interaction::{InteractionController, Notice, NoticeLevel};

/// A notice currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub notice: Notice,
}

#[derive(Clone, Copy)]
pub struct EditorState {
	pub store: RwSignal<GraphStore>,
	pub ui: RwSignal<InteractionController>,
	pub toasts: RwSignal<Vec<Toast>>,
	/// Current snapshot; only changes when the graph content does.
	pub snapshot: Memo<Arc<GraphData>>,
	next_toast: StoredValue<u64>,
	notice_ms: u64,
}

impl EditorState {
	pub fn new(store: GraphStore, notice_ms: u64) -> Self {
		let store = RwSignal::new(store);
		Self {
			store,
			ui: RwSignal::new(InteractionController::new()),
			toasts: RwSignal::new(Vec::new()),
			snapshot: Memo::new(move |_| store.with(GraphStore::snapshot)),
			next_toast: StoredValue::new(0),
			notice_ms,
		}
	}

	/// Runs a controller operation that may touch the graph.
	pub fn apply(
		self,
		f: impl FnOnce(&mut InteractionController, &mut GraphStore) -> Option<Notice>,
	) {
		let mut notice = None;
		self.ui.update(|c| self.store.update(|s| notice = f(c, s)));
		self.notify(notice);
	}

	/// Runs a controller operation that only changes interaction state.
	pub fn apply_ui(self, f: impl FnOnce(&mut InteractionController)) {
		self.ui.update(f);
	}

	pub fn notify(self, notice: Option<Notice>) {
		let Some(notice) = notice else { return };
		match notice.level {
			NoticeLevel::Success => info!("{}", notice.text),
			NoticeLevel::Warning | NoticeLevel::Error => warn!("{}", notice.text),
		}
		let id = self.next_toast.get_value();
		self.next_toast.set_value(id + 1);
		self.toasts.update(|t| t.push(Toast { id, notice }));
		let toasts = self.toasts;
		set_timeout(
			move || toasts.update(|t| t.retain(|toast| toast.id != id)),
			Duration::from_millis(self.notice_ms),
		);
	}

	/// Label of node `id` in the current snapshot.
	pub fn node_label(self, id: &str) -> String {
		self.snapshot.with(|data| {
			data.nodes
				.iter()
				.find(|n| n.id == id)
				.map(|n| n.label.clone())
				.unwrap_or_default()
		})
	}
}

pub fn use_editor() -> EditorState {
	expect_context::<EditorState>()
}
