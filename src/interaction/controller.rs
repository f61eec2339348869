//! Translates pointer and keyboard gestures into store operations and panel
//! state.
//!
//! The controller never owns the graph. Operations that read or change it
//! borrow the [`GraphStore`] for the duration of the call, and every
//! user-facing outcome comes back as a [`Notice`].

use log::debug;

use super::forms::{EdgeForm, LinkForm, NodeForm};
use super::search::{search_marks, MarkMap};
use crate::error::{FormError, GraphError};
use crate::graph::{GraphData, GraphStore};

/// What the edit drawer is bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Node(String),
	Edge(String),
}

/// What a context menu was opened on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuTarget {
	Node(String),
	Canvas,
}

/// An open context menu, anchored at viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
	pub x: f64,
	pub y: f64,
	pub target: MenuTarget,
}

/// Source and target picked in link mode, waiting for a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLink {
	pub source: String,
	pub target: String,
}

/// A delete waiting for the user to confirm it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingDelete {
	Node(String),
	Edge(String),
}

impl PendingDelete {
	pub fn title(&self) -> &'static str {
		match self {
			Self::Node(_) => "确认删除该节点?",
			Self::Edge(_) => "确认删除该连线?",
		}
	}

	pub fn detail(&self) -> &'static str {
		match self {
			Self::Node(_) => "删除节点将同时删除相关连线",
			Self::Edge(_) => "此操作不可恢复",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Success,
	Warning,
	Error,
}

/// A transient, advisory message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub text: String,
}

impl Notice {
	pub fn success(text: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Success,
			text: text.into(),
		}
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Warning,
			text: text.into(),
		}
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Error,
			text: text.into(),
		}
	}
}

impl From<&GraphError> for Notice {
	fn from(e: &GraphError) -> Self {
		match e {
			GraphError::DuplicateEdge { .. } => {
				Self::warning("这两个节点之间已经存在连线")
			}
			GraphError::SelfLoop(_) => Self::warning("不能将节点连接到自身"),
			GraphError::UnknownNode(_) => Self::error("节点不存在"),
		}
	}
}

impl From<&FormError> for Notice {
	fn from(e: &FormError) -> Self {
		match e {
			FormError::EmptyLabel => Self::error("请输入名称"),
			FormError::InvalidColor(c) => Self::error(format!("颜色格式无效: {c}")),
			FormError::UnknownNodeType(t) => Self::error(format!("未知节点类型: {t}")),
		}
	}
}

/// Interaction state: selection, link mode and which panels are open.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionController {
	pub selection: Selection,
	pub link_source: Option<String>,
	pub link_mode: bool,
	pub drawer_open: bool,
	pub node_modal_open: bool,
	pub context_menu: Option<ContextMenu>,
	pub pending_link: Option<PendingLink>,
	pub pending_delete: Option<PendingDelete>,
	pub search: String,
}

impl InteractionController {
	pub fn new() -> Self {
		Self::default()
	}

	fn select(&mut self, selection: Selection) {
		self.selection = selection;
		self.drawer_open = true;
	}

	fn clear_selection(&mut self) {
		self.selection = Selection::None;
		self.drawer_open = false;
	}

	/// Turning link mode on closes the edit panel. A source picked earlier
	/// survives until the link is completed or canceled.
	pub fn set_link_mode(&mut self, on: bool) {
		debug!("link mode {}", if on { "on" } else { "off" });
		self.link_mode = on;
		if on {
			self.clear_selection();
			self.node_modal_open = false;
		}
	}

	pub fn click_node(&mut self, id: &str, store: &GraphStore) -> Option<Notice> {
		self.context_menu = None;
		if store.node(id).is_none() {
			return None;
		}
		if !self.link_mode {
			self.select(Selection::Node(id.to_string()));
			return None;
		}

		let Some(source) = self.link_source.take() else {
			debug!("link source set to {id}");
			self.link_source = Some(id.to_string());
			return None;
		};
		if source == id {
			return None;
		}
		if store.has_edge(&source, id) {
			return Some(Notice::from(&GraphError::DuplicateEdge {
				from: source,
				to: id.to_string(),
			}));
		}
		self.pending_link = Some(PendingLink {
			source,
			target: id.to_string(),
		});
		None
	}

	pub fn click_edge(&mut self, id: &str, store: &GraphStore) {
		self.context_menu = None;
		if self.link_mode || store.edge(id).is_none() {
			return;
		}
		self.select(Selection::Edge(id.to_string()));
	}

	/// Background click: drops the selection, any pending link source and
	/// the context menu.
	pub fn click_canvas(&mut self) {
		self.clear_selection();
		if self.link_source.take().is_some() {
			debug!("link canceled");
		}
		self.context_menu = None;
	}

	/// Creates the pending link with the label from `form`.
	pub fn confirm_link(&mut self, form: &LinkForm, store: &mut GraphStore) -> Option<Notice> {
		let link = self.pending_link.take()?;
		match store.add_edge(&link.source, &link.target, form.label()) {
			Ok(_) => Some(Notice::success("连线已建立")),
			Err(e) => Some(Notice::from(&e)),
		}
	}

	pub fn cancel_link(&mut self) {
		self.pending_link = None;
	}

	pub fn open_context_menu(&mut self, x: f64, y: f64, target: MenuTarget) {
		self.context_menu = Some(ContextMenu { x, y, target });
	}

	pub fn dismiss_context_menu(&mut self) {
		self.context_menu = None;
	}

	fn menu_node(&self) -> Option<String> {
		match &self.context_menu {
			Some(ContextMenu {
				target: MenuTarget::Node(id),
				..
			}) => Some(id.clone()),
			_ => None,
		}
	}

	/// "Edit" on a node's context menu.
	pub fn context_edit(&mut self, store: &GraphStore) {
		if let Some(id) = self.menu_node() {
			if store.node(&id).is_some() {
				self.select(Selection::Node(id));
			}
		}
		self.context_menu = None;
	}

	/// "Delete" on a node's context menu; still needs confirmation.
	pub fn context_delete(&mut self) {
		if let Some(id) = self.menu_node() {
			self.pending_delete = Some(PendingDelete::Node(id));
		}
		self.context_menu = None;
	}

	/// "New node" on the canvas context menu. Unlike the toolbar button this
	/// works in link mode too.
	pub fn context_create_node(&mut self) {
		self.context_menu = None;
		self.node_modal_open = true;
	}

	/// Toolbar "New node"; refused while link mode is on.
	pub fn open_node_modal(&mut self) {
		if !self.link_mode {
			self.node_modal_open = true;
		}
	}

	pub fn close_node_modal(&mut self) {
		self.node_modal_open = false;
	}

	pub fn close_drawer(&mut self) {
		self.drawer_open = false;
	}

	/// Stages deletion of the current selection.
	pub fn request_delete(&mut self) -> bool {
		self.pending_delete = match &self.selection {
			Selection::None => return false,
			Selection::Node(id) => Some(PendingDelete::Node(id.clone())),
			Selection::Edge(id) => Some(PendingDelete::Edge(id.clone())),
		};
		true
	}

	/// Delete/Backspace handler. Ignored while a text field has focus.
	pub fn key_delete(&mut self, input_focused: bool) -> bool {
		!input_focused && self.request_delete()
	}

	pub fn confirm_delete(&mut self, store: &mut GraphStore) -> Option<Notice> {
		let pending = self.pending_delete.take()?;
		let deleted = match &pending {
			PendingDelete::Node(id) => {
				if self.link_source.as_deref() == Some(id.as_str()) {
					self.link_source = None;
				}
				store.delete_node(id)
			}
			PendingDelete::Edge(id) => store.delete_edge(id),
		};
		self.clear_selection();
		self.context_menu = None;
		deleted.then(|| Notice::success("删除成功"))
	}

	pub fn cancel_delete(&mut self) {
		self.pending_delete = None;
	}

	/// Saves the edit drawer for a selected node. A node deleted in the
	/// meantime is skipped silently.
	pub fn submit_node_edit(&mut self, form: &NodeForm, store: &mut GraphStore) -> Option<Notice> {
		let Selection::Node(id) = &self.selection else {
			return None;
		};
		let valid = match form.validate() {
			Ok(v) => v,
			Err(e) => return Some(Notice::from(&e)),
		};
		let updated = store.update_node(id, valid.into_patch());
		self.drawer_open = false;
		updated.then(|| Notice::success("更新成功"))
	}

	pub fn submit_edge_edit(&mut self, form: &EdgeForm, store: &mut GraphStore) -> Option<Notice> {
		let Selection::Edge(id) = &self.selection else {
			return None;
		};
		let label = match form.validate() {
			Ok(l) => l,
			Err(e) => return Some(Notice::from(&e)),
		};
		let updated = store.update_edge(id, label);
		self.drawer_open = false;
		updated.then(|| Notice::success("更新成功"))
	}

	/// Validates the new-node modal and adds the node. The modal stays open
	/// on validation failure.
	pub fn submit_new_node(&mut self, form: &NodeForm, store: &mut GraphStore) -> Option<Notice> {
		match form.validate() {
			Ok(valid) => {
				store.add_node(valid.label, valid.node_type, valid.color);
				self.node_modal_open = false;
				Some(Notice::success("节点已创建"))
			}
			Err(e) => Some(Notice::from(&e)),
		}
	}

	pub fn set_search(&mut self, query: impl Into<String>) {
		self.search = query.into();
	}

	/// Visual marks for `data`: search first, then selection, then the link
	/// source so neither of the later two is lost to a search refresh.
	pub fn marks(&self, data: &GraphData) -> MarkMap {
		let mut marks = search_marks(&data.nodes, &self.search);
		if let Selection::Node(id) = &self.selection {
			if let Some(m) = marks.get_mut(id) {
				m.selected = true;
			}
		}
		if self.link_mode {
			if let Some(m) = self.link_source.as_ref().and_then(|id| marks.get_mut(id)) {
				m.source = true;
			}
		}
		marks
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn linking() -> (InteractionController, GraphStore) {
		let mut ui = InteractionController::new();
		ui.set_link_mode(true);
		(ui, GraphStore::seeded())
	}

	#[test]
	fn clicking_a_node_without_link_mode_opens_the_drawer() {
		let mut ui = InteractionController::new();
		let store = GraphStore::seeded();
		assert_eq!(ui.click_node("3", &store), None);
		assert_eq!(ui.selection, Selection::Node("3".into()));
		assert!(ui.drawer_open);
		ui.click_canvas();
		assert_eq!(ui.selection, Selection::None);
		assert!(!ui.drawer_open);
	}

	#[test]
	fn entering_link_mode_closes_drawer_but_keeps_source() {
		let (mut ui, store) = linking();
		ui.click_node("2", &store);
		ui.set_link_mode(false);
		ui.set_link_mode(true);
		assert_eq!(ui.link_source.as_deref(), Some("2"));

		let mut ui = InteractionController::new();
		ui.click_node("2", &store);
		ui.set_link_mode(true);
		assert!(!ui.drawer_open);
		assert_eq!(ui.selection, Selection::None);
	}

	#[test]
	fn canvas_click_cancels_pending_source() {
		let (mut ui, store) = linking();
		ui.click_node("2", &store);
		ui.click_canvas();
		assert_eq!(ui.link_source, None);
		assert_eq!(ui.pending_link, None);
	}

	#[test]
	fn clicking_the_source_again_resets_it() {
		let (mut ui, store) = linking();
		ui.click_node("2", &store);
		ui.click_node("2", &store);
		assert_eq!(ui.link_source, None);
		assert_eq!(ui.pending_link, None);
	}

	#[test]
	fn duplicate_link_warns_and_resets() {
		let (mut ui, store) = linking();
		ui.click_node("1", &store);
		let notice = ui.click_node("2", &store).unwrap();
		assert_eq!(notice.level, NoticeLevel::Warning);
		assert_eq!(ui.link_source, None);
		assert_eq!(ui.pending_link, None);
	}

	#[test]
	fn edge_clicks_are_ignored_in_link_mode() {
		let (mut ui, store) = linking();
		let id = store.snapshot().edges[0].id.clone();
		ui.click_edge(&id, &store);
		assert_eq!(ui.selection, Selection::None);
		ui.set_link_mode(false);
		ui.click_edge(&id, &store);
		assert_eq!(ui.selection, Selection::Edge(id));
	}

	#[test]
	fn delete_key_respects_focus_and_selection() {
		let mut ui = InteractionController::new();
		let mut store = GraphStore::seeded();
		assert!(!ui.key_delete(false));
		ui.click_node("4", &store);
		assert!(!ui.key_delete(true));
		assert_eq!(ui.pending_delete, None);
		assert!(ui.key_delete(false));
		assert_eq!(ui.pending_delete, Some(PendingDelete::Node("4".into())));
		let notice = ui.confirm_delete(&mut store).unwrap();
		assert_eq!(notice.level, NoticeLevel::Success);
		assert_eq!(ui.selection, Selection::None);
		assert!(store.node("4").is_none());
		assert_eq!(store.edge_count(), 13);
	}

	#[test]
	fn canceled_delete_changes_nothing() {
		let mut ui = InteractionController::new();
		let mut store = GraphStore::seeded();
		ui.click_node("4", &store);
		ui.request_delete();
		ui.cancel_delete();
		assert_eq!(ui.confirm_delete(&mut store), None);
		assert_eq!(store.node_count(), 15);
	}

	#[test]
	fn stale_selection_edit_is_silent() {
		let mut ui = InteractionController::new();
		let mut store = GraphStore::seeded();
		ui.click_node("5", &store);
		store.delete_node("5");
		let form = NodeForm {
			label: "x".into(),
			..NodeForm::default()
		};
		assert_eq!(ui.submit_node_edit(&form, &mut store), None);
		assert!(!ui.drawer_open);
	}

	#[test]
	fn context_menu_flow() {
		let mut ui = InteractionController::new();
		let store = GraphStore::seeded();
		ui.open_context_menu(10.0, 20.0, MenuTarget::Node("6".into()));
		ui.context_edit(&store);
		assert_eq!(ui.selection, Selection::Node("6".into()));
		assert_eq!(ui.context_menu, None);

		ui.open_context_menu(1.0, 1.0, MenuTarget::Node("6".into()));
		ui.context_delete();
		assert_eq!(ui.pending_delete, Some(PendingDelete::Node("6".into())));

		ui.open_context_menu(1.0, 1.0, MenuTarget::Canvas);
		ui.context_create_node();
		assert!(ui.node_modal_open);
		assert_eq!(ui.context_menu, None);
	}

	#[test]
	fn node_modal_is_unavailable_in_link_mode() {
		let (mut ui, _) = linking();
		ui.open_node_modal();
		assert!(!ui.node_modal_open);
	}

	#[test]
	fn canvas_menu_creates_nodes_in_link_mode() {
		let (mut ui, _) = linking();
		ui.open_context_menu(5.0, 5.0, MenuTarget::Canvas);
		ui.context_create_node();
		assert!(ui.node_modal_open);
		assert_eq!(ui.context_menu, None);
		assert!(ui.link_mode);
	}

	#[test]
	fn other_clicks_dismiss_the_context_menu() {
		let mut ui = InteractionController::new();
		let store = GraphStore::seeded();
		let edge = store.snapshot().edges[0].id.clone();

		ui.open_context_menu(1.0, 2.0, MenuTarget::Canvas);
		ui.click_canvas();
		assert_eq!(ui.context_menu, None);

		ui.open_context_menu(1.0, 2.0, MenuTarget::Node("3".into()));
		ui.click_node("7", &store);
		assert_eq!(ui.context_menu, None);

		ui.open_context_menu(1.0, 2.0, MenuTarget::Canvas);
		ui.click_edge(&edge, &store);
		assert_eq!(ui.context_menu, None);

		ui.open_context_menu(1.0, 2.0, MenuTarget::Canvas);
		ui.dismiss_context_menu();
		assert_eq!(ui.context_menu, None);
	}

	#[test]
	fn edge_edit_relabels_selected_edge() {
		let mut ui = InteractionController::new();
		let mut store = GraphStore::seeded();
		let id = store.snapshot().edges[3].id.clone();
		ui.click_edge(&id, &store);

		let blank = EdgeForm { label: "  ".into() };
		let notice = ui.submit_edge_edit(&blank, &mut store).unwrap();
		assert_eq!(notice.level, NoticeLevel::Error);
		assert!(ui.drawer_open);
		assert_eq!(store.edge(&id).unwrap().label, "诱发");

		let form = EdgeForm {
			label: "致病因素".into(),
		};
		let notice = ui.submit_edge_edit(&form, &mut store).unwrap();
		assert_eq!(notice.level, NoticeLevel::Success);
		assert!(!ui.drawer_open);
		assert_eq!(store.edge(&id).unwrap().label, "致病因素");
		assert_eq!(store.edge_count(), 14);
	}

	#[test]
	fn stale_edge_edit_is_silent() {
		let mut ui = InteractionController::new();
		let mut store = GraphStore::seeded();
		let id = store.snapshot().edges[3].id.clone();
		ui.click_edge(&id, &store);
		store.delete_edge(&id);
		let before = store.snapshot();

		let form = EdgeForm { label: "x".into() };
		assert_eq!(ui.submit_edge_edit(&form, &mut store), None);
		assert!(!ui.drawer_open);
		assert_eq!(&*store.snapshot(), &*before);
	}

	#[test]
	fn deleting_the_link_source_clears_it() {
		let (mut ui, mut store) = linking();
		ui.click_node("2", &store);
		ui.open_context_menu(0.0, 0.0, MenuTarget::Node("2".into()));
		ui.context_delete();
		ui.confirm_delete(&mut store);
		assert!(store.node("2").is_none());
		assert_eq!(ui.link_source, None);
		assert!(!ui.marks(&store.snapshot()).values().any(|m| m.source));
	}

	#[test]
	fn deleting_another_node_keeps_the_link_source() {
		let (mut ui, mut store) = linking();
		ui.click_node("2", &store);
		ui.open_context_menu(0.0, 0.0, MenuTarget::Node("9".into()));
		ui.context_delete();
		ui.confirm_delete(&mut store);
		assert_eq!(ui.link_source.as_deref(), Some("2"));
	}

	#[test]
	fn source_mark_survives_search_refresh() {
		let (mut ui, store) = linking();
		ui.click_node("2", &store);
		ui.set_search("食管");
		let marks = ui.marks(&store.snapshot());
		assert!(marks["2"].source);
		assert!(marks["2"].dim);
		assert!(marks["1"].highlight);
		assert!(!marks["1"].source);
	}

	#[test]
	fn source_mark_hidden_outside_link_mode() {
		let (mut ui, store) = linking();
		ui.click_node("2", &store);
		ui.set_link_mode(false);
		assert!(!ui.marks(&store.snapshot())["2"].source);
	}
}
