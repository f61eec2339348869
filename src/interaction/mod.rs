//! Selection, link mode and search state, kept free of DOM types.

mod controller;
pub mod forms;
pub mod search;

pub use controller::{
	ContextMenu, InteractionController, MenuTarget, Notice, NoticeLevel, PendingDelete,
	PendingLink, Selection,
};
pub use search::{MarkMap, NodeMarks};
