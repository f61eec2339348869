use leptos::prelude::*;

use super::editor_state::use_editor;
use crate::interaction::NoticeLevel;

fn level_class(level: NoticeLevel) -> &'static str {
	match level {
		NoticeLevel::Success => "toast success",
		NoticeLevel::Warning => "toast warning",
		NoticeLevel::Error => "toast error",
	}
}

#[component]
pub fn NoticeStack() -> impl IntoView {
	let toasts = use_editor().toasts;

	view! {
		<div class="toast-stack">
			<For each=move || toasts.get() key=|t| t.id let:toast>
				<div class=level_class(toast.notice.level)>{toast.notice.text}</div>
			</For>
		</div>
	}
}
