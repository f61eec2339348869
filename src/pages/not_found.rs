use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"页面不存在"</h1>
			<a href="/">"返回知识图谱"</a>
		</div>
	}
}
