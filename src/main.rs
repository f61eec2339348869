use leptos::prelude::*;
use medkg_editor::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
