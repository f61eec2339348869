use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{ForceGraphState, Hit};
use super::types::{ContextMenuEvent, NodePosition};
use crate::config::EditorConfig;
use crate::graph::GraphData;
use crate::interaction::MarkMap;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok(),
		Ok(None) => None,
		Err(e) => {
			error!("canvas context error: {e:?}");
			None
		}
	}
}

/// Canvas view of a graph snapshot. The simulation is rebuilt from every new
/// snapshot; node marks are re-applied whenever they change.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Arc<GraphData>>,
	#[prop(into)] marks: Signal<MarkMap>,
	config: EditorConfig,
	#[prop(into)] on_node_click: Callback<String>,
	#[prop(into)] on_edge_click: Callback<String>,
	#[prop(into)] on_canvas_click: Callback<()>,
	#[prop(into)] on_context_menu: Callback<ContextMenuEvent>,
	/// Fired after a node drag with the positions of every node.
	#[prop(into)]
	on_positions: Callback<Vec<NodePosition>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window; graph canvas not started");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("2d context unavailable; graph canvas not started");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let mut initial = ForceGraphState::new(&data.get_untracked(), config.clone(), w, h);
		initial.set_marks(marks.get_untracked());
		*state_init.borrow_mut() = Some(initial);
		debug!("graph canvas started at {w}x{h}");

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			if let Err(e) =
				window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			{
				error!("resize listener failed: {e:?}");
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let snapshot = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.set_data(&snapshot);
		}
	});

	let state_marks = state.clone();
	Effect::new(move |_| {
		let current = marks.get();
		if let Some(ref mut s) = *state_marks.borrow_mut() {
			s.set_marks(current);
		}
	});

	let canvas_el = move || -> Option<HtmlCanvasElement> { canvas_ref.get().map(Into::into) };

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.move_pointer(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		// Resolve under the borrow, notify after releasing it.
		let (hit, dragged) = match *state_mu.borrow_mut() {
			Some(ref mut s) => {
				let dragged = s.drag.active && s.press.moved;
				(s.end_press(x, y), dragged.then(|| s.positions()))
			}
			None => (None, None),
		};
		match hit {
			Some(Hit::Node(id)) => on_node_click.run(id),
			Some(Hit::Edge(id)) => on_edge_click.run(id),
			Some(Hit::Canvas) => on_canvas_click.run(()),
			None => {}
		}
		if let Some(positions) = dragged {
			on_positions.run(positions);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_press();
		}
	};

	let state_cm = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		let node = state_cm
			.borrow()
			.as_ref()
			.and_then(|s| s.node_at_position(x, y).and_then(|idx| s.node_id(idx)));
		on_context_menu.run(ContextMenuEvent {
			client_x: ev.client_x() as f64,
			client_y: ev.client_y() as f64,
			node,
		});
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y() < 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

