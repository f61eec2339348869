use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};
use crate::interaction::NodeMarks;

const BACKGROUND: &str = "#f8fafc";
const EDGE_COLOR: &str = "#999999";
const EDGE_LABEL_COLOR: &str = "#666666";
const NODE_LABEL_COLOR: &str = "#333333";
const SELECTED_STROKE: &str = "#1677ff";
const SOURCE_STROKE: &str = "#722ed1";
const DIM_ALPHA: f64 = 0.2;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

/// Text on a white rounded-off box, centered on (x, y).
fn draw_label(
	ctx: &CanvasRenderingContext2d,
	text: &str,
	x: f64,
	y: f64,
	font_px: f64,
	color: &str,
	padding: (f64, f64),
) {
	ctx.set_font(&format!("{}px sans-serif", font_px));
	let width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
	let (box_w, box_h) = (width + padding.0 * 2.0, font_px + padding.1 * 2.0);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(x - box_w / 2.0, y - box_h / 2.0, box_w, box_h);
	ctx.set_fill_style_str(color);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, x, y);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let arrow_size = 8.0;

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let faded = state.marks_for(&n1.data.user_data.id).dim
			&& state.marks_for(&n2.data.user_data.id).dim;
		ctx.set_global_alpha(if faded { DIM_ALPHA } else { 1.0 });

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(1.5);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		ctx.set_fill_style_str(EDGE_COLOR);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		let label = &edge.user_data.label;
		if !label.is_empty() {
			// Keep text upright whichever way the edge points.
			let mut angle = dy.atan2(dx);
			if angle > PI / 2.0 || angle < -PI / 2.0 {
				angle += PI;
			}
			ctx.save();
			let _ = ctx.translate((x1 + x2) / 2.0, (y1 + y2) / 2.0);
			let _ = ctx.rotate(angle);
			draw_label(ctx, label, 0.0, 0.0, 11.0, EDGE_LABEL_COLOR, (4.0, 2.0));
			ctx.restore();
		}
		ctx.set_global_alpha(1.0);
	});
}

fn stroke_for(marks: NodeMarks) -> (&'static str, f64, Option<(f64, f64)>) {
	if marks.source {
		(SOURCE_STROKE, 4.0, Some((4.0, 4.0)))
	} else if marks.selected {
		(SELECTED_STROKE, 3.0, None)
	} else if marks.highlight {
		("#000000", 3.0, None)
	} else {
		("#ffffff", 2.0, None)
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, info: &NodeInfo, x: f64, y: f64, marks: NodeMarks) {
	let alpha = if marks.dim { DIM_ALPHA } else { 1.0 };
	let (stroke, line_width, dash) = stroke_for(marks);

	ctx.save();
	if marks.source {
		ctx.set_shadow_color(SOURCE_STROKE);
		ctx.set_shadow_blur(10.0);
	} else if marks.highlight {
		ctx.set_shadow_color("#666666");
		ctx.set_shadow_blur(10.0);
	}
	ctx.set_global_alpha(alpha * 0.9);
	ctx.begin_path();
	let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color);
	ctx.fill();
	ctx.restore();

	ctx.set_global_alpha(alpha);
	set_dash(ctx, dash);
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(line_width);
	ctx.begin_path();
	let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
	ctx.stroke();
	set_dash(ctx, None);

	draw_label(
		ctx,
		&info.label,
		x,
		y + info.radius + 8.0 + 6.0,
		12.0,
		NODE_LABEL_COLOR,
		(2.0, 2.0),
	);
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	// Dimmed nodes first so highlighted ones sit on top.
	for pass_dim in [true, false] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			let marks = state.marks_for(&info.id);
			if marks.dim != pass_dim {
				return;
			}
			draw_node(ctx, info, node.x() as f64, node.y() as f64, marks);
		});
	}
}
