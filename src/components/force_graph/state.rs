use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::types::NodePosition;
use crate::config::EditorConfig;
use crate::graph::GraphData;
use crate::interaction::{MarkMap, NodeMarks};

/// Pointer travel, in screen pixels, below which a press-release is a click.
pub const CLICK_SLOP: f64 = 4.0;
/// Edge hit tolerance in screen pixels.
pub const EDGE_HIT: f64 = 6.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub id: String,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Tracks one press-release so it can be told apart from a drag.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub down: bool,
	pub x: f64,
	pub y: f64,
	pub moved: bool,
}

/// What a completed click landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	Node(String),
	Edge(String),
	Canvas,
}

#[derive(Clone, Copy)]
struct Placement {
	x: f32,
	y: f32,
	anchored: bool,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub press: PressState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	config: EditorConfig,
	marks: MarkMap,
	idx_by_id: HashMap<String, DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, config: EditorConfig, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(config.layout.simulation_parameters()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: PressState::default(),
			width,
			height,
			animation_running: true,
			config,
			marks: MarkMap::new(),
			idx_by_id: HashMap::new(),
		};
		state.set_data(data);
		state
	}

	/// Replaces the simulated graph with `data`. Nodes already on screen keep
	/// their position and anchoring; new ones start from their stored
	/// coordinates or from a ring around the origin.
	pub fn set_data(&mut self, data: &GraphData) {
		let mut previous: HashMap<String, Placement> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.id.clone(),
				Placement {
					x: node.x(),
					y: node.y(),
					anchored: node.data.is_anchor,
				},
			);
		});

		let mut graph = ForceGraph::new(self.config.layout.simulation_parameters());
		let mut idx_by_id = HashMap::new();
		let count = data.nodes.len().max(1) as f64;
		let ring = self.config.layout.initial_radius;

		for (i, node) in data.nodes.iter().enumerate() {
			let place = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				Placement {
					x: node.x.unwrap_or(ring * angle.cos()) as f32,
					y: node.y.unwrap_or(ring * angle.sin()) as f32,
					anchored: false,
				}
			});
			let size = node.size.unwrap_or(self.config.default_node_size);
			let idx = graph.add_node(NodeData {
				x: place.x,
				y: place.y,
				mass: self.config.layout.node_mass,
				is_anchor: place.anchored,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color.clone(),
					radius: size / 2.0,
				},
			});
			idx_by_id.insert(node.id.clone(), idx);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(idx_by_id.get(&edge.source), idx_by_id.get(&edge.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							id: edge.id.clone(),
							label: edge.label.clone(),
						},
					},
				);
			}
		}

		self.graph = graph;
		self.idx_by_id = idx_by_id;
		self.drag = DragState::default();
	}

	pub fn set_marks(&mut self, marks: MarkMap) {
		self.marks = marks;
	}

	pub fn marks_for(&self, id: &str) -> NodeMarks {
		self.marks.get(id).copied().unwrap_or_default()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.idx_by_id
			.iter()
			.find(|&(_, &i)| i == idx)
			.map(|(id, _)| id.clone())
	}

	/// Topmost edge within [`EDGE_HIT`] screen pixels of the point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT / self.transform.k;
		let mut found = None;
		self.graph.visit_edges(|n1, n2, edge| {
			let d = segment_distance(
				(gx, gy),
				(n1.x() as f64, n1.y() as f64),
				(n2.x() as f64, n2.y() as f64),
			);
			if d < tolerance {
				found = Some(edge.user_data.id.clone());
			}
		});
		found
	}

	/// Nodes win over edges, edges over the background.
	pub fn hit(&self, sx: f64, sy: f64) -> Hit {
		if let Some(id) = self.node_at_position(sx, sy).and_then(|idx| self.node_id(idx)) {
			Hit::Node(id)
		} else if let Some(id) = self.edge_at_position(sx, sy) {
			Hit::Edge(id)
		} else {
			Hit::Canvas
		}
	}

	pub fn begin_press(&mut self, x: f64, y: f64) {
		self.press = PressState {
			down: true,
			x,
			y,
			moved: false,
		};
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let (mut nx, mut ny) = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					(nx, ny) = (node.x(), node.y());
				}
			});
			self.drag.node_start_x = nx;
			self.drag.node_start_y = ny;
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn move_pointer(&mut self, x: f64, y: f64) {
		if !self.press.down {
			return;
		}
		if !self.press.moved {
			let (dx, dy) = (x - self.press.x, y - self.press.y);
			if (dx * dx + dy * dy).sqrt() < CLICK_SLOP {
				return;
			}
			self.press.moved = true;
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends the press. Returns what was clicked, or `None` after a drag or pan.
	pub fn end_press(&mut self, x: f64, y: f64) -> Option<Hit> {
		let clicked = self.press.down && !self.press.moved;
		self.cancel_press();
		clicked.then(|| self.hit(x, y))
	}

	pub fn cancel_press(&mut self) {
		self.press = PressState::default();
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn positions(&self) -> Vec<NodePosition> {
		let mut out = Vec::with_capacity(self.idx_by_id.len());
		self.graph.visit_nodes(|node| {
			out.push(NodePosition {
				id: node.data.user_data.id.clone(),
				x: node.x() as f64,
				y: node.y() as f64,
			});
		});
		out
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

/// Distance from `p` to the segment `a`-`b`.
pub fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::seed::initial_data;

	fn state() -> ForceGraphState {
		ForceGraphState::new(&initial_data(), EditorConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(segment_distance((0.0, 5.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((-3.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((1.0, 1.0), (2.0, 2.0), (2.0, 2.0)), 2f64.sqrt());
	}

	#[test]
	fn positions_survive_a_data_swap() {
		let mut s = state();
		let before: HashMap<_, _> = s.positions().into_iter().map(|p| (p.id, (p.x, p.y))).collect();
		let mut data = initial_data();
		data.nodes.retain(|n| n.id != "15");
		data.edges.retain(|e| !e.touches("15"));
		s.set_data(&data);
		let after = s.positions();
		assert_eq!(after.len(), 14);
		for p in after {
			assert_eq!(before[&p.id], (p.x, p.y));
		}
	}

	#[test]
	fn press_without_movement_is_a_click_on_the_node_under_it() {
		let mut s = state();
		let first = s.positions().into_iter().find(|p| p.id == "1").unwrap();
		let (sx, sy) = (first.x + s.transform.x, first.y + s.transform.y);
		s.begin_press(sx, sy);
		s.move_pointer(sx + 1.0, sy);
		assert_eq!(s.end_press(sx + 1.0, sy), Some(Hit::Node("1".into())));
	}

	#[test]
	fn drag_is_not_a_click() {
		let mut s = state();
		s.begin_press(5.0, 5.0);
		s.move_pointer(50.0, 50.0);
		assert_eq!(s.end_press(50.0, 50.0), None);
		assert!(!s.pan.active);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..200 {
			s.zoom_at(0.0, 0.0, true);
		}
		assert!((s.transform.k - EditorConfig::default().max_zoom).abs() < 1e-9);
	}
}
