/// Right-click on the canvas, in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenuEvent {
	pub client_x: f64,
	pub client_y: f64,
	/// Node under the pointer, if any.
	pub node: Option<String>,
}

/// Layout coordinates of one node, in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePosition {
	pub id: String,
	pub x: f64,
	pub y: f64,
}
